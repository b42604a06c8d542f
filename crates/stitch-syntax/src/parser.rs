//! Tree-sitter parsing with located error reporting.
//!
//! Tree-sitter always produces a tree, splicing `ERROR` and `MISSING` nodes
//! over anything it cannot make sense of. The engine edits only sources that
//! parse cleanly, so [`Parser::parse_tree`] turns the first such node into a
//! [`SyntaxError::ParseError`] and converts clean parses into an owned
//! [`SourceTree`].

use std::ops::Range;

use tracing::debug;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;
use crate::tree::{SourceTree, convert_tree};

const PARSE_TARGET: &str = "stitch_syntax::parser";

/// Longest source excerpt quoted in an error message, in characters.
const EXCERPT_CHARS: usize = 40;

/// A raw Tree-sitter parse, possibly containing error nodes.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Returns the Tree-sitter tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the grammar used.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns whether any error or missing node was produced.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Every error and missing node, in document order.
    ///
    /// Children of an error node are not reported separately.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut found = Vec::new();
        let mut pending = vec![self.tree.root_node()];
        while let Some(node) = pending.pop() {
            if node.is_error() || node.is_missing() {
                found.push(SyntaxErrorInfo::from_node(node, &self.source));
            } else if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<_> = node.children(&mut cursor).collect();
                pending.extend(children.into_iter().rev());
            }
        }
        found
    }

    /// Converts a clean parse into an owned tree.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] at the first problem when the
    /// source is malformed or nested deeper than
    /// [`MAX_TREE_DEPTH`](crate::MAX_TREE_DEPTH).
    pub fn into_source_tree(self) -> Result<SourceTree, SyntaxError> {
        if self.has_errors() {
            return Err(self.errors().first().map_or_else(
                || SyntaxError::parse(self.language, "syntax error"),
                |info| info.to_error(self.language),
            ));
        }
        convert_tree(&self.tree, &self.source, self.language)
    }
}

/// Location and description of one parse problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the offending node.
    pub byte_range: Range<usize>,
    /// One-based line.
    pub line: u32,
    /// One-based column, in bytes.
    pub column: u32,
    /// First line of the offending text, shortened.
    pub context: String,
    /// What went wrong.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "unexpected syntax".to_owned()
        };
        Self {
            byte_range: node.byte_range(),
            line,
            column,
            context: excerpt(source.get(node.byte_range()).unwrap_or_default()),
            message,
        }
    }

    fn to_error(&self, language: SupportedLanguage) -> SyntaxError {
        SyntaxError::parse_at(
            language,
            self.line,
            self.column,
            format!("{} near `{}`", self.message, self.context),
        )
    }
}

fn excerpt(text: &str) -> String {
    let first = text.lines().next().unwrap_or_default();
    if first.chars().count() <= EXCERPT_CHARS {
        return first.to_owned();
    }
    let mut short: String = first.chars().take(EXCERPT_CHARS.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

/// A Tree-sitter parser bound to one grammar.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] when the grammar is
    /// incompatible with the linked Tree-sitter runtime.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|err| SyntaxError::parser_init(language, err.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Returns the grammar in use.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses without rejecting error nodes.
    ///
    /// # Errors
    ///
    /// Fails only if Tree-sitter returns no tree at all.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parser produced no tree"))?;
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }

    /// Parses into an owned tree, rejecting malformed source.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] when the source is malformed.
    pub fn parse_tree(&mut self, source: &str) -> Result<SourceTree, SyntaxError> {
        let tree = self.parse(source)?.into_source_tree()?;
        debug!(
            target: PARSE_TARGET,
            language = %self.language,
            bytes = source.len(),
            "parsed source tree"
        );
        Ok(tree)
    }
}

/// One-shot parse with a fresh parser.
///
/// # Errors
///
/// As [`Parser::new`] and [`Parser::parse_tree`].
pub fn parse_source(source: &str, language: SupportedLanguage) -> Result<SourceTree, SyntaxError> {
    Parser::new(language)?.parse_tree(source)
}
