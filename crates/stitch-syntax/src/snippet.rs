//! Parsing of markup snippets supplied for insertion.
//!
//! A snippet is parsed inside a fragment (`<>snippet</>;`) with the markup
//! grammar, and the fragment's children are lifted out. The wrapper must come
//! back intact, so a snippet cannot close the fragment early and smuggle in
//! statements.

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::Parser;
use crate::tree::{Node, NodeKind};

const OPEN: &str = "<>";
const CLOSE: &str = "</>;";

/// Parses a markup snippet into detached nodes.
///
/// Whitespace-only text between top-level nodes is kept so spacing in the
/// snippet survives insertion.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidSnippet`] when the snippet is empty, is not
/// valid markup, or does not stay inside its wrapper.
pub fn parse_markup_snippet(snippet: &str) -> Result<Vec<Node>, SyntaxError> {
    if snippet.trim().is_empty() {
        return Err(SyntaxError::invalid_snippet("snippet is empty"));
    }
    let wrapped = format!("{OPEN}{snippet}{CLOSE}");
    let mut parser = Parser::new(SupportedLanguage::Tsx)?;
    let tree = parser
        .parse_tree(&wrapped)
        .map_err(|err| SyntaxError::invalid_snippet(err.to_string()))?;

    let expected = format!("{OPEN}{snippet}</>");
    let fragment = single_fragment(tree.root(), &expected)
        .ok_or_else(|| SyntaxError::invalid_snippet("snippet escapes its fragment wrapper"))?;
    let inner = fragment
        .children()
        .iter()
        .filter(|child| {
            !matches!(
                child.kind(),
                NodeKind::JsxOpeningElement | NodeKind::JsxClosingElement
            )
        })
        .cloned()
        .map(Node::detached)
        .collect::<Vec<_>>();
    if inner.is_empty() {
        return Err(SyntaxError::invalid_snippet("snippet contains no markup"));
    }
    Ok(inner)
}

/// Parses a snippet that must contain exactly one element.
///
/// Surrounding whitespace is discarded.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidSnippet`] when the snippet is invalid or
/// does not hold exactly one element.
pub fn parse_single_element(snippet: &str) -> Result<Node, SyntaxError> {
    let mut elements = parse_markup_snippet(snippet)?
        .into_iter()
        .filter(|node| !is_blank_text(node));
    match (elements.next(), elements.next()) {
        (Some(node), None) if node.kind().is_element() => Ok(node.with_leading("")),
        _ => Err(SyntaxError::invalid_snippet(
            "expected exactly one element in snippet",
        )),
    }
}

/// Returns whether a node is markup text made only of whitespace.
#[must_use]
pub fn is_blank_text(node: &Node) -> bool {
    node.kind() == &NodeKind::JsxText && node.text().is_some_and(|text| text.trim().is_empty())
}

fn single_fragment<'t>(root: &'t Node, expected: &str) -> Option<&'t Node> {
    let mut statements = root.named_children();
    let statement = statements.next()?;
    if statements.next().is_some() {
        return None;
    }
    let expression = statement.named_children().next()?;
    let is_fragment = expression.kind() == &NodeKind::JsxElement
        && expression
            .child_of_kind(&NodeKind::JsxOpeningElement)
            .is_some_and(|opening| opening.child_by_field("name").is_none());
    (is_fragment && expression.source_text() == expected).then_some(expression)
}
