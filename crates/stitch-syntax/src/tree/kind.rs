//! Node kind tags.

use std::fmt;

/// The kind tag of an owned syntax node.
///
/// Kinds the engine reasons about get their own variant; every other named
/// grammar kind is carried verbatim in [`NodeKind::Other`]. Anonymous grammar
/// tokens (punctuation and keywords) are [`NodeKind::Token`] and keep their
/// text on the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a file.
    Program,
    /// `function name() {}` declarations.
    FunctionDeclaration,
    /// `function () {}` expressions.
    FunctionExpression,
    /// `() => {}` expressions.
    ArrowFunction,
    /// `{ ... }` statement blocks.
    StatementBlock,
    /// `return` statements.
    ReturnStatement,
    /// `( ... )` expressions.
    ParenthesizedExpression,
    /// Markup element with children, or a fragment.
    JsxElement,
    /// Opening tag of a [`NodeKind::JsxElement`].
    JsxOpeningElement,
    /// Closing tag of a [`NodeKind::JsxElement`].
    JsxClosingElement,
    /// `<name ... />` elements.
    JsxSelfClosingElement,
    /// `name` or `name=value` attributes.
    JsxAttribute,
    /// `{ ... }` expression containers inside markup.
    JsxExpression,
    /// Literal text inside markup.
    JsxText,
    /// `ns:name` attribute or element names.
    JsxNamespaceName,
    /// `&amp;`-style character references inside markup.
    HtmlCharacterReference,
    /// Identifiers.
    Identifier,
    /// Property names, including attribute names.
    PropertyIdentifier,
    /// `a.b` expressions.
    MemberExpression,
    /// Quoted string literals.
    StringLiteral,
    /// Raw text inside a string or template literal.
    StringFragment,
    /// Escape sequences inside a string or template literal.
    EscapeSequence,
    /// Backtick template literals.
    TemplateString,
    /// `${ ... }` interpolations inside template literals.
    TemplateSubstitution,
    /// `[ ... ]` array literals.
    Array,
    /// `{ ... }` object literals.
    Object,
    /// `key: value` entries of object literals.
    Pair,
    /// `import` statements.
    ImportStatement,
    /// `export` statements.
    ExportStatement,
    /// Comments.
    Comment,
    /// Unparseable region reported by the grammar.
    Error,
    /// Anonymous token such as `<`, `=` or `return`.
    Token,
    /// Any other named grammar kind.
    Other(String),
}

impl NodeKind {
    /// Maps a grammar kind name to a tag.
    #[must_use]
    pub fn from_grammar(kind: &str, named: bool) -> Self {
        if !named {
            return Self::Token;
        }
        match kind {
            "program" => Self::Program,
            "function_declaration" => Self::FunctionDeclaration,
            "function_expression" | "function" => Self::FunctionExpression,
            "arrow_function" => Self::ArrowFunction,
            "statement_block" => Self::StatementBlock,
            "return_statement" => Self::ReturnStatement,
            "parenthesized_expression" => Self::ParenthesizedExpression,
            "jsx_element" => Self::JsxElement,
            "jsx_opening_element" => Self::JsxOpeningElement,
            "jsx_closing_element" => Self::JsxClosingElement,
            "jsx_self_closing_element" => Self::JsxSelfClosingElement,
            "jsx_attribute" => Self::JsxAttribute,
            "jsx_expression" => Self::JsxExpression,
            "jsx_text" => Self::JsxText,
            "jsx_namespace_name" => Self::JsxNamespaceName,
            "html_character_reference" => Self::HtmlCharacterReference,
            "identifier" => Self::Identifier,
            "property_identifier" => Self::PropertyIdentifier,
            "member_expression" => Self::MemberExpression,
            "string" => Self::StringLiteral,
            "string_fragment" => Self::StringFragment,
            "escape_sequence" => Self::EscapeSequence,
            "template_string" => Self::TemplateString,
            "template_substitution" => Self::TemplateSubstitution,
            "array" => Self::Array,
            "object" => Self::Object,
            "pair" => Self::Pair,
            "import_statement" => Self::ImportStatement,
            "export_statement" => Self::ExportStatement,
            "comment" => Self::Comment,
            "ERROR" => Self::Error,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the grammar name of this kind (`"token"` for anonymous tokens).
    #[must_use]
    pub fn grammar_name(&self) -> &str {
        match self {
            Self::Program => "program",
            Self::FunctionDeclaration => "function_declaration",
            Self::FunctionExpression => "function_expression",
            Self::ArrowFunction => "arrow_function",
            Self::StatementBlock => "statement_block",
            Self::ReturnStatement => "return_statement",
            Self::ParenthesizedExpression => "parenthesized_expression",
            Self::JsxElement => "jsx_element",
            Self::JsxOpeningElement => "jsx_opening_element",
            Self::JsxClosingElement => "jsx_closing_element",
            Self::JsxSelfClosingElement => "jsx_self_closing_element",
            Self::JsxAttribute => "jsx_attribute",
            Self::JsxExpression => "jsx_expression",
            Self::JsxText => "jsx_text",
            Self::JsxNamespaceName => "jsx_namespace_name",
            Self::HtmlCharacterReference => "html_character_reference",
            Self::Identifier => "identifier",
            Self::PropertyIdentifier => "property_identifier",
            Self::MemberExpression => "member_expression",
            Self::StringLiteral => "string",
            Self::StringFragment => "string_fragment",
            Self::EscapeSequence => "escape_sequence",
            Self::TemplateString => "template_string",
            Self::TemplateSubstitution => "template_substitution",
            Self::Array => "array",
            Self::Object => "object",
            Self::Pair => "pair",
            Self::ImportStatement => "import_statement",
            Self::ExportStatement => "export_statement",
            Self::Comment => "comment",
            Self::Error => "ERROR",
            Self::Token => "token",
            Self::Other(name) => name,
        }
    }

    /// Returns whether this kind is a markup element (with or without
    /// children).
    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self, Self::JsxElement | Self::JsxSelfClosingElement)
    }

    /// Returns whether this kind carries an element's name and attributes.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        matches!(self, Self::JsxOpeningElement | Self::JsxSelfClosingElement)
    }

    /// Returns whether this kind is printed verbatim because its inner
    /// whitespace is significant.
    #[must_use]
    pub fn is_verbatim(&self) -> bool {
        match self {
            Self::StringLiteral
            | Self::TemplateString
            | Self::JsxText
            | Self::Comment
            | Self::HtmlCharacterReference => true,
            Self::Other(name) => name == "regex",
            _ => false,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.grammar_name())
    }
}
