//! Builders for nodes created by edits.
//!
//! Built nodes carry no span and print exactly as constructed. Callers set
//! leading trivia where spacing matters.

use super::literal::escape_js_string;
use super::{Node, NodeKind};

/// Builds a double-quoted string literal, or one using `quote` when given.
#[must_use]
pub fn js_string_literal(value: &str, quote: Option<char>) -> Node {
    let delimiter = quote.unwrap_or('"');
    let escaped = escape_js_string(value, delimiter);
    let kind = if delimiter == '`' {
        NodeKind::TemplateString
    } else {
        NodeKind::StringLiteral
    };
    Node::leaf(kind, format!("{delimiter}{escaped}{delimiter}"))
}

/// Builds the value of a markup attribute.
///
/// Markup attribute strings have no escape sequences, so the quote is chosen
/// to avoid the characters in `value`. Values containing both quote
/// characters become an expression container holding a string literal.
#[must_use]
pub fn jsx_attribute_value(value: &str) -> Node {
    if !value.contains('"') {
        Node::leaf(NodeKind::StringLiteral, format!("\"{value}\""))
    } else if !value.contains('\'') {
        Node::leaf(NodeKind::StringLiteral, format!("'{value}'"))
    } else {
        jsx_expression(js_string_literal(value, None))
    }
}

/// Builds a markup attribute. `None` produces a presence-only attribute.
#[must_use]
pub fn jsx_attribute(name: &str, value: Option<Node>) -> Node {
    let mut children = vec![Node::leaf(NodeKind::PropertyIdentifier, name)];
    if let Some(inner) = value {
        children.push(Node::token("="));
        children.push(inner.with_leading(""));
    }
    Node::branch(NodeKind::JsxAttribute, children).with_leading(" ")
}

/// Builds literal markup text.
#[must_use]
pub fn jsx_text(text: &str) -> Node {
    Node::leaf(NodeKind::JsxText, text)
}

/// Wraps an expression in a markup expression container.
#[must_use]
pub fn jsx_expression(inner: Node) -> Node {
    Node::branch(
        NodeKind::JsxExpression,
        vec![Node::token("{"), inner.with_leading(""), Node::token("}")],
    )
}

/// Builds the closing tag for an element named `name` (empty for fragments).
#[must_use]
pub fn jsx_closing_element(name: &str) -> Node {
    let mut children = vec![Node::token("<"), Node::token("/")];
    if !name.is_empty() {
        children.push(Node::leaf(NodeKind::Identifier, name).with_field("name"));
    }
    children.push(Node::token(">"));
    Node::branch(NodeKind::JsxClosingElement, children).with_field("close_tag")
}

/// Promotes a self-closing element to an element with `children`.
///
/// The opening tag keeps the name and attributes of `element` with their
/// trivia; the whitespace before `/>` is dropped. Nodes that are not
/// self-closing elements are returned unchanged.
#[must_use]
pub fn jsx_element_from_self_closing(element: Node, children: Vec<Node>) -> Node {
    if element.kind() != &NodeKind::JsxSelfClosingElement {
        return element;
    }
    let name = element
        .child_by_field("name")
        .map(Node::source_text)
        .unwrap_or_default();
    let leading = element.leading().to_owned();
    let field = element.field();
    let mut opening_children: Vec<Node> = element
        .children
        .into_iter()
        .filter(|child| !child.is_token("/") && !child.is_token(">") && !child.is_token("/>"))
        .collect();
    opening_children.push(Node::token(">"));
    let opening =
        Node::branch(NodeKind::JsxOpeningElement, opening_children).with_field("open_tag");

    let mut element_children = Vec::with_capacity(children.len().saturating_add(2));
    element_children.push(opening);
    element_children.extend(children);
    element_children.push(jsx_closing_element(&name));
    let mut promoted = Node::branch(NodeKind::JsxElement, element_children).with_leading(leading);
    promoted.field = field;
    promoted
}

/// Builds `<name attributes>children</name>`.
#[must_use]
pub fn jsx_wrapper_element(name: &str, attributes: Vec<Node>, children: Vec<Node>) -> Node {
    let mut opening_children = Vec::with_capacity(attributes.len().saturating_add(3));
    opening_children.push(Node::token("<"));
    opening_children.push(Node::leaf(NodeKind::Identifier, name).with_field("name"));
    opening_children.extend(attributes);
    opening_children.push(Node::token(">"));
    let opening =
        Node::branch(NodeKind::JsxOpeningElement, opening_children).with_field("open_tag");

    let mut element_children = Vec::with_capacity(children.len().saturating_add(2));
    element_children.push(opening);
    element_children.extend(children);
    element_children.push(jsx_closing_element(name));
    Node::branch(NodeKind::JsxElement, element_children)
}

/// Builds an object literal from keys and prepared value nodes.
///
/// Keys that are not plain identifiers are quoted.
#[must_use]
pub fn object_literal(entries: Vec<(String, Node)>) -> Node {
    let mut children = Vec::with_capacity(entries.len().saturating_mul(2).saturating_add(2));
    children.push(Node::token("{"));
    let empty = entries.is_empty();
    for (index, (key, value)) in entries.into_iter().enumerate() {
        if index > 0 {
            children.push(Node::token(","));
        }
        let key_node = if is_identifier(&key) {
            Node::leaf(NodeKind::PropertyIdentifier, key)
        } else {
            js_string_literal(&key, None)
        };
        let pair = Node::branch(
            NodeKind::Pair,
            vec![
                key_node.with_field("key"),
                Node::token(":"),
                value.with_leading(" ").with_field("value"),
            ],
        );
        children.push(pair.with_leading(" "));
    }
    let close = if empty {
        Node::token("}")
    } else {
        Node::token("}").with_leading(" ")
    };
    children.push(close);
    Node::branch(NodeKind::Object, children)
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("flex", "\"flex\"")]
    #[case("say \"hi\"", "'say \"hi\"'")]
    #[case("a\"b'c", "{\"a\\\"b'c\"}")]
    fn attribute_values_pick_a_safe_quote(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(jsx_attribute_value(value).source_text(), expected);
    }

    #[test]
    fn attribute_prints_with_leading_space() {
        let attr = jsx_attribute("id", Some(jsx_attribute_value("main")));
        let mut out = String::new();
        attr.write_to(&mut out);
        assert_eq!(out, " id=\"main\"");
    }

    #[test]
    fn self_closing_promotion_keeps_attributes() {
        let element = Node::branch(
            NodeKind::JsxSelfClosingElement,
            vec![
                Node::token("<"),
                Node::leaf(NodeKind::Identifier, "img").with_field("name"),
                jsx_attribute("alt", Some(jsx_attribute_value("x"))),
                Node::token("/").with_leading(" "),
                Node::token(">"),
            ],
        );
        let promoted = jsx_element_from_self_closing(element, vec![jsx_text("hi")]);
        assert_eq!(promoted.source_text(), "<img alt=\"x\">hi</img>");
    }

    #[test]
    fn object_literal_quotes_non_identifier_keys() {
        let node = object_literal(vec![
            ("color".to_owned(), js_string_literal("red", None)),
            ("--gap".to_owned(), js_string_literal("4px", None)),
            ("opacity".to_owned(), Node::leaf(NodeKind::Other("number".to_owned()), "0.5")),
        ]);
        assert_eq!(
            node.source_text(),
            "{ color: \"red\", \"--gap\": \"4px\", opacity: 0.5 }"
        );
    }

    #[test]
    fn wrapper_element_encloses_children() {
        let node = jsx_wrapper_element(
            "section",
            vec![jsx_attribute("className", Some(jsx_attribute_value("card")))],
            vec![jsx_text("body")],
        );
        assert_eq!(node.source_text(), "<section className=\"card\">body</section>");
    }
}
