//! Reading markup elements out of a source tree.
//!
//! An element is a `jsx_element` (opening tag, content, closing tag) or a
//! `jsx_self_closing_element`. Fragments have no name and are never
//! targets.

use std::collections::BTreeMap;

use stitch_syntax::{
    Node, NodeKind, NodeRef, SourceTree, Span, TraversalLimits, collect, static_string_value,
};

use crate::config::EngineConfig;

/// The node carrying an element's name and attributes.
pub(crate) fn opening(element: &Node) -> Option<&Node> {
    match element.kind() {
        NodeKind::JsxSelfClosingElement => Some(element),
        NodeKind::JsxElement => element.child_of_kind(&NodeKind::JsxOpeningElement),
        _ => None,
    }
}

/// Mutable counterpart of [`opening`].
pub(crate) fn opening_mut(element: &mut Node) -> Option<&mut Node> {
    if element.kind() == &NodeKind::JsxSelfClosingElement {
        return Some(element);
    }
    if element.kind() != &NodeKind::JsxElement {
        return None;
    }
    element
        .children_mut()
        .iter_mut()
        .find(|child| child.kind() == &NodeKind::JsxOpeningElement)
}

/// The element name, or `None` for fragments and non-elements.
pub(crate) fn element_name(element: &Node) -> Option<String> {
    opening(element)?
        .child_by_field("name")
        .map(Node::source_text)
}

/// Whether `node` is a named element.
pub(crate) fn is_named_element(node: &Node) -> bool {
    node.kind().is_element() && element_name(node).is_some()
}

/// Whether `node` can hold markup children (an element or a fragment).
pub(crate) fn holds_content(node: &Node) -> bool {
    node.kind() == &NodeKind::JsxElement
}

/// Index range of the content children of an element with a closing tag.
///
/// Children of a `jsx_element` are the opening tag, the content and the
/// closing tag; self-closing elements have no content.
pub(crate) fn content_range(element: &Node) -> Option<std::ops::Range<usize>> {
    if element.kind() != &NodeKind::JsxElement {
        return None;
    }
    let children = element.children();
    let start = children
        .iter()
        .position(|child| child.kind() == &NodeKind::JsxOpeningElement)?
        .checked_add(1)?;
    let end = children
        .iter()
        .rposition(|child| child.kind() == &NodeKind::JsxClosingElement)?;
    (start <= end).then_some(start..end)
}

/// Content children of an element; empty for self-closing elements.
pub(crate) fn content(element: &Node) -> &[Node] {
    content_range(element)
        .and_then(|range| element.children().get(range))
        .unwrap_or_default()
}

/// Attribute nodes of an opening node with their child indices.
pub(crate) fn attributes(opening: &Node) -> impl Iterator<Item = (usize, &Node)> {
    opening
        .children()
        .iter()
        .enumerate()
        .filter(|(_, child)| child.kind() == &NodeKind::JsxAttribute)
}

/// Name of an attribute node.
pub(crate) fn attribute_name(attribute: &Node) -> Option<String> {
    attribute.children().first().map(Node::source_text)
}

/// Value node of an attribute: the child after `=`.
pub(crate) fn attribute_value_node(attribute: &Node) -> Option<&Node> {
    let equals = attribute
        .children()
        .iter()
        .position(|child| child.is_token("="))?;
    attribute.child(equals.checked_add(1)?)
}

/// Finds an attribute by name, returning its child index and node.
pub(crate) fn find_attribute<'n>(opening: &'n Node, name: &str) -> Option<(usize, &'n Node)> {
    attributes(opening).find(|(_, attribute)| attribute_name(attribute).as_deref() == Some(name))
}

/// What an attribute holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrValue {
    /// Presence only, e.g. `disabled`.
    Present,
    /// A value known without evaluation.
    Static(String),
    /// An expression; holds its source text.
    Dynamic(String),
}

impl AttrValue {
    /// The value as listed in node info.
    pub(crate) fn display(&self) -> String {
        match self {
            Self::Present => "true".to_owned(),
            Self::Static(value) | Self::Dynamic(value) => value.clone(),
        }
    }

    pub(crate) fn into_static(self) -> Option<String> {
        match self {
            Self::Static(value) => Some(value),
            Self::Present | Self::Dynamic(_) => None,
        }
    }
}

/// Reads an attribute's value.
///
/// Quoted values are taken verbatim apart from entity decoding; markup
/// attribute strings have no escape sequences. Expression containers
/// holding a plain string literal are static too.
pub(crate) fn read_attribute(attribute: &Node) -> AttrValue {
    let Some(value) = attribute_value_node(attribute) else {
        return AttrValue::Present;
    };
    match value.kind() {
        NodeKind::StringLiteral => {
            let raw = value.text().unwrap_or_default();
            let mut chars = raw.chars();
            chars.next();
            chars.next_back();
            AttrValue::Static(decode_entities(chars.as_str()))
        }
        NodeKind::JsxExpression => expression_string(value)
            .map_or_else(|| AttrValue::Dynamic(value.source_text()), AttrValue::Static),
        _ => AttrValue::Dynamic(value.source_text()),
    }
}

/// The string held by `{"..."}` or ``{`...`}``, if that is all the
/// container holds.
pub(crate) fn expression_string(container: &Node) -> Option<String> {
    let mut inner = container.named_children();
    let literal = inner.next()?;
    if inner.next().is_some() {
        return None;
    }
    static_string_value(literal)
}

/// Reads an attribute of an element by name.
pub(crate) fn attribute_of(element: &Node, name: &str) -> Option<AttrValue> {
    let (_, attribute) = find_attribute(opening(element)?, name)?;
    Some(read_attribute(attribute))
}

/// The static class list of an element, from the first class attribute
/// present.
pub(crate) fn class_value(element: &Node, config: &EngineConfig) -> Option<String> {
    config
        .class_attributes
        .iter()
        .find_map(|name| attribute_of(element, name))
        .and_then(AttrValue::into_static)
}

/// Whitespace-normalised text rendered directly by an element.
///
/// Text children, character references and string-literal expressions
/// contribute; nested elements and other expressions act as separators.
pub(crate) fn direct_text(element: &Node) -> String {
    let mut raw = String::new();
    for child in content(element) {
        match child.kind() {
            NodeKind::JsxText | NodeKind::HtmlCharacterReference => {
                raw.push_str(child.leading());
                raw.push_str(&decode_entities(child.text().unwrap_or_default()));
            }
            NodeKind::JsxExpression => {
                raw.push_str(child.leading());
                match expression_string(child) {
                    Some(value) => raw.push_str(&value),
                    None => raw.push(' '),
                }
            }
            _ => raw.push(' '),
        }
    }
    normalize_whitespace(&raw)
}

/// Trims and collapses whitespace runs to single spaces.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

const ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
];

/// Decodes the named references above plus decimal and hex references.
/// Unknown references are kept as written.
pub(crate) fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        let (before, tail) = rest.split_at(amp);
        out.push_str(before);
        let decoded = tail
            .find(';')
            .and_then(|semi| tail.get(1..semi).map(|name| (semi, name)))
            .and_then(|(semi, name)| decode_reference(name).map(|ch| (semi, ch)));
        match decoded {
            Some((semi, ch)) => {
                out.push(ch);
                rest = tail.get(semi.saturating_add(1)..).unwrap_or_default();
            }
            None => {
                out.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    ENTITIES
        .iter()
        .find_map(|(entity, ch)| (*entity == name).then_some(*ch))
}

/// An element with everything the locator and node listing need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ElementEntry {
    pub(crate) path: stitch_syntax::NodePath,
    pub(crate) depth: usize,
    pub(crate) name: String,
    pub(crate) stable_id: Option<String>,
    pub(crate) class_value: Option<String>,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) text: String,
    pub(crate) child_count: usize,
    pub(crate) span: Option<Span>,
}

impl ElementEntry {
    fn from_ref(found: &NodeRef<'_>, config: &EngineConfig) -> Option<Self> {
        let node = found.node;
        let name = element_name(node)?;
        let attributes = opening(node)
            .map(|open| {
                attributes(open)
                    .filter_map(|(_, attribute)| {
                        Some((attribute_name(attribute)?, read_attribute(attribute).display()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        let stable_id =
            attribute_of(node, &config.stable_id_attribute).and_then(AttrValue::into_static);
        Some(Self {
            path: found.path.clone(),
            depth: found.depth,
            name,
            stable_id,
            class_value: class_value(node, config),
            attributes,
            text: direct_text(node),
            child_count: content(node)
                .iter()
                .filter(|child| child.kind() != &NodeKind::Comment)
                .count(),
            span: node.span(),
        })
    }
}

/// Every named element of `tree`, in document order.
pub(crate) fn index_elements(tree: &SourceTree, config: &EngineConfig) -> Vec<ElementEntry> {
    let limits: TraversalLimits = config.limits();
    collect(tree.root(), limits, is_named_element)
        .iter()
        .filter_map(|found| ElementEntry::from_ref(found, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stitch_syntax::{SupportedLanguage, parse_source};

    fn entries(source: &str) -> Vec<ElementEntry> {
        let tree = parse_source(source, SupportedLanguage::Tsx).expect("parse");
        index_elements(&tree, &EngineConfig::default())
    }

    #[rstest]
    #[case("Tom &amp; Jerry", "Tom & Jerry")]
    #[case("&lt;b&gt;", "<b>")]
    #[case("&#65;&#x42;", "AB")]
    #[case("a & b", "a & b")]
    #[case("&unknown;", "&unknown;")]
    fn decodes_character_references(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(decode_entities(raw), expected);
    }

    #[test]
    fn indexes_named_elements_in_document_order() {
        let found = entries(
            "const A = () => (\n  <>\n    <ul className=\"list\">\n      <li data-stitch-id=\"row\">One</li>\n      <li hidden>Two &amp; {\"three\"}</li>\n    </ul>\n  </>\n);\n",
        );
        let names: Vec<_> = found.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["ul", "li", "li"]);
        let list = found.first().expect("ul");
        assert_eq!(list.class_value.as_deref(), Some("list"));
        assert_eq!(list.child_count, 2);
        let second = found.get(2).expect("li");
        assert_eq!(second.text, "Two & three");
        assert_eq!(second.attributes.get("hidden").map(String::as_str), Some("true"));
        assert_eq!(found.get(1).and_then(|e| e.stable_id.as_deref()), Some("row"));
    }

    #[test]
    fn dynamic_children_separate_text() {
        let found = entries("const a = <p>Hello {name}, welcome</p>;");
        assert_eq!(found.first().map(|e| e.text.as_str()), Some("Hello , welcome"));
    }

    #[test]
    fn dynamic_class_names_are_not_static() {
        let found = entries("const a = <p className={styles.box}>x</p>;");
        let entry = found.first().expect("p");
        assert_eq!(entry.class_value, None);
        assert_eq!(
            entry.attributes.get("className").map(String::as_str),
            Some("{styles.box}")
        );
    }
}
