//! Text replacement.

use stitch_syntax::{
    Node, NodeKind, NodePath, SourceTree, js_string_literal, jsx_element_from_self_closing,
    jsx_expression, jsx_text,
};

use super::{element_at, element_at_mut};
use crate::element::{content, content_range, direct_text, element_name, expression_string};
use crate::error::EngineError;
use crate::request::ChangeRecord;

/// Replaces the element's content with `text`.
///
/// Comment-only expression containers are kept after the new text.
///
/// # Errors
///
/// Returns [`EngineError::NotEditable`] when the element holds nested
/// elements or expressions other than string literals.
pub(crate) fn set_text(
    tree: &mut SourceTree,
    path: &NodePath,
    text: &str,
) -> Result<Vec<ChangeRecord>, EngineError> {
    let element = element_at(tree, path)?;
    let name = element_name(element).unwrap_or_default();
    let mut comments = Vec::new();
    for child in content(element) {
        match child.kind() {
            NodeKind::JsxText | NodeKind::HtmlCharacterReference | NodeKind::Comment => {}
            NodeKind::JsxExpression if is_comment_only(child) => comments.push(child.clone()),
            NodeKind::JsxExpression if expression_string(child).is_some() => {}
            kind if kind.is_element() => {
                return Err(EngineError::not_editable(format!(
                    "<{name}> contains nested elements"
                )));
            }
            _ => {
                return Err(EngineError::not_editable(format!(
                    "<{name}> renders '{}', which is not a literal",
                    child.source_text()
                )));
            }
        }
    }
    let old_text = direct_text(element);
    let leading = content(element)
        .first()
        .map(|child| child.leading().to_owned())
        .unwrap_or_default();
    let edges = edge_whitespace(content(element));
    let mut replacement = text_nodes(text, &leading, &edges);
    replacement.extend(comments);

    if element.kind() == &NodeKind::JsxSelfClosingElement {
        if !replacement.is_empty() {
            let promoted = jsx_element_from_self_closing(element.clone(), replacement);
            tree.replace(path, promoted)?;
        }
    } else {
        let range = content_range(element)
            .ok_or_else(|| EngineError::internal(format!("<{name}> has no closing tag")))?;
        let children = element_at_mut(tree, path)?.children_mut();
        drop(children.splice(range, replacement));
    }
    Ok(vec![ChangeRecord::modify(path.to_string(), old_text, text)])
}

/// The nodes that render `text`, or nothing for empty text.
///
/// Markup text cannot hold braces or angle brackets, decodes `&` references,
/// collapses line breaks and loses edge whitespace, so such text is written
/// as a string literal in an expression container. The old content's edge
/// whitespace is kept around the new value either way.
fn text_nodes(text: &str, leading: &str, edges: &(String, String)) -> Vec<Node> {
    if text.is_empty() {
        return Vec::new();
    }
    let (before, after) = edges;
    let needs_literal = text
        .chars()
        .any(|ch| matches!(ch, '{' | '}' | '<' | '>' | '&' | '\n' | '\r'))
        || text.trim() != text;
    if !needs_literal {
        return vec![jsx_text(&format!("{before}{text}{after}")).with_leading(leading)];
    }
    let literal = jsx_expression(js_string_literal(text, None));
    let mut nodes = vec![literal.with_leading(format!("{leading}{before}"))];
    if !after.is_empty() {
        nodes.push(jsx_text(after));
    }
    nodes
}

/// Whitespace the old markup text started and ended with.
///
/// Markup text leaves hold their surrounding line breaks and indentation,
/// so these come from the first and last text children. A single blank
/// leaf only contributes once.
fn edge_whitespace(children: &[Node]) -> (String, String) {
    let is_text = |child: &&Node| child.kind() == &NodeKind::JsxText;
    let first = children.first().filter(is_text);
    let last = children.iter().rev().find(is_text);
    let before = first
        .and_then(Node::text)
        .map_or("", |value| value.strip_suffix(value.trim_start()).unwrap_or_default());
    let single_blank = |first: &Node, last: &Node| {
        std::ptr::eq(first, last) && first.text().is_some_and(|value| value.trim().is_empty())
    };
    let after = match (first, last) {
        (Some(first), Some(last)) if single_blank(first, last) => "",
        (_, Some(last)) => last
            .text()
            .map_or("", |value| value.strip_prefix(value.trim_end()).unwrap_or_default()),
        _ => "",
    };
    (before.to_owned(), after.to_owned())
}

fn is_comment_only(container: &Node) -> bool {
    container.named_children().next().is_none()
        && container
            .children()
            .iter()
            .any(|child| child.kind() == &NodeKind::Comment)
}
