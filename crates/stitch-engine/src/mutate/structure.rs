//! Structural edits: remove, insert, replace, wrap and unwrap.
//!
//! Every edit resolves its position from the target's path. Siblings can
//! only be added or removed inside an element or fragment; the element that
//! forms a whole markup expression (`return (<div>...</div>)`) has no
//! markup parent and can only be replaced, wrapped or unwrapped in place.

use std::collections::BTreeMap;

use stitch_syntax::{
    Node, NodeKind, NodePath, SourceTree, is_blank_text, jsx_attribute, jsx_attribute_value,
    jsx_element_from_self_closing, jsx_text, jsx_wrapper_element, parse_markup_snippet,
    parse_single_element,
};
use tracing::debug;

use super::attribute::is_attribute_name;
use super::{element_at, in_place_of};
use crate::element::{content, content_range, element_name, holds_content};
use crate::error::EngineError;
use crate::request::{ChangeRecord, InsertPosition};

const STRUCTURE_TARGET: &str = "stitch_engine::mutate::structure";

/// The parent path and child index of `path`, when the parent holds markup
/// content.
fn markup_slot(tree: &SourceTree, path: &NodePath) -> Option<(NodePath, usize)> {
    let parent = path.parent()?;
    let index = path.last()?;
    tree.get(&parent)
        .filter(|node| holds_content(node))
        .map(|_| (parent, index))
}

fn require_markup_slot(
    tree: &SourceTree,
    path: &NodePath,
    action: &str,
) -> Result<(NodePath, usize), EngineError> {
    markup_slot(tree, path).ok_or_else(|| {
        EngineError::invalid_operation(format!(
            "cannot {action} {path}: it is not inside an element or fragment"
        ))
    })
}

/// Drops whitespace-only text at both ends.
fn trim_blank(mut nodes: Vec<Node>) -> Vec<Node> {
    while nodes.last().is_some_and(is_blank_text) {
        nodes.pop();
    }
    let start = nodes
        .iter()
        .position(|node| !is_blank_text(node))
        .unwrap_or(nodes.len());
    nodes.split_off(start)
}

/// Strips the outer whitespace of text at both ends of promoted content.
///
/// Markup text keeps its line breaks and indentation, and the parent's text
/// around the slot already lays out whatever is spliced in.
fn trim_edge_text(mut nodes: Vec<Node>) -> Vec<Node> {
    let retext = |node: &mut Node, trim: fn(&str) -> &str| {
        if node.kind() == &NodeKind::JsxText {
            let text = trim(node.text().unwrap_or_default()).to_owned();
            let trimmed = jsx_text(&text).with_leading(node.leading().to_owned());
            *node = trimmed;
        }
    };
    if let Some(first) = nodes.first_mut() {
        retext(first, str::trim_start);
    }
    if let Some(last) = nodes.last_mut() {
        retext(last, str::trim_end);
    }
    nodes
}

/// Removes the element.
///
/// # Errors
///
/// Returns [`EngineError::InvalidOperation`] when the element has no markup
/// parent.
pub(crate) fn remove(
    tree: &mut SourceTree,
    path: &NodePath,
) -> Result<Vec<ChangeRecord>, EngineError> {
    element_at(tree, path)?;
    require_markup_slot(tree, path, "remove")?;
    let removed = tree.remove(path)?;
    debug!(target: STRUCTURE_TARGET, %path, "element removed");
    Ok(vec![ChangeRecord::remove(
        path.to_string(),
        removed.source_text(),
    )])
}

/// Inserts the markup in `snippet` relative to the element.
///
/// Inserted siblings take the element's leading whitespace, and inserted
/// children the whitespace of the neighbouring child, so the new markup
/// lines up with its surroundings.
///
/// # Errors
///
/// Returns [`EngineError::InvalidOperation`] for invalid markup and for
/// sibling inserts next to an element without a markup parent.
pub(crate) fn insert(
    tree: &mut SourceTree,
    path: &NodePath,
    snippet: &str,
    position: InsertPosition,
) -> Result<Vec<ChangeRecord>, EngineError> {
    let target = element_at(tree, path)?;
    let mut nodes = trim_blank(parse_markup_snippet(snippet)?);
    let (parent, index, leading) = match position {
        InsertPosition::Before | InsertPosition::After => {
            let leading = target.leading().to_owned();
            let (parent, slot) = require_markup_slot(tree, path, "insert next to")?;
            let index = if position == InsertPosition::After {
                slot.saturating_add(1)
            } else {
                slot
            };
            (parent, index, leading)
        }
        InsertPosition::FirstChild | InsertPosition::LastChild => {
            if target.kind() == &NodeKind::JsxSelfClosingElement {
                let pair = jsx_element_from_self_closing(target.clone(), Vec::new());
                tree.replace(path, pair)?;
            }
            let promoted = element_at(tree, path)?;
            let range = content_range(promoted)
                .ok_or_else(|| EngineError::internal(format!("{path} has no content range")))?;
            let children = content(promoted);
            let (index, neighbour) = if position == InsertPosition::FirstChild {
                (range.start, children.first())
            } else {
                (range.end, children.last())
            };
            let leading = neighbour
                .map(|child| child.leading().to_owned())
                .unwrap_or_default();
            (path.clone(), index, leading)
        }
    };
    if let Some(first) = nodes.first_mut() {
        first.set_leading(leading);
    }

    let mut changes = Vec::new();
    for (offset, node) in nodes.into_iter().enumerate() {
        let at = index.saturating_add(offset);
        if !is_blank_text(&node) {
            changes.push(ChangeRecord::add(
                parent.child(at).to_string(),
                node.source_text(),
            ));
        }
        tree.insert(&parent, at, node)?;
    }
    debug!(
        target: STRUCTURE_TARGET,
        %path,
        %position,
        inserted = changes.len(),
        "markup inserted"
    );
    Ok(changes)
}

/// Replaces the element with the single element in `markup`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidOperation`] unless `markup` holds exactly
/// one element.
pub(crate) fn replace(
    tree: &mut SourceTree,
    path: &NodePath,
    markup: &str,
) -> Result<Vec<ChangeRecord>, EngineError> {
    let target = element_at(tree, path)?;
    let replacement = in_place_of(parse_single_element(markup)?, target);
    let new_text = replacement.source_text();
    let previous = tree.replace(path, replacement)?;
    Ok(vec![ChangeRecord::modify(
        path.to_string(),
        previous.source_text(),
        new_text,
    )])
}

/// Wraps the element in a new `element` carrying `attributes`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidOperation`] for an invalid element or
/// attribute name.
pub(crate) fn wrap(
    tree: &mut SourceTree,
    path: &NodePath,
    element: &str,
    attributes: &BTreeMap<String, String>,
) -> Result<Vec<ChangeRecord>, EngineError> {
    if !is_element_name(element) {
        return Err(EngineError::invalid_operation(format!(
            "'{element}' is not an element name"
        )));
    }
    let built = attributes
        .iter()
        .map(|(name, value)| {
            if is_attribute_name(name) {
                Ok(jsx_attribute(name, Some(jsx_attribute_value(value))))
            } else {
                Err(EngineError::invalid_operation(format!(
                    "'{name}' is not an attribute name"
                )))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    let target = element_at(tree, path)?;
    let wrapper = in_place_of(
        jsx_wrapper_element(element, built, vec![target.clone().with_leading("")]),
        target,
    );
    let new_text = wrapper.source_text();
    let previous = tree.replace(path, wrapper)?;
    Ok(vec![ChangeRecord::modify(
        path.to_string(),
        previous.source_text(),
        new_text,
    )])
}

/// Replaces the element with its content.
///
/// Inside another element the content is spliced into the parent. Without a
/// markup parent the element must hold exactly one element, which takes its
/// place.
///
/// # Errors
///
/// Returns [`EngineError::InvalidOperation`] for self-closing elements and
/// for elements without a markup parent whose content is not a single
/// element.
pub(crate) fn unwrap(
    tree: &mut SourceTree,
    path: &NodePath,
) -> Result<Vec<ChangeRecord>, EngineError> {
    let target = element_at(tree, path)?;
    let name = element_name(target).unwrap_or_default();
    if target.kind() == &NodeKind::JsxSelfClosingElement {
        return Err(EngineError::invalid_operation(format!(
            "<{name} /> has no children to unwrap"
        )));
    }
    let leading = target.leading().to_owned();
    let inner = trim_blank(
        content(target)
            .iter()
            .filter(|child| child.kind() != &NodeKind::Comment)
            .cloned()
            .collect(),
    );
    let old_text = target.source_text();

    if let Some((parent, index)) = markup_slot(tree, path) {
        tree.remove(path)?;
        let mut promoted = trim_edge_text(inner);
        if let Some(first) = promoted.first_mut() {
            first.set_leading(leading);
        }
        let mut new_text = String::new();
        for (offset, node) in promoted.into_iter().enumerate() {
            node.write_to(&mut new_text);
            tree.insert(&parent, index.saturating_add(offset), node)?;
        }
        return Ok(vec![ChangeRecord::modify(
            path.to_string(),
            old_text,
            new_text.trim_start(),
        )]);
    }

    let mut elements = inner.iter().filter(|node| node.kind().is_element());
    let only = match (elements.next(), elements.next()) {
        (Some(only), None) if inner.len() == 1 => only.clone(),
        _ => {
            return Err(EngineError::invalid_operation(format!(
                "<{name}> must hold exactly one element to be unwrapped in place"
            )));
        }
    };
    let current = element_at(tree, path)?;
    let replacement = in_place_of(only, current);
    let new_text = replacement.source_text();
    tree.replace(path, replacement)?;
    Ok(vec![ChangeRecord::modify(path.to_string(), old_text, new_text)])
}

/// Element names: identifiers, dotted member names and namespaced names.
fn is_element_name(name: &str) -> bool {
    !name.is_empty()
        && name.split(['.', ':']).all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '$' | '-'))
        })
}
