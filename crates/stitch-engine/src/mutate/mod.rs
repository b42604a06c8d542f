//! Mutators: one edit operation applied to a located element.
//!
//! Mutators work on the engine's private copy of the cached tree and address
//! their target by the path the locator returned. On error the copy is
//! discarded, so a failed mutation never leaks into the cache or the result.

mod attribute;
mod structure;
mod style;
mod text;

use stitch_syntax::{Node, NodeKind, NodePath, SourceTree};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::request::{ChangeRecord, Operation};

pub(crate) use attribute::set_attribute;
pub(crate) use structure::{insert, remove, replace, unwrap, wrap};
pub(crate) use style::apply_style;
pub(crate) use text::set_text;

/// Applies `operation` to the element at `path`.
///
/// # Errors
///
/// Returns the mutator's error; `tree` may be partially edited afterwards
/// and must then be dropped.
pub(crate) fn apply(
    tree: &mut SourceTree,
    path: &NodePath,
    operation: &Operation,
    config: &EngineConfig,
) -> Result<Vec<ChangeRecord>, EngineError> {
    match operation {
        Operation::Text { text } => set_text(tree, path, text),
        Operation::Style(style) => apply_style(tree, path, style, config),
        Operation::Attribute { name, value } => {
            set_attribute(tree, path, name, value.as_ref(), config)
        }
        Operation::Remove => remove(tree, path),
        Operation::Insert {
            markup_snippet,
            position,
        } => insert(tree, path, markup_snippet, *position),
        Operation::Replace { markup } => replace(tree, path, markup),
        Operation::Wrap {
            element,
            attributes,
        } => wrap(tree, path, element, attributes),
        Operation::Unwrap => unwrap(tree, path),
    }
}

/// The element at `path`.
fn element_at<'t>(tree: &'t SourceTree, path: &NodePath) -> Result<&'t Node, EngineError> {
    tree.get(path)
        .filter(|node| node.kind().is_element())
        .ok_or_else(|| EngineError::node_not_found(format!("no element at {path}")))
}

/// The element at `path`, mutably.
fn element_at_mut<'t>(
    tree: &'t mut SourceTree,
    path: &NodePath,
) -> Result<&'t mut Node, EngineError> {
    tree.get_mut(path)
        .filter(|node| node.kind().is_element())
        .ok_or_else(|| EngineError::node_not_found(format!("no element at {path}")))
}

/// Gives `node` the trivia and grammar field of the node it replaces.
fn in_place_of(node: Node, previous: &Node) -> Node {
    let placed = node.with_leading(previous.leading());
    match previous.field() {
        Some(field) => placed.with_field(field),
        None => placed,
    }
}

/// Child index at which a new attribute is appended: after the element
/// name and the last existing attribute.
fn attribute_insert_index(opening: &Node) -> usize {
    opening
        .children()
        .iter()
        .rposition(|child| child.kind() != &NodeKind::Token && child.kind() != &NodeKind::Comment)
        .map_or(opening.children().len(), |index| index.saturating_add(1))
}

/// Renders `path` with an attribute suffix, as used in change records.
fn attribute_path(path: &NodePath, name: &str) -> String {
    format!("{path}@{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stitch_syntax::{
        SupportedLanguage, TraversalLimits, find, jsx_attribute, jsx_attribute_value, parse_source,
    };

    #[rstest]
    #[case("const a = <img src=\"x\" />;", "<img src=\"x\" alt=\"\" />")]
    #[case("const a = <p>Hi</p>;", "<p alt=\"\">Hi</p>")]
    fn attributes_are_appended_after_the_last_one(#[case] source: &str, #[case] expected: &str) {
        let mut tree = parse_source(source, SupportedLanguage::Tsx).expect("parse");
        let path = find(tree.root(), TraversalLimits::default(), |node| {
            node.kind().is_opening()
        })
        .map(|found| found.path)
        .expect("opening");
        let opening = tree.get_mut(&path).expect("opening");
        let index = attribute_insert_index(opening);
        opening.children_mut().insert(
            index,
            jsx_attribute("alt", Some(jsx_attribute_value(""))),
        );
        assert!(tree.to_source().contains(expected));
    }
}
