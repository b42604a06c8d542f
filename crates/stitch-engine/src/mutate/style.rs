//! Class list and inline style edits.
//!
//! Classes go through the conflict-aware merger, so adding `p-8` to an
//! element with `p-4` replaces it. Inline style is always written back as an
//! object literal (`style={{ color: "red" }}`); string styles are converted
//! on first edit.

use stitch_style::{
    ClassList, map_property, merge, parse_inline_style, remove, to_camel_case, to_kebab_case,
};
use stitch_syntax::{
    Node, NodeKind, NodePath, SourceTree, js_string_literal, jsx_attribute, jsx_expression,
    object_literal, static_string_value,
};
use tracing::debug;

use super::{
    attribute_insert_index, attribute_path, element_at, element_at_mut, in_place_of,
    set_attribute,
};
use crate::config::EngineConfig;
use crate::element::{
    AttrValue, attribute_value_node, find_attribute, opening, opening_mut, read_attribute,
};
use crate::error::EngineError;
use crate::request::{AttributeValue, ChangeRecord, StyleOp};

const STYLE_TARGET: &str = "stitch_engine::mutate::style";

const STYLE_ATTRIBUTE: &str = "style";

/// A value in an inline style object.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StyleValue {
    /// A string value, written as a string literal.
    Text(String),
    /// A numeric literal kept as written.
    Number(String),
}

impl StyleValue {
    fn as_str(&self) -> &str {
        match self {
            Self::Text(value) | Self::Number(value) => value,
        }
    }

    fn to_node(&self) -> Node {
        match self {
            Self::Text(value) => js_string_literal(value, None),
            Self::Number(value) => Node::leaf(NodeKind::Other("number".to_owned()), value.as_str()),
        }
    }
}

/// Inline style entries keyed by kebab-case property, in source order.
type StyleEntries = Vec<(String, StyleValue)>;

/// Applies a style operation.
///
/// Class changes happen first: `className` replaces the list, then
/// `removeClasses` and `addClasses` apply. Style properties a utility class
/// can express become classes when configured and the class list is static;
/// the rest update the inline style object. Unchanged attributes are left
/// byte-identical.
///
/// # Errors
///
/// Returns [`EngineError::NotEditable`] when the class list or inline style
/// that must change is an expression the engine cannot read.
pub(crate) fn apply_style(
    tree: &mut SourceTree,
    path: &NodePath,
    op: &StyleOp,
    config: &EngineConfig,
) -> Result<Vec<ChangeRecord>, EngineError> {
    let element = element_at(tree, path)?;
    let open = opening(element)
        .ok_or_else(|| EngineError::invalid_operation(format!("{path} is not an element")))?;

    // A computed class list cannot take utility classes, so mapped
    // properties stay inline there.
    let computed_classes = current_classes(open, config).is_err();
    let prefer_classes = config.prefer_utility_classes && !computed_classes;
    if computed_classes && config.prefer_utility_classes && !op.style.is_empty() {
        debug!(target: STYLE_TARGET, %path, "class list is computed; styles stay inline");
    }

    let mut utility = Vec::new();
    let mut updates: Vec<(String, Option<String>)> = Vec::new();
    for (key, value) in &op.style {
        let property = to_kebab_case(key.trim());
        let value = value.trim();
        if value.is_empty() {
            updates.push((property, None));
            continue;
        }
        match map_property(&property, value).filter(|_| prefer_classes) {
            Some(class) => {
                debug!(target: STYLE_TARGET, %property, %class, "style expressed as class");
                utility.push(class);
                updates.push((property, None));
            }
            None => updates.push((property, Some(value.to_owned()))),
        }
    }

    let touches_classes = op.class_name.is_some()
        || !op.add_classes.is_empty()
        || !op.remove_classes.is_empty()
        || !utility.is_empty();
    let class_edit = if touches_classes {
        let (name, current) = current_classes(open, config)?;
        let base = ClassList::parse(op.class_name.as_deref().unwrap_or(&current));
        let dropped = remove(&base, &split_all(&op.remove_classes));
        let incoming: ClassList = split_all(&op.add_classes)
            .into_vec()
            .into_iter()
            .chain(utility)
            .collect();
        let merged = merge(&dropped, &incoming).to_string();
        (merged != current).then_some((name, merged))
    } else {
        None
    };

    let style_edit = if updates.is_empty() {
        None
    } else {
        let before = current_style(open)?;
        let mut after = before.clone();
        for (property, value) in updates {
            let slot = after.iter().position(|(name, _)| *name == property);
            match (slot, value) {
                (Some(index), Some(value)) => {
                    if let Some(entry) = after.get_mut(index) {
                        entry.1 = StyleValue::Text(value);
                    }
                }
                (None, Some(value)) => after.push((property, StyleValue::Text(value))),
                (Some(index), None) => {
                    after.remove(index);
                }
                (None, None) => {}
            }
        }
        (after != before).then_some((before, after))
    };

    let mut changes = Vec::new();
    if let Some((name, merged)) = class_edit {
        let value = (!merged.is_empty()).then_some(AttributeValue::Text(merged));
        changes.extend(set_attribute(tree, path, &name, value.as_ref(), config)?);
    }
    if let Some((before, after)) = style_edit {
        changes.push(write_style(tree, path, &before, &after)?);
    }
    Ok(changes)
}

/// The class attribute to edit and its current static value.
fn current_classes(open: &Node, config: &EngineConfig) -> Result<(String, String), EngineError> {
    let found = config.class_attributes.iter().find_map(|name| {
        find_attribute(open, name).map(|(_, attribute)| (name.clone(), read_attribute(attribute)))
    });
    match found {
        None => Ok((config.primary_class_attribute().to_owned(), String::new())),
        Some((name, AttrValue::Present)) => Ok((name, String::new())),
        Some((name, AttrValue::Static(value))) => Ok((name, value)),
        Some((name, AttrValue::Dynamic(source))) => Err(EngineError::not_editable(format!(
            "{name} is computed by {source}"
        ))),
    }
}

fn split_all(classes: &[String]) -> ClassList {
    classes
        .iter()
        .flat_map(|class| class.split_whitespace())
        .collect()
}

/// Reads the inline style of an opening node.
fn current_style(open: &Node) -> Result<StyleEntries, EngineError> {
    let Some((_, attribute)) = find_attribute(open, STYLE_ATTRIBUTE) else {
        return Ok(Vec::new());
    };
    match read_attribute(attribute) {
        AttrValue::Present => Ok(Vec::new()),
        AttrValue::Static(text) => parse_css(&text),
        AttrValue::Dynamic(_) => attribute_value_node(attribute)
            .and_then(single_object)
            .map_or_else(|| Err(dynamic_style(attribute)), read_object),
    }
}

/// The object literal held by `{{ ... }}`.
fn single_object(container: &Node) -> Option<&Node> {
    let mut inner = container.named_children();
    match (inner.next(), inner.next()) {
        (Some(object), None) if object.kind() == &NodeKind::Object => Some(object),
        _ => None,
    }
}

fn parse_css(text: &str) -> Result<StyleEntries, EngineError> {
    let declarations = parse_inline_style(text)
        .map_err(|err| EngineError::not_editable(format!("inline style: {err}")))?;
    Ok(declarations
        .into_iter()
        .map(|declaration| (declaration.property, StyleValue::Text(declaration.value)))
        .collect())
}

fn read_object(object: &Node) -> Result<StyleEntries, EngineError> {
    object
        .named_children()
        .map(|entry| {
            let key = entry
                .child_by_field("key")
                .filter(|_| entry.kind() == &NodeKind::Pair)
                .and_then(|key| match key.kind() {
                    NodeKind::PropertyIdentifier => key.text().map(str::to_owned),
                    _ => static_string_value(key),
                })
                .ok_or_else(|| dynamic_style(entry))?;
            let value = entry.child_by_field("value").ok_or_else(|| dynamic_style(entry))?;
            let read = match (static_string_value(value), value.kind()) {
                (Some(text), _) => StyleValue::Text(text),
                (None, NodeKind::Other(kind)) if kind == "number" => {
                    StyleValue::Number(value.source_text())
                }
                _ => return Err(dynamic_style(entry)),
            };
            Ok((to_kebab_case(&key), read))
        })
        .collect()
}

fn dynamic_style(node: &Node) -> EngineError {
    EngineError::not_editable(format!(
        "inline style '{}' is not a literal",
        node.source_text()
    ))
}

fn render_css(entries: &StyleEntries) -> String {
    entries
        .iter()
        .map(|(property, value)| format!("{property}: {}", value.as_str()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Writes `after` as the element's style object, or removes the attribute
/// when it is empty.
fn write_style(
    tree: &mut SourceTree,
    path: &NodePath,
    before: &StyleEntries,
    after: &StyleEntries,
) -> Result<ChangeRecord, EngineError> {
    let element = element_at_mut(tree, path)?;
    let open = opening_mut(element)
        .ok_or_else(|| EngineError::invalid_operation(format!("{path} is not an element")))?;
    let existing = find_attribute(open, STYLE_ATTRIBUTE).map(|(index, node)| (index, node.clone()));
    let change_path = attribute_path(path, STYLE_ATTRIBUTE);
    let rendered = render_css(after);

    if after.is_empty() {
        if let Some((index, _)) = existing {
            open.children_mut().remove(index);
        }
        return Ok(ChangeRecord::remove(change_path, render_css(before)));
    }
    let object = object_literal(
        after
            .iter()
            .map(|(property, value)| (to_camel_case(property), value.to_node()))
            .collect(),
    );
    let attribute = jsx_attribute(STYLE_ATTRIBUTE, Some(jsx_expression(object)));
    match existing {
        Some((index, previous)) => {
            let slot = open
                .children_mut()
                .get_mut(index)
                .ok_or_else(|| EngineError::internal(format!("attribute {change_path} moved")))?;
            *slot = in_place_of(attribute, &previous);
            Ok(ChangeRecord::modify(change_path, render_css(before), rendered))
        }
        None => {
            let index = attribute_insert_index(open);
            open.children_mut().insert(index, attribute);
            Ok(ChangeRecord::add(change_path, rendered))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use rstest::rstest;
    use stitch_syntax::{SupportedLanguage, TraversalLimits, find, parse_source};

    use crate::error::ErrorKind;

    fn run(markup: &str, op: &StyleOp, config: &EngineConfig) -> Result<String, EngineError> {
        let source = format!("const e = {markup};");
        let mut tree = parse_source(&source, SupportedLanguage::Tsx).expect("parse");
        let path = find(tree.root(), TraversalLimits::default(), |node| {
            node.kind().is_element()
        })
        .map(|found| found.path)
        .expect("element");
        apply_style(&mut tree, &path, op, config)?;
        let output = tree.to_source();
        Ok(output
            .strip_prefix("const e = ")
            .and_then(|rest| rest.strip_suffix(';'))
            .unwrap_or(&output)
            .to_owned())
    }

    fn classes(add: &[&str], remove: &[&str]) -> StyleOp {
        StyleOp {
            add_classes: add.iter().map(|class| (*class).to_owned()).collect(),
            remove_classes: remove.iter().map(|class| (*class).to_owned()).collect(),
            ..StyleOp::default()
        }
    }

    fn styles(entries: &[(&str, &str)]) -> StyleOp {
        StyleOp {
            style: entries
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect::<BTreeMap<_, _>>(),
            ..StyleOp::default()
        }
    }

    #[rstest]
    #[case("<p className=\"p-4 text-sm\">x</p>", classes(&["p-8"], &[]), "<p className=\"text-sm p-8\">x</p>")]
    #[case("<p className=\"p-4 text-sm\">x</p>", classes(&[], &["text-sm"]), "<p className=\"p-4\">x</p>")]
    #[case("<p className=\"p-4\">x</p>", classes(&[], &["p-4"]), "<p>x</p>")]
    #[case("<p>x</p>", classes(&["flex gap-2"], &[]), "<p className=\"flex gap-2\">x</p>")]
    #[case("<p class=\"a\">x</p>", classes(&["b"], &[]), "<p class=\"a b\">x</p>")]
    #[case("<p className=\"p-4\">x</p>", classes(&["p-4"], &[]), "<p className=\"p-4\">x</p>")]
    fn edits_class_lists(#[case] markup: &str, #[case] op: StyleOp, #[case] expected: &str) {
        assert_eq!(run(markup, &op, &EngineConfig::default()).expect("edit"), expected);
    }

    #[test]
    fn class_name_replaces_before_add_and_remove() {
        let op = StyleOp {
            class_name: Some("card p-2".to_owned()),
            add_classes: vec!["p-6".to_owned()],
            ..StyleOp::default()
        };
        assert_eq!(
            run("<div className=\"old\">x</div>", &op, &EngineConfig::default()).expect("edit"),
            "<div className=\"card p-6\">x</div>"
        );
    }

    #[test]
    fn adding_twice_is_idempotent() {
        let op = classes(&["rounded-lg"], &[]);
        let config = EngineConfig::default();
        let once = run("<p className=\"rounded\">x</p>", &op, &config).expect("once");
        let twice = run(&once, &op, &config).expect("twice");
        assert_eq!(once, twice);
    }

    #[test]
    fn mapped_styles_become_classes() {
        let op = styles(&[("padding", "1rem"), ("mask-image", "none")]);
        assert_eq!(
            run("<p className=\"p-2\">x</p>", &op, &EngineConfig::default()).expect("edit"),
            "<p className=\"p-4\" style={{ maskImage: \"none\" }}>x</p>"
        );
    }

    #[test]
    fn inline_styles_are_kept_when_classes_are_not_preferred() {
        let mut config = EngineConfig::default();
        config.prefer_utility_classes = false;
        let op = styles(&[("fontSize", "14px"), ("color", "")]);
        assert_eq!(
            run("<p style=\"color: red; margin: 0\">x</p>", &op, &config).expect("edit"),
            "<p style={{ margin: \"0\", fontSize: \"14px\" }}>x</p>"
        );
    }

    #[test]
    fn object_styles_keep_numbers() {
        let mut config = EngineConfig::default();
        config.prefer_utility_classes = false;
        let op = styles(&[("opacity", "")]);
        assert_eq!(
            run("<p style={{ zIndex: 10, opacity: 0.5 }}>x</p>", &op, &config).expect("edit"),
            "<p style={{ zIndex: 10 }}>x</p>"
        );
    }

    #[test]
    fn emptied_styles_remove_the_attribute() {
        let op = styles(&[("color", "")]);
        assert_eq!(
            run("<p style={{ color: \"red\" }}>x</p>", &op, &EngineConfig::default())
                .expect("edit"),
            "<p>x</p>"
        );
    }

    #[rstest]
    #[case("<p className={cls}>x</p>", classes(&["p-4"], &[]))]
    #[case("<p style={theme.box}>x</p>", styles(&[("color", "#123456")]))]
    #[case("<p style={{ ...base }}>x</p>", styles(&[("cursor", "pointer")]))]
    fn expressions_are_not_editable(#[case] markup: &str, #[case] op: StyleOp) {
        let err = run(markup, &op, &EngineConfig::default()).expect_err("not editable");
        assert_eq!(err.kind(), ErrorKind::NotEditable);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn dynamic_classes_do_not_block_style_edits(#[case] prefer_utility_classes: bool) {
        let mut config = EngineConfig::default();
        config.prefer_utility_classes = prefer_utility_classes;
        assert_eq!(
            run("<p className={cls}>x</p>", &styles(&[("color", "red")]), &config)
                .expect("edit"),
            "<p className={cls} style={{ color: \"red\" }}>x</p>"
        );
    }
}
