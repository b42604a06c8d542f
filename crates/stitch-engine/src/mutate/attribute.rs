//! Single-attribute edits.

use stitch_syntax::{NodePath, SourceTree, jsx_attribute, jsx_attribute_value};

use super::{attribute_insert_index, attribute_path, element_at_mut, in_place_of};
use crate::config::EngineConfig;
use crate::element::{find_attribute, opening_mut, read_attribute};
use crate::error::EngineError;
use crate::request::{AttributeValue, ChangeRecord};

/// Sets, adds or removes attribute `name`.
///
/// `None` and `Flag(false)` remove the attribute; `Flag(true)` writes it
/// presence-only. Removing an absent attribute records no change.
///
/// # Errors
///
/// Returns [`EngineError::ProtectedAttribute`] for the stable-id attribute
/// and [`EngineError::InvalidOperation`] for names that are not attribute
/// names.
pub(crate) fn set_attribute(
    tree: &mut SourceTree,
    path: &NodePath,
    name: &str,
    value: Option<&AttributeValue>,
    config: &EngineConfig,
) -> Result<Vec<ChangeRecord>, EngineError> {
    if name == config.stable_id_attribute {
        return Err(EngineError::protected_attribute(name));
    }
    if !is_attribute_name(name) {
        return Err(EngineError::invalid_operation(format!(
            "'{name}' is not an attribute name"
        )));
    }
    let element = element_at_mut(tree, path)?;
    let opening = opening_mut(element)
        .ok_or_else(|| EngineError::invalid_operation(format!("{path} is not an element")))?;
    let existing = find_attribute(opening, name)
        .map(|(index, attribute)| (index, attribute.clone(), read_attribute(attribute)));
    let change_path = attribute_path(path, name);

    let written = match value {
        None | Some(AttributeValue::Flag(false)) => None,
        Some(AttributeValue::Flag(true)) => Some((None, "true".to_owned())),
        Some(AttributeValue::Text(text)) => Some((Some(jsx_attribute_value(text)), text.clone())),
    };
    let insert_at = attribute_insert_index(opening);
    let children = opening.children_mut();
    let change = match (existing, written) {
        (None, None) => return Ok(Vec::new()),
        (Some((index, _, old)), None) => {
            children.remove(index);
            ChangeRecord::remove(change_path, old.display())
        }
        (Some((index, previous, old)), Some((node, shown))) => {
            let attribute = in_place_of(jsx_attribute(name, node), &previous);
            let slot = children
                .get_mut(index)
                .ok_or_else(|| EngineError::internal(format!("attribute {change_path} moved")))?;
            *slot = attribute;
            ChangeRecord::modify(change_path, old.display(), shown)
        }
        (None, Some((node, shown))) => {
            children.insert(insert_at, jsx_attribute(name, node));
            ChangeRecord::add(change_path, shown)
        }
    };
    Ok(vec![change])
}

/// Markup attribute names: letters, digits, `-`, `_`, `.` and one
/// namespace `:`, not starting with a digit or punctuation.
pub(super) fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | ':'))
        && name.matches(':').count() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stitch_syntax::{SupportedLanguage, TraversalLimits, find, parse_source};

    use crate::error::ErrorKind;
    use crate::request::ChangeKind;

    fn edit(
        source: &str,
        name: &str,
        value: Option<AttributeValue>,
    ) -> Result<(String, Vec<ChangeRecord>), EngineError> {
        let mut tree = parse_source(source, SupportedLanguage::Tsx).expect("parse");
        let path = find(tree.root(), TraversalLimits::default(), |node| {
            node.kind().is_element()
        })
        .map(|found| found.path)
        .expect("element");
        let changes = set_attribute(
            &mut tree,
            &path,
            name,
            value.as_ref(),
            &EngineConfig::default(),
        )?;
        Ok((tree.to_source(), changes))
    }

    fn text(value: &str) -> Option<AttributeValue> {
        Some(AttributeValue::Text(value.to_owned()))
    }

    #[rstest]
    #[case("<a href=\"/\">x</a>", "href", text("/home"), "<a href=\"/home\">x</a>")]
    #[case("<a href={url}>x</a>", "href", text("/home"), "<a href=\"/home\">x</a>")]
    #[case("<a>x</a>", "title", text("say \"hi\""), "<a title='say \"hi\"'>x</a>")]
    #[case("<img src=\"a.png\" />", "alt", text("Logo"), "<img src=\"a.png\" alt=\"Logo\" />")]
    #[case("<input />", "disabled", Some(AttributeValue::Flag(true)), "<input disabled />")]
    #[case("<input disabled />", "disabled", Some(AttributeValue::Flag(false)), "<input />")]
    #[case("<input\n  type=\"text\"\n  disabled\n/>", "disabled", None, "<input\n  type=\"text\"\n/>")]
    #[case("<input disabled />", "disabled", text("yes"), "<input disabled=\"yes\" />")]
    #[case("<a>x</a>", "aria-label", None, "<a>x</a>")]
    fn writes_attribute_values(
        #[case] markup: &str,
        #[case] name: &str,
        #[case] value: Option<AttributeValue>,
        #[case] expected: &str,
    ) {
        let (output, _) = edit(&format!("const e = {markup};"), name, value).expect("edit");
        assert_eq!(output, format!("const e = {expected};"));
    }

    #[rstest]
    #[case(text("other"))]
    #[case(None)]
    fn the_stable_id_is_protected(#[case] value: Option<AttributeValue>) {
        let err = edit(
            "const e = <p data-stitch-id=\"a\">x</p>;",
            "data-stitch-id",
            value,
        )
        .expect_err("protected");
        assert_eq!(err.kind(), ErrorKind::ProtectedAttribute);
        assert!(err.to_string().contains("cannot modify"));
    }

    #[rstest]
    #[case("")]
    #[case("on click")]
    #[case("1st")]
    #[case("a=b")]
    fn rejects_malformed_names(#[case] name: &str) {
        let err = edit("const e = <p>x</p>;", name, text("v")).expect_err("invalid");
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn changes_are_addressed_by_attribute() {
        let (_, changes) =
            edit("const e = <p title=\"a\">x</p>;", "title", text("b")).expect("edit");
        let change = changes.first().expect("change");
        assert_eq!(change.kind, ChangeKind::Modify);
        assert!(change.path.ends_with("@title"));
        assert_eq!(change.old_value.as_deref(), Some("a"));
        assert_eq!(change.new_value.as_deref(), Some("b"));
    }
}
