//! Fallback for text edits whose text comes from data rather than markup.
//!
//! Components often render labels from arrays or objects
//! (`const tabs = ["Home", "About"]`). When no element renders the text
//! directly, the string literal holding it is edited instead.

use stitch_syntax::{
    NodeKind, NodePath, SourceTree, VisitorTable, js_string_literal, literal_quote,
    static_string_value, traverse,
};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::element::{decode_entities, normalize_whitespace};
use crate::error::EngineError;
use crate::request::ChangeRecord;

const DATA_SOURCE_TARGET: &str = "stitch_engine::data_source";

/// A string literal matching the text being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LiteralMatch {
    pub(crate) path: NodePath,
    pub(crate) value: String,
    pub(crate) exact_case: bool,
    pub(crate) in_array: bool,
}

/// Finds the best literal whose whole value equals `original`, ignoring
/// case when no exact match exists.
///
/// Module specifiers, object keys and markup attribute values are never
/// candidates.
pub(crate) fn find_literal(
    tree: &SourceTree,
    original: &str,
    config: &EngineConfig,
) -> Option<LiteralMatch> {
    let query = normalize_whitespace(&decode_entities(original));
    if query.is_empty() {
        return None;
    }
    let folded = query.to_lowercase();
    let mut candidates = Vec::new();
    {
        let mut table = VisitorTable::new().on_any(|node, ctx| match node.kind() {
            NodeKind::ImportStatement | NodeKind::JsxAttribute => ctx.skip(),
            NodeKind::StringLiteral | NodeKind::TemplateString => {
                let parent = ctx.parent();
                let is_specifier =
                    parent.is_some_and(|owner| owner.kind() == &NodeKind::ExportStatement);
                if is_specifier || node.field() == Some("key") {
                    return;
                }
                let Some(value) = static_string_value(node) else {
                    return;
                };
                let normalized = normalize_whitespace(&value);
                let exact_case = normalized == query;
                if exact_case || normalized.to_lowercase() == folded {
                    candidates.push(LiteralMatch {
                        path: ctx.path().clone(),
                        value,
                        exact_case,
                        in_array: parent.is_some_and(|owner| owner.kind() == &NodeKind::Array),
                    });
                }
            }
            _ => {}
        });
        traverse(tree.root(), &mut table, config.limits());
    }

    debug!(
        target: DATA_SOURCE_TARGET,
        candidates = candidates.len(),
        "searched string literals"
    );
    let prefer_arrays = config.data_source.prefer_array_literals;
    candidates
        .into_iter()
        .min_by_key(|candidate| (prefer_arrays && !candidate.in_array, !candidate.exact_case))
}

/// Replaces the literal at `found.path` with `replacement`.
///
/// The literal keeps its quote style, trivia and field. A case-insensitive
/// hit re-cases the replacement when configured.
///
/// # Errors
///
/// Returns [`EngineError::Internal`] if the path no longer addresses a
/// literal.
pub(crate) fn apply_literal_edit(
    tree: &mut SourceTree,
    found: &LiteralMatch,
    replacement: &str,
    config: &EngineConfig,
) -> Result<ChangeRecord, EngineError> {
    let current = tree
        .get(&found.path)
        .ok_or_else(|| EngineError::internal(format!("no literal at {}", found.path)))?;
    let new_value = if !found.exact_case && config.data_source.preserve_case {
        recase(replacement, &found.value)
    } else {
        replacement.to_owned()
    };
    let mut literal =
        js_string_literal(&new_value, literal_quote(current)).with_leading(current.leading());
    if let Some(field) = current.field() {
        literal = literal.with_field(field);
    }
    tree.replace(&found.path, literal)?;
    info!(
        target: DATA_SOURCE_TARGET,
        path = %found.path,
        in_array = found.in_array,
        "edited data-source literal"
    );
    Ok(ChangeRecord::modify(
        found.path.to_string(),
        found.value.clone(),
        new_value,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Upper,
    Lower,
    Capitalised,
    Mixed,
}

fn casing_of(text: &str) -> Casing {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    let Some(first) = letters.first() else {
        return Casing::Mixed;
    };
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        Casing::Upper
    } else if letters.iter().all(|c| c.is_lowercase()) {
        Casing::Lower
    } else if first.is_uppercase() {
        Casing::Capitalised
    } else {
        Casing::Mixed
    }
}

/// Applies the casing pattern of `original` to `replacement`.
pub(crate) fn recase(replacement: &str, original: &str) -> String {
    match casing_of(original) {
        Casing::Upper => replacement.to_uppercase(),
        Casing::Lower => replacement.to_lowercase(),
        Casing::Capitalised => {
            let mut chars = replacement.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        }
        Casing::Mixed => replacement.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stitch_syntax::{SupportedLanguage, parse_source};

    fn tree(source: &str) -> SourceTree {
        parse_source(source, SupportedLanguage::Tsx).expect("parse")
    }

    #[rstest]
    #[case("Save", "SAVE", "SAVE")]
    #[case("Save", "save", "save")]
    #[case("save all", "Delete", "Save all")]
    #[case("Save", "iPhone", "Save")]
    #[case("", "x", "")]
    fn recasing_follows_the_original(
        #[case] replacement: &str,
        #[case] original: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(recase(replacement, original), expected);
    }

    #[test]
    fn array_literals_rank_first() {
        let source = concat!(
            "const title = \"Home\";\n",
            "const tabs = [\"home\", \"About\"];\n",
            "export const Nav = () => <nav>{tabs.map((t) => <a key={t}>{t}</a>)}</nav>;\n",
        );
        let parsed = tree(source);
        let config = EngineConfig::default();
        let found = find_literal(&parsed, "Home", &config).expect("literal");
        assert!(found.in_array);
        assert!(!found.exact_case);
        assert_eq!(found.value, "home");

        let mut flat = config.clone();
        flat.data_source.prefer_array_literals = false;
        let exact = find_literal(&parsed, "Home", &flat).expect("literal");
        assert!(exact.exact_case);
        assert!(!exact.in_array);
    }

    #[rstest]
    #[case("import label from \"Save\";\nconst a = 1;\n")]
    #[case("export { a } from \"Save\";\n")]
    #[case("const a = <button title=\"Save\">x</button>;\n")]
    #[case("const labels = { \"Save\": 1 };\n")]
    #[case("const a = `Sa${\"\"}ve`;\n")]
    fn ignores_specifiers_keys_and_attributes(#[case] source: &str) {
        assert!(find_literal(&tree(source), "Save", &EngineConfig::default()).is_none());
    }

    #[test]
    fn edits_keep_the_quote_style() {
        let source = "const items = ['Draft', 'Published'];\n";
        let mut parsed = tree(source);
        let config = EngineConfig::default();
        let found = find_literal(&parsed, "published", &config).expect("literal");
        assert!(
            parsed
                .get(&found.path)
                .and_then(static_string_value)
                .is_some()
        );
        let change = apply_literal_edit(&mut parsed, &found, "live", &config).expect("edit");
        assert_eq!(parsed.to_source(), "const items = ['Draft', 'Live'];\n");
        assert_eq!(change.old_value.as_deref(), Some("Published"));
        assert_eq!(change.new_value.as_deref(), Some("Live"));
    }
}
