//! Engine-level unit tests spanning locator, mutators and the cache.

use std::collections::BTreeMap;
use std::sync::Arc;

use rstest::{fixture, rstest};
use stitch_syntax::ParseCache;

use super::CARD;
use crate::locator::ElementLocator;
use crate::{
    EngineConfig, ErrorKind, InsertPosition, LocatorCriteria, Operation, PositionHint, Strategy,
    StyleOp, TransformEngine, TransformRequest, TransformResult,
};

const FILE: &str = "Card.tsx";

#[fixture]
fn engine() -> TransformEngine {
    TransformEngine::new(EngineConfig::default(), Arc::new(ParseCache::new()))
}

fn request(source: &str, locator: LocatorCriteria, operation: Operation) -> TransformRequest {
    TransformRequest {
        source_text: source.to_owned(),
        file_path: FILE.to_owned(),
        locator,
        operation,
    }
}

fn output(result: &TransformResult) -> &str {
    assert!(result.success, "edit failed: {:?}", result.error);
    result.new_source_text.as_deref().expect("output")
}

#[rstest]
fn edited_output_is_served_from_the_cache(engine: TransformEngine) {
    let first = engine.transform(&request(
        CARD,
        LocatorCriteria::text("Submit"),
        Operation::Text {
            text: "Send".to_owned(),
        },
    ));
    let second = engine.transform(&request(
        output(&first),
        LocatorCriteria::text("Send"),
        Operation::Text {
            text: "Post".to_owned(),
        },
    ));
    assert!(output(&second).contains("<button type=\"button\">Post</button>"));
    let stats = engine.cache().stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[rstest]
fn failures_keep_the_cached_parse(engine: TransformEngine) {
    let failed = engine.transform(&request(
        CARD,
        LocatorCriteria::id("missing"),
        Operation::Remove,
    ));
    assert_eq!(failed.error_kind, Some(ErrorKind::NodeNotFound));
    assert!(failed.changes.is_empty());

    let retried = engine.transform(&request(CARD, LocatorCriteria::id("card"), Operation::Unwrap));
    assert_eq!(retried.error_kind, Some(ErrorKind::InvalidOperation));
    assert_eq!(engine.cache().stats().hits, 1);
    assert!(engine.invalidate(FILE));
    assert!(!engine.invalidate(FILE));
}

#[rstest]
#[case("const = ;", LocatorCriteria::id("a"), ErrorKind::ParseError)]
#[case(CARD, LocatorCriteria::default(), ErrorKind::InvalidOperation)]
#[case(CARD, LocatorCriteria::class_name("nope"), ErrorKind::NodeNotFound)]
fn failures_are_classified(
    engine: TransformEngine,
    #[case] source: &str,
    #[case] locator: LocatorCriteria,
    #[case] expected: ErrorKind,
) {
    let result = engine.transform(&request(source, locator, Operation::Remove));
    assert!(!result.success);
    assert_eq!(result.error_kind, Some(expected));
    assert!(result.error.is_some());
}

#[rstest]
fn deeply_nested_sources_fail_as_parse_errors(engine: TransformEngine) {
    let source = format!(
        "export const View = () => {}<p>Deep</p>{};\n",
        "(flag ? ".repeat(1_200),
        " : null)".repeat(1_200)
    );
    let result = engine.transform(&request(
        &source,
        LocatorCriteria::text("Deep"),
        Operation::Text {
            text: "Shallow".to_owned(),
        },
    ));
    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::ParseError));
    let listed = engine.find_nodes(&source, FILE);
    assert!(listed.is_err());
}

#[rstest]
fn computed_class_lists_take_styles_inline(engine: TransformEngine) {
    let source = "export const Note = ({ cls }) => <p className={cls}>Hello</p>;\n";
    let result = engine.transform(&request(
        source,
        LocatorCriteria::text("Hello"),
        Operation::Style(StyleOp {
            style: BTreeMap::from([("color".to_owned(), "red".to_owned())]),
            ..StyleOp::default()
        }),
    ));
    assert!(
        output(&result).contains("<p className={cls} style={{ color: \"red\" }}>Hello</p>")
    );
}

#[rstest]
fn hints_are_tried_in_priority_order(engine: TransformEngine) {
    let locator = LocatorCriteria {
        by_id: LocatorCriteria::id("card").by_id,
        by_text: LocatorCriteria::text("Submit").by_text,
        ..LocatorCriteria::default()
    };
    let result = engine.transform(&request(CARD, locator, Operation::Remove));
    assert_eq!(result.strategy, Some(Strategy::Text));
    assert!(!output(&result).contains("Submit"));
}

#[rstest]
fn node_listing_positions_resolve_to_the_same_element(engine: TransformEngine) {
    let config = EngineConfig::default();
    let nodes = engine.find_nodes(CARD, FILE).expect("find nodes");
    let tree = engine.cache().parse(CARD, FILE).expect("parse");
    let locator = ElementLocator::new(&tree, CARD, &config);
    assert_eq!(nodes.len(), 6);
    for node in &nodes {
        let found = locator
            .by_position(PositionHint {
                line: node.line,
                column: node.column,
            })
            .expect("element at listed position");
        assert_eq!(found.path.to_string(), node.path);
    }
}

#[rstest]
fn structural_edits_keep_neighbouring_lines(engine: TransformEngine) {
    let inserted = engine.transform(&request(
        CARD,
        LocatorCriteria::text("Save Changes"),
        Operation::Insert {
            markup_snippet: "<hr />".to_owned(),
            position: InsertPosition::After,
        },
    ));
    assert!(output(&inserted).contains("<p>Save Changes</p>\n      <hr />\n      <ul>"));

    let replaced = engine.transform(&request(
        output(&inserted),
        LocatorCriteria::text("Submit"),
        Operation::Replace {
            markup: "<a href=\"/next\">Next</a>".to_owned(),
        },
    ));
    assert!(output(&replaced).contains("      <a href=\"/next\">Next</a>\n    </section>"));
}

#[rstest]
fn data_source_fallback_can_be_disabled() {
    let mut config = EngineConfig::default();
    config.data_source.enabled = false;
    let engine = TransformEngine::new(config, Arc::new(ParseCache::new()));
    let result = engine.transform(&request(
        CARD,
        LocatorCriteria::text("Settings"),
        Operation::Text {
            text: "Preferences".to_owned(),
        },
    ));
    assert_eq!(result.error_kind, Some(ErrorKind::NodeNotFound));
}

#[test]
fn requests_and_results_use_camel_case_json() {
    let json = r#"{
        "sourceText": "const a = <p title=\"x\">Hi</p>;",
        "filePath": "a.tsx",
        "locator": { "byText": { "original": "Hi", "tagNameFilter": "p" } },
        "operation": { "type": "attribute", "name": "title", "value": null }
    }"#;
    let parsed: TransformRequest = serde_json::from_str(json).expect("request json");
    assert_eq!(
        parsed.operation,
        Operation::Attribute {
            name: "title".to_owned(),
            value: None,
        }
    );
    let result = TransformEngine::default().transform(&parsed);
    let value = serde_json::to_value(&result).expect("result json");
    let field = |pointer: &str| value.pointer(pointer).cloned();
    assert_eq!(field("/success"), Some(true.into()));
    assert_eq!(field("/newSourceText"), Some("const a = <p>Hi</p>;".into()));
    assert_eq!(field("/strategy"), Some("text".into()));
    assert_eq!(field("/changes/0/kind"), Some("remove".into()));
    assert_eq!(field("/changes/0/oldValue"), Some("x".into()));
    assert_eq!(field("/error"), None);
}
