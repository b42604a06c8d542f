//! End-to-end tests for stitch-syntax using insta for snapshot testing.
//!
//! These tests drive the public API the way the engine does: parse through
//! the cache, locate nodes by traversal, edit by path and print with
//! validation.

use std::sync::Arc;

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use stitch_syntax::{
    Node, NodeKind, ParseCache, Parser, PrinterKind, SupportedLanguage, SyntaxError,
    TraversalLimits, collect, find, jsx_attribute, jsx_attribute_value, jsx_wrapper_element,
    parse_markup_snippet, pretty_print, render_checked,
};

const CARD: &str = concat!(
    "import React from \"react\";\n",
    "\n",
    "// Card shows a title and a call to action.\n",
    "export default function Card({ title }) {\n",
    "  return (\n",
    "    <section className=\"card\">\n",
    "      <h2>{title}</h2>\n",
    "      <button   type='button'>Save</button>\n",
    "    </section>\n",
    "  );\n",
    "}\n",
);

#[fixture]
fn cache() -> Arc<ParseCache> {
    Arc::new(ParseCache::new())
}

// =============================================================================
// Happy Path: Parsing and Printing
// =============================================================================

#[rstest]
#[case("Card.jsx", CARD)]
#[case("util.ts", "export const sum = (a: number, b: number): number => a + b;\n")]
#[case("empty.tsx", "")]
#[case("comments.tsx", "/* a */\n// b\n")]
fn untouched_sources_print_byte_identically(
    cache: Arc<ParseCache>,
    #[case] file: &str,
    #[case] source: &str,
) {
    let tree = cache
        .parse(source, file)
        .unwrap_or_else(|err| panic!("parse {file}: {err}"));
    let rendered = render_checked(&tree).unwrap_or_else(|err| panic!("render {file}: {err}"));
    assert_eq!(rendered.printer, PrinterKind::Lossless);
    assert_eq!(rendered.text, source);
}

#[rstest]
fn wrapping_an_element_keeps_surrounding_code(cache: Arc<ParseCache>) {
    let mut tree = cache
        .parse(CARD, "Card.tsx")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let button = find(tree.root(), TraversalLimits::default(), |node| {
        node.kind() == &NodeKind::JsxElement
            && node
                .child_of_kind(&NodeKind::JsxOpeningElement)
                .and_then(|open| open.child_by_field("name"))
                .and_then(Node::text)
                == Some("button")
    })
    .unwrap_or_else(|| panic!("button not found"));
    let path = button.path.clone();
    let leading = button.node.leading().to_owned();
    let wrapped = jsx_wrapper_element(
        "div",
        vec![jsx_attribute("className", Some(jsx_attribute_value("actions")))],
        vec![button.node.clone().with_leading("")],
    )
    .with_leading(leading);
    tree.replace(&path, wrapped)
        .unwrap_or_else(|err| panic!("replace: {err}"));

    let rendered = render_checked(&tree).unwrap_or_else(|err| panic!("render: {err}"));
    assert_snapshot!(rendered.text, @r#"
    import React from "react";

    // Card shows a title and a call to action.
    export default function Card({ title }) {
      return (
        <section className="card">
          <h2>{title}</h2>
          <div className="actions"><button   type='button'>Save</button></div>
        </section>
      );
    }
    "#);
}

#[test]
fn pretty_printer_lays_out_markup_returns() {
    let mut parser =
        Parser::new(SupportedLanguage::Tsx).unwrap_or_else(|err| panic!("parser: {err}"));
    let tree = parser
        .parse_tree("const Nav=()=>{return <nav><a href=\"/\">Home</a><a href=\"/about\">About</a></nav>}")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert_snapshot!(pretty_print(&tree), @r#"
    const Nav = () => {
      return (
        <nav>
          <a href="/">Home</a>
          <a href="/about">About</a>
        </nav>
      )
    }
    "#);
}

#[test]
fn snippets_insert_as_detached_elements() {
    let nodes = parse_markup_snippet("<li>One</li><li>Two</li>")
        .unwrap_or_else(|err| panic!("snippet: {err}"));
    let printed: Vec<String> = nodes.iter().map(Node::source_text).collect();
    assert_snapshot!(printed.join("|"), @"<li>One</li>|<li>Two</li>");
}

// =============================================================================
// Unhappy Path
// =============================================================================

#[rstest]
#[case("const = ;", 1)]
#[case("const a = 1;\nconst = ;\n", 2)]
fn malformed_sources_report_located_parse_errors(
    cache: Arc<ParseCache>,
    #[case] source: &str,
    #[case] expected_line: u32,
) {
    let err = cache
        .parse(source, "broken.tsx")
        .err()
        .unwrap_or_else(|| panic!("{source:?} should not parse"));
    match err {
        SyntaxError::ParseError { line, .. } => assert_eq!(line, expected_line),
        other => panic!("expected a parse error, got {other}"),
    }
    assert!(cache.is_empty());
}

#[test]
fn typescript_grammar_rejects_markup() {
    let mut parser = Parser::new(SupportedLanguage::TypeScript)
        .unwrap_or_else(|err| panic!("parser: {err}"));
    let result = parser
        .parse("const a = <div>hi</div>;")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(result.has_errors());
}

// =============================================================================
// Concurrency
// =============================================================================

#[rstest]
fn shared_cache_serves_parallel_files(cache: Arc<ParseCache>) {
    let handles: Vec<_> = (0..4)
        .map(|index| {
            let shared = Arc::clone(&cache);
            std::thread::spawn(move || {
                let source = format!("const a{index} = <p>{index}</p>;\n");
                let file = format!("f{index}.tsx");
                shared
                    .parse(&source, &file)
                    .unwrap_or_else(|err| panic!("parse: {err}"));
                shared
                    .parse(&source, &file)
                    .unwrap_or_else(|err| panic!("parse: {err}"));
            })
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .unwrap_or_else(|_| panic!("worker thread panicked"));
    }
    let stats = cache.stats();
    assert_eq!((stats.entries, stats.hits, stats.misses), (4, 4, 4));

    let tree = cache
        .parse("const a0 = <p>0</p>;\n", "f0.tsx")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let texts = collect(tree.root(), TraversalLimits::default(), |node| {
        node.kind() == &NodeKind::JsxText
    });
    assert_eq!(texts.len(), 1);
}
