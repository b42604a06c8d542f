//! Cross-module unit tests over parsed trees.

use rstest::{fixture, rstest};

use crate::{
    LineIndex, Node, NodeKind, NodePath, ParseCache, PrinterKind, SupportedLanguage,
    TraversalLimits, collect, find, jsx_element_from_self_closing, jsx_text, parse_source,
    render_checked, rewrite, static_string_value,
};

#[fixture]
fn cache() -> ParseCache {
    ParseCache::new()
}

fn element_names(root: &Node) -> Vec<String> {
    collect(root, TraversalLimits::default(), |node| node.kind().is_opening())
        .into_iter()
        .filter_map(|found| found.node.child_by_field("name").map(Node::source_text))
        .collect()
}

#[rstest]
fn finds_every_opening_tag_in_document_order(cache: ParseCache) {
    let source = concat!(
        "export function List() {\n",
        "  return (\n",
        "    <ul className=\"list\">\n",
        "      <li>One</li>\n",
        "      <li><img src=\"a.png\" /></li>\n",
        "    </ul>\n",
        "  );\n",
        "}\n",
    );
    let tree = cache.parse(source, "List.tsx").expect("parse");
    assert_eq!(element_names(tree.root()), ["ul", "li", "li", "img"]);
}

#[rstest]
fn promoted_self_closing_element_prints_and_reparses(cache: ParseCache) {
    let mut tree = cache.parse("const a = <br />;\n", "a.tsx").expect("parse");
    let found = find(tree.root(), TraversalLimits::default(), |node| {
        node.kind() == &NodeKind::JsxSelfClosingElement
    })
    .expect("self-closing element");
    let path = found.path.clone();
    let promoted = jsx_element_from_self_closing(found.node.clone(), vec![jsx_text("x")]);
    tree.replace(&path, promoted).expect("replace");

    let rendered = render_checked(&tree).expect("render");
    assert_eq!(rendered.printer, PrinterKind::Lossless);
    assert_eq!(rendered.text, "const a = <br>x</br>;\n");
}

#[rstest]
fn rewrite_removes_attributes_with_their_trivia(cache: ParseCache) {
    let mut tree = cache
        .parse("const a = <div id=\"x\" className=\"y\">t</div>;\n", "a.tsx")
        .expect("parse");
    let removed = rewrite(tree.root_mut(), TraversalLimits::default(), |node, ctx| {
        let is_id = node.kind() == &NodeKind::JsxAttribute
            && node.children().first().and_then(Node::text) == Some("id");
        if is_id {
            ctx.remove();
        }
    })
    .expect("rewrite");
    assert_eq!(removed, 1);
    assert_eq!(
        tree.to_source(),
        "const a = <div className=\"y\">t</div>;\n"
    );
}

#[rstest]
#[case("const a = <p>{\"hi\"}</p>;", Some("hi"))]
#[case("const a = <p>{`hi`}</p>;", Some("hi"))]
#[case("const a = <p>{`hi ${name}`}</p>;", None)]
#[case("const a = <p>{name}</p>;", None)]
fn expression_children_expose_static_strings(#[case] source: &str, #[case] expected: Option<&str>) {
    let tree = parse_source(source, SupportedLanguage::Tsx).expect("parse");
    let container = find(tree.root(), TraversalLimits::default(), |node| {
        node.kind() == &NodeKind::JsxExpression
    })
    .expect("expression container");
    let inner = container.node.named_children().next().expect("inner");
    assert_eq!(static_string_value(inner).as_deref(), expected);
}

#[test]
fn utf16_columns_resolve_to_node_offsets() {
    let source = "const s = \"é\"; const a = <p>x</p>;\n";
    let tree = parse_source(source, SupportedLanguage::Tsx).expect("parse");
    let offset = LineIndex::new(source).offset_of(source, 1, 25);
    assert_eq!(offset, Some(26));
    let element = find(tree.root(), TraversalLimits::default(), |node| {
        node.kind() == &NodeKind::JsxElement
    })
    .expect("element");
    assert_eq!(element.node.span().map(|span| span.start_byte()), Some(26));
}

#[test]
fn typescript_files_parse_without_markup() {
    let tree = parse_source(
        "export const sum = (a: number, b: number): number => a + b;\n",
        SupportedLanguage::TypeScript,
    )
    .expect("parse");
    assert!(element_names(tree.root()).is_empty());
    assert_eq!(tree.get(&NodePath::root()).map(Node::kind), Some(&NodeKind::Program));
}
