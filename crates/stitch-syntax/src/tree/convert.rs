//! Conversion from Tree-sitter trees into owned trees.

use super::{Node, NodeKind, SourceTree, Span};
use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;

/// Deepest nesting an owned tree may have.
///
/// Printing, cloning and walking owned trees recurse, so sources nested
/// deeper than this are rejected at conversion time.
pub const MAX_TREE_DEPTH: usize = 1_000;

/// A branch whose children are still being converted.
struct Open {
    node: Node,
    offset: usize,
    end: usize,
}

/// Converts a parsed Tree-sitter tree into an owned [`SourceTree`].
///
/// Every byte of `source` ends up in exactly one place: the text before the
/// root node becomes the tree prefix, gaps between siblings become leading
/// trivia, the gap after a branch's last child becomes its trailing trivia,
/// and the rest sits on leaves. Printing the result reproduces `source`.
///
/// # Errors
///
/// Returns [`SyntaxError::ParseError`] at the first node nested deeper than
/// [`MAX_TREE_DEPTH`].
pub(crate) fn convert_tree(
    tree: &tree_sitter::Tree,
    source: &str,
    language: SupportedLanguage,
) -> Result<SourceTree, SyntaxError> {
    let root = tree.root_node();
    let range = root.byte_range();
    let prefix = slice(source, 0, range.start).to_owned();
    let suffix = slice(source, range.end, source.len()).to_owned();

    let mut cursor = root.walk();
    let mut open: Vec<Open> = Vec::new();
    let mut gap_start = range.start;
    loop {
        let ts_node = cursor.node();
        let (node, end) = start_node(ts_node, cursor.field_name(), source, gap_start);
        if node.text.is_none() {
            if open.len() >= MAX_TREE_DEPTH {
                let (line, column) = point_to_one_based(ts_node.start_position());
                return Err(SyntaxError::parse_at(
                    language,
                    line,
                    column,
                    format!("nesting exceeds {MAX_TREE_DEPTH} levels"),
                ));
            }
            gap_start = ts_node.start_byte();
            open.push(Open {
                node,
                offset: gap_start,
                end,
            });
            if !cursor.goto_first_child() {
                return Err(SyntaxError::internal_error("branch without children"));
            }
            continue;
        }

        let mut finished = node;
        let mut finished_end = end;
        loop {
            let Some(parent) = open.last_mut() else {
                return Ok(SourceTree::new(finished, prefix, suffix, language));
            };
            parent.offset = parent.offset.max(finished_end);
            parent.node.children.push(finished);
            if cursor.goto_next_sibling() {
                gap_start = parent.offset;
                break;
            }
            let Some(mut closed) = open.pop().filter(|_| cursor.goto_parent()) else {
                return Err(SyntaxError::internal_error("conversion stack underflow"));
            };
            closed.node.trailing = slice(source, closed.offset, closed.end).to_owned();
            finished = closed.node;
            finished_end = closed.end;
        }
    }
}

/// Builds `ts_node` without children. Leaves and verbatim kinds carry their
/// text; branches are completed by the caller.
fn start_node(
    ts_node: tree_sitter::Node<'_>,
    field: Option<&'static str>,
    source: &str,
    gap_start: usize,
) -> (Node, usize) {
    let kind = NodeKind::from_grammar(ts_node.kind(), ts_node.is_named());
    let range = ts_node.byte_range();
    let start = ts_node.start_position();
    let span = Span::new(range.start, range.end, start.row, start.column);
    let leading = slice(source, gap_start, range.start).to_owned();

    // Verbatim kinds keep their exact text so inner whitespace is never
    // reflowed and literal values are read from one place.
    let verbatim = ts_node.child_count() == 0 || kind.is_verbatim();
    let node = Node {
        kind,
        field,
        span: Some(span),
        leading,
        text: verbatim.then(|| slice(source, range.start, range.end).to_owned()),
        children: Vec::new(),
        trailing: String::new(),
    };
    (node, range.end)
}

fn slice(source: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    source.get(start..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn convert(source: &str) -> SourceTree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&SupportedLanguage::Tsx.tree_sitter_language())
            .expect("language");
        let tree = parser.parse(source, None).expect("tree");
        convert_tree(&tree, source, SupportedLanguage::Tsx).expect("convert")
    }

    #[rstest]
    #[case("")]
    #[case("const a = 1;\n")]
    #[case("\n\n// header\nexport const App = () => (\n  <div className=\"p-4\">\n    Hi &amp; bye {name}\n  </div>\n);\n")]
    #[case("const s = `tpl ${x} end`; /* trailing */   \n")]
    fn conversion_is_lossless(#[case] source: &str) {
        assert_eq!(convert(source).to_source(), source);
    }

    #[test]
    fn string_literals_are_leaves() {
        let tree = convert("const s = \"a b\";");
        let mut stack = vec![tree.root()];
        let mut found = false;
        while let Some(node) = stack.pop() {
            if node.kind() == &NodeKind::StringLiteral {
                assert_eq!(node.text(), Some("\"a b\""));
                assert!(node.children().is_empty());
                found = true;
            }
            stack.extend(node.children());
        }
        assert!(found);
    }

    #[test]
    fn field_names_are_recorded() {
        let tree = convert("<a href=\"x\" />;");
        let mut stack = vec![tree.root()];
        let mut name = None;
        while let Some(node) = stack.pop() {
            if node.kind() == &NodeKind::JsxSelfClosingElement {
                name = node.child_by_field("name").map(Node::source_text);
            }
            stack.extend(node.children());
        }
        assert_eq!(name.as_deref(), Some("a"));
    }
}
