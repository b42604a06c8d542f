//! Fallback pretty printer.
//!
//! Rebuilds source text from the tree structure alone, discarding original
//! trivia except comments. Statements go on their own lines, blocks and
//! multi-line markup are indented by two spaces, and a `return` of markup is
//! wrapped in parentheses. Markup whose children include text, or spaces
//! that would render, is printed on one line so the rendered whitespace does
//! not change.

use crate::tree::{Node, NodeKind, SourceTree};

const INDENT: &str = "  ";

const SPACED_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "&&=", "||=", "??=", "<<=", ">>=", ">>>=", "&=",
    "|=", "^=", "=>", "==", "===", "!=", "!==", "<", ">", "<=", ">=", "+", "-", "*", "/", "%",
    "**", "&&", "||", "??", "&", "|", "^", "<<", ">>", ">>>", "?", ":", "instanceof", "in",
];

const OPERATOR_PARENTS: &[&str] = &[
    "binary_expression",
    "assignment_expression",
    "augmented_assignment_expression",
    "variable_declarator",
    "ternary_expression",
    "arrow_function",
];

/// Prints `tree` from its structure.
#[must_use]
pub fn pretty_print(tree: &SourceTree) -> String {
    let mut printer = PrettyPrinter::default();
    printer.node(tree.root(), None);
    printer.finish()
}

#[derive(Default)]
struct PrettyPrinter {
    out: String,
    indent: usize,
    pending_space: bool,
    pending_newline: bool,
}

impl PrettyPrinter {
    fn finish(mut self) -> String {
        let trimmed_len = self.out.trim_end().len();
        self.out.truncate(trimmed_len);
        self.out.push('\n');
        self.out
    }

    fn newline(&mut self) {
        let trimmed_len = self.out.trim_end_matches(' ').len();
        self.out.truncate(trimmed_len);
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.pending_space = false;
        self.pending_newline = false;
    }

    fn at_line_start(&self) -> bool {
        let trimmed = self.out.trim_end_matches(' ');
        trimmed.is_empty() || trimmed.ends_with('\n')
    }

    /// Writes a token, inserting the separator the token stream needs.
    fn token(&mut self, text: &str) {
        if self.pending_newline {
            self.newline();
        }
        let prev = self.out.chars().last();
        let next = text.chars().next();
        if !self.at_line_start() && (self.pending_space || needs_space(prev, next)) {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(text);
    }

    /// Writes markup verbatim. Only a pending separator is honoured.
    fn raw(&mut self, text: &str) {
        if self.pending_newline {
            self.newline();
        }
        if self.pending_space && !self.at_line_start() {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(text);
    }

    fn node(&mut self, node: &Node, parent: Option<&Node>) {
        match node.kind() {
            NodeKind::Program => self.program(node),
            NodeKind::ReturnStatement => self.return_statement(node),
            NodeKind::JsxElement => self.element(node, false),
            NodeKind::JsxSelfClosingElement
            | NodeKind::JsxOpeningElement
            | NodeKind::JsxClosingElement => self.tag(node),
            NodeKind::JsxText => self.raw(node.text().unwrap_or_default()),
            NodeKind::Comment => self.comment(node),
            kind if is_block_like(kind) => self.block(node),
            _ => match node.text() {
                Some(text) => self.leaf(node, text, parent),
                None => {
                    for child in node.children() {
                        self.node(child, Some(node));
                    }
                }
            },
        }
    }

    fn leaf(&mut self, node: &Node, text: &str, parent: Option<&Node>) {
        if node.kind() != &NodeKind::Token {
            self.token(text);
            return;
        }
        let parent_kind = parent.map(|p| p.kind().grammar_name()).unwrap_or_default();
        if SPACED_OPERATORS.contains(&text) && OPERATOR_PARENTS.contains(&parent_kind) {
            self.pending_space = true;
            self.token(text);
            self.pending_space = true;
        } else if text == "," || (text == ":" && parent_kind == "pair") {
            self.token(text);
            self.pending_space = true;
        } else if text.chars().all(char::is_alphabetic) {
            self.token(text);
            self.pending_space = true;
        } else {
            self.token(text);
        }
    }

    fn comment(&mut self, node: &Node) {
        let text = node.text().unwrap_or_default();
        self.token(text);
        if text.starts_with("//") {
            self.pending_newline = true;
        }
    }

    fn program(&mut self, node: &Node) {
        for child in node.children() {
            if child.is_token(";") {
                self.token(";");
                continue;
            }
            self.newline();
            self.node(child, Some(node));
        }
    }

    fn block(&mut self, node: &Node) {
        let mut inner = node
            .children()
            .iter()
            .filter(|child| !child.is_token("{") && !child.is_token("}"))
            .peekable();
        if inner.peek().is_none() {
            self.pending_space = true;
            self.token("{}");
            return;
        }
        self.pending_space = true;
        self.token("{");
        self.indent = self.indent.saturating_add(1);
        for child in inner {
            if child.is_token(";") || child.is_token(",") {
                self.token(child.text().unwrap_or_default());
                continue;
            }
            self.newline();
            self.node(child, Some(node));
        }
        self.indent = self.indent.saturating_sub(1);
        self.newline();
        self.token("}");
    }

    fn return_statement(&mut self, node: &Node) {
        let argument = node.named_children().next();
        let markup = argument.and_then(markup_of);
        let Some(element) = markup else {
            for child in node.children() {
                self.node(child, Some(node));
            }
            return;
        };
        self.token("return");
        self.pending_space = true;
        self.token("(");
        self.indent = self.indent.saturating_add(1);
        self.newline();
        self.node(element, Some(node));
        self.indent = self.indent.saturating_sub(1);
        self.newline();
        self.token(")");
        let after_argument = node
            .children()
            .iter()
            .skip_while(|child| !argument.is_some_and(|arg| std::ptr::eq(*child, arg)))
            .skip(1);
        for child in after_argument {
            self.node(child, Some(node));
        }
    }

    fn element(&mut self, node: &Node, force_inline: bool) {
        let children: Vec<&Node> = node
            .children()
            .iter()
            .filter(|child| child.kind() != &NodeKind::JsxOpeningElement)
            .collect();
        let inline = force_inline
            || children
                .iter()
                .any(|child| is_text_like(child) || significant_gap(child.leading()));
        let mut tags = node
            .children()
            .iter()
            .filter(|child| child.kind() == &NodeKind::JsxOpeningElement);
        if let Some(opening) = tags.next() {
            self.tag(opening);
        }

        if inline {
            let mut previous_is_text = false;
            for child in children {
                let current_is_text = is_text_like(child);
                self.raw(jsx_gap(child.leading(), previous_is_text, current_is_text));
                match child.kind() {
                    NodeKind::JsxElement => self.element(child, true),
                    _ => self.node(child, Some(node)),
                }
                previous_is_text = current_is_text;
            }
            return;
        }

        let (body, closing): (Vec<&Node>, Vec<&Node>) = children
            .into_iter()
            .partition(|child| child.kind() != &NodeKind::JsxClosingElement);
        if !body.is_empty() {
            self.indent = self.indent.saturating_add(1);
            for child in body {
                self.newline();
                self.node(child, Some(node));
            }
            self.indent = self.indent.saturating_sub(1);
            self.newline();
        }
        for tag in closing {
            self.tag(tag);
        }
    }

    fn tag(&mut self, node: &Node) {
        for child in node.children() {
            match child.kind() {
                NodeKind::JsxAttribute => {
                    self.raw(" ");
                    self.attribute(child);
                }
                NodeKind::JsxExpression => {
                    self.raw(" ");
                    self.node(child, Some(node));
                }
                _ if node.kind() == &NodeKind::JsxSelfClosingElement
                    && (child.is_token("/") || child.is_token("/>")) =>
                {
                    self.raw(" ");
                    self.raw(child.text().unwrap_or_default());
                }
                _ => match child.text() {
                    Some(text) => self.raw(text),
                    None => self.raw(&child.source_text()),
                },
            }
        }
    }

    fn attribute(&mut self, node: &Node) {
        for child in node.children() {
            match child.kind() {
                NodeKind::JsxElement => self.element(child, true),
                NodeKind::JsxExpression => self.node(child, Some(node)),
                _ => match child.text() {
                    Some(text) => self.raw(text),
                    None => self.raw(&child.source_text()),
                },
            }
        }
    }
}

fn needs_space(prev: Option<char>, next: Option<char>) -> bool {
    let (Some(prev), Some(next)) = (prev, next) else {
        return false;
    };
    let wordish = |c: char| c.is_alphanumeric() || matches!(c, '_' | '$' | '"' | '\'' | '`');
    (wordish(prev) && wordish(next))
        || (matches!(prev, ')' | '}') && next.is_alphabetic())
        || (prev == '+' && next == '+')
        || (prev == '-' && next == '-')
        || (prev == '/' && matches!(next, '/' | '*'))
}

fn is_block_like(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::StatementBlock => true,
        NodeKind::Other(name) => matches!(
            name.as_str(),
            "class_body" | "interface_body" | "switch_body" | "enum_body"
        ),
        _ => false,
    }
}

fn markup_of(argument: &Node) -> Option<&Node> {
    if argument.kind().is_element() {
        return Some(argument);
    }
    if argument.kind() == &NodeKind::ParenthesizedExpression {
        let mut named = argument.named_children();
        let inner = named.next()?;
        if named.next().is_none() && inner.kind().is_element() {
            return Some(inner);
        }
    }
    None
}

fn is_text_like(node: &Node) -> bool {
    matches!(
        node.kind(),
        NodeKind::JsxText | NodeKind::HtmlCharacterReference
    )
}

/// Whitespace between markup children that renders as a space.
fn significant_gap(leading: &str) -> bool {
    !leading.is_empty() && !leading.contains('\n')
}

/// Returns the separator to print before a markup child in inline mode.
///
/// Gaps without a line break are kept. Gaps with a line break vanish,
/// except between two runs of text, which render joined by one space.
fn jsx_gap(leading: &str, previous_is_text: bool, current_is_text: bool) -> &str {
    if leading.is_empty() || significant_gap(leading) {
        leading
    } else if previous_is_text && current_is_text {
        " "
    } else {
        ""
    }
}
