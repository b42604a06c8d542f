//! Owned, mutable source trees.
//!
//! Tree-sitter trees are immutable views over a source buffer. The engine
//! needs trees it can edit and print back, so every parse is converted into an
//! owned [`SourceTree`] of [`Node`] values. Each node keeps the whitespace and
//! comments that preceded it in the original text (its *leading trivia*), so
//! an untouched tree prints byte-identically.
//!
//! Parent links are never stored. Parents and paths are computed during
//! traversal (see [`crate::visit`]) and edits address nodes by [`NodePath`].

mod build;
mod convert;
mod kind;
mod literal;

use std::fmt;

use serde::Serialize;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;

pub use build::{
    js_string_literal, jsx_attribute, jsx_attribute_value, jsx_closing_element,
    jsx_element_from_self_closing, jsx_expression, jsx_text, jsx_wrapper_element, object_literal,
};
pub(crate) use convert::convert_tree;
pub use convert::MAX_TREE_DEPTH;
pub use kind::NodeKind;
pub use literal::{
    escape_js_string, jsx_visible_text, literal_quote, static_string_value, unescape_js_string,
};

/// Byte range and start position of a node in the text it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    start_byte: usize,
    end_byte: usize,
    start_row: usize,
    start_column: usize,
}

impl Span {
    /// Creates a span from a byte range and a zero-based start row/column.
    #[must_use]
    pub const fn new(
        start_byte: usize,
        end_byte: usize,
        start_row: usize,
        start_column: usize,
    ) -> Self {
        Self {
            start_byte,
            end_byte,
            start_row,
            start_column,
        }
    }

    /// Returns the inclusive start byte.
    #[must_use]
    pub const fn start_byte(&self) -> usize {
        self.start_byte
    }

    /// Returns the exclusive end byte.
    #[must_use]
    pub const fn end_byte(&self) -> usize {
        self.end_byte
    }

    /// Returns the zero-based start row.
    #[must_use]
    pub const fn start_row(&self) -> usize {
        self.start_row
    }

    /// Returns the zero-based start column, in bytes.
    #[must_use]
    pub const fn start_column(&self) -> usize {
        self.start_column
    }

    /// Returns the one-based line and column of the start position.
    #[must_use]
    pub fn one_based_start(&self) -> (u32, u32) {
        crate::position::point_to_one_based(tree_sitter::Point::new(
            self.start_row,
            self.start_column,
        ))
    }
}

/// Sequence of child indices leading from a root node to a descendant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Returns the empty path, which addresses the root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns the indices of this path.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of steps in this path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether this path addresses the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a child index.
    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// Removes the last child index.
    pub fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    /// Returns the last child index, if any.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Returns a new path extended by one child index.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(index);
        Self(steps)
    }

    /// Returns the path of the parent node, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// Returns whether `self` equals or descends from `ancestor`.
    #[must_use]
    pub fn starts_with(&self, ancestor: &Self) -> bool {
        self.0.starts_with(&ancestor.0)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(steps: Vec<usize>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for step in &self.0 {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

/// A node of an owned source tree.
///
/// Leaves carry their verbatim text; branches carry owned children. The
/// `leading` trivia is the text between the previous sibling (or the parent's
/// start) and this node; `trailing` is the text between a branch's last child
/// and its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    field: Option<&'static str>,
    span: Option<Span>,
    leading: String,
    text: Option<String>,
    children: Vec<Node>,
    trailing: String,
}

impl Node {
    /// Creates an anonymous token such as `<` or `=`.
    #[must_use]
    pub fn token(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Token, text)
    }

    /// Creates a leaf node with verbatim text.
    #[must_use]
    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            span: None,
            leading: String::new(),
            text: Some(text.into()),
            children: Vec::new(),
            trailing: String::new(),
        }
    }

    /// Creates a branch node owning `children`.
    #[must_use]
    pub const fn branch(kind: NodeKind, children: Vec<Self>) -> Self {
        Self {
            kind,
            field: None,
            span: None,
            leading: String::new(),
            text: None,
            children,
            trailing: String::new(),
        }
    }

    /// Returns this node with different leading trivia.
    #[must_use]
    pub fn with_leading(mut self, leading: impl Into<String>) -> Self {
        self.leading = leading.into();
        self
    }

    /// Returns this node tagged with a grammar field name.
    #[must_use]
    pub const fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Returns the kind tag.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the grammar field name under which the parent holds this node.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        self.field
    }

    /// Returns the source span, or `None` for nodes created by an edit.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        self.span
    }

    /// Returns the trivia preceding this node.
    #[must_use]
    pub fn leading(&self) -> &str {
        &self.leading
    }

    /// Replaces the trivia preceding this node.
    pub fn set_leading(&mut self, leading: impl Into<String>) {
        self.leading = leading.into();
    }

    /// Returns the trivia after a branch's last child.
    #[must_use]
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    /// Returns the verbatim text of a leaf.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns whether this node is the anonymous token `text`.
    #[must_use]
    pub fn is_token(&self, text: &str) -> bool {
        self.kind == NodeKind::Token && self.text.as_deref() == Some(text)
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the children of this node mutably.
    pub fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Returns the first child held under a grammar field.
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.field == Some(field))
    }

    /// Returns the first child of a kind.
    #[must_use]
    pub fn child_of_kind(&self, kind: &NodeKind) -> Option<&Self> {
        self.children.iter().find(|child| &child.kind == kind)
    }

    /// Returns children that are neither anonymous tokens nor comments.
    pub fn named_children(&self) -> impl Iterator<Item = &Self> {
        self.children
            .iter()
            .filter(|child| !matches!(child.kind, NodeKind::Token | NodeKind::Comment))
    }

    /// Returns the descendant addressed by a path relative to this node.
    #[must_use]
    pub fn get(&self, path: &[usize]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |node, index| node.children.get(*index))
    }

    /// Returns the descendant addressed by a path relative to this node,
    /// mutably.
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        let mut node = self;
        for index in path {
            node = node.children.get_mut(*index)?;
        }
        Some(node)
    }

    /// Returns the text of this subtree without its own leading trivia.
    #[must_use]
    pub fn source_text(&self) -> String {
        let mut out = String::new();
        self.write_body(&mut out);
        out
    }

    /// Appends this node, including its leading trivia, to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.leading);
        self.write_body(out);
    }

    fn write_body(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str(&self.trailing);
    }

    /// Returns this subtree with every source span cleared.
    ///
    /// Used for nodes that are moved into another tree, where the original
    /// offsets would be meaningless.
    #[must_use]
    pub fn detached(mut self) -> Self {
        self.clear_spans();
        self
    }

    fn clear_spans(&mut self) {
        self.span = None;
        for child in &mut self.children {
            child.clear_spans();
        }
    }
}

/// An owned tree for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    root: Node,
    prefix: String,
    suffix: String,
    language: SupportedLanguage,
}

impl SourceTree {
    /// Creates a tree from a root node and the text surrounding it.
    #[must_use]
    pub const fn new(
        root: Node,
        prefix: String,
        suffix: String,
        language: SupportedLanguage,
    ) -> Self {
        Self {
            root,
            prefix,
            suffix,
            language,
        }
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Returns the root node mutably.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Returns the language the tree was parsed as.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the node addressed by `path`.
    #[must_use]
    pub fn get(&self, path: &NodePath) -> Option<&Node> {
        self.root.get(path.as_slice())
    }

    /// Returns the node addressed by `path`, mutably.
    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        self.root.get_mut(path.as_slice())
    }

    /// Replaces the node at `path`, returning the previous node.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not address a node.
    pub fn replace(&mut self, path: &NodePath, node: Node) -> Result<Node, SyntaxError> {
        let slot = self
            .get_mut(path)
            .ok_or_else(|| SyntaxError::invalid_path(path.to_string(), "no node at path"))?;
        Ok(std::mem::replace(slot, node))
    }

    /// Removes the node at `path`, returning it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is the root or does not address a node.
    pub fn remove(&mut self, path: &NodePath) -> Result<Node, SyntaxError> {
        let (parent, index) = self.parent_slot(path)?;
        if index >= parent.children.len() {
            return Err(SyntaxError::invalid_path(
                path.to_string(),
                "child index out of range",
            ));
        }
        Ok(parent.children.remove(index))
    }

    /// Inserts `node` as child `index` of the node at `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent does not exist or the index is past the
    /// end of its children.
    pub fn insert(
        &mut self,
        parent: &NodePath,
        index: usize,
        node: Node,
    ) -> Result<(), SyntaxError> {
        let owner = self
            .get_mut(parent)
            .ok_or_else(|| SyntaxError::invalid_path(parent.to_string(), "no node at path"))?;
        if index > owner.children.len() {
            return Err(SyntaxError::invalid_path(
                parent.child(index).to_string(),
                "insertion index out of range",
            ));
        }
        owner.children.insert(index, node);
        Ok(())
    }

    fn parent_slot(&mut self, path: &NodePath) -> Result<(&mut Node, usize), SyntaxError> {
        let rendered = path.to_string();
        let (index, parent_steps) = path
            .as_slice()
            .split_last()
            .ok_or_else(|| SyntaxError::invalid_path(rendered.clone(), "the root has no parent"))?;
        let parent = self
            .root
            .get_mut(parent_steps)
            .ok_or_else(|| SyntaxError::invalid_path(rendered, "no parent at path"))?;
        Ok((parent, *index))
    }

    /// Prints the tree back to source text, preserving all trivia.
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut out = String::with_capacity(self.prefix.len().saturating_add(self.suffix.len()));
        out.push_str(&self.prefix);
        self.root.write_to(&mut out);
        out.push_str(&self.suffix);
        out
    }
}
