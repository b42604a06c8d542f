//! Generic pre-order traversal with enter/exit hooks.
//!
//! Visitors receive shared references into the tree and a [`VisitContext`]
//! describing where they are. Structural changes requested through the
//! context are not applied during the walk; they are collected into an
//! [`EditScript`] addressed by [`NodePath`] and applied afterwards, so a
//! visitor never holds a reference into a tree that is being rewritten.

use std::collections::HashMap;

use tracing::warn;

use crate::error::SyntaxError;
use crate::tree::{Node, NodeKind, NodePath};

const VISIT_TARGET: &str = "stitch_syntax::visit";

/// Default ceiling on traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Bounds applied to a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Deepest node depth (the root is depth zero) the walk will enter.
    pub max_depth: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TraversalLimits {
    /// Creates limits with the given depth ceiling.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every reachable node was visited.
    Finished,
    /// A visitor called [`VisitContext::stop`].
    Stopped,
    /// The tree is deeper than the configured ceiling; the walk was abandoned.
    DepthLimitExceeded {
        /// The ceiling that was hit.
        limit: usize,
    },
}

/// A structural change requested during a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace the node with another.
    Replace(Node),
    /// Remove the node from its parent.
    Remove,
}

/// Path-addressed edits collected during a traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    edits: Vec<(NodePath, Edit)>,
}

impl EditScript {
    /// Returns whether the script contains no edits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns the number of edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns the edits in document order.
    #[must_use]
    pub fn edits(&self) -> &[(NodePath, Edit)] {
        &self.edits
    }

    fn record(&mut self, path: NodePath, edit: Edit) {
        // An edit on a node supersedes edits already recorded beneath it.
        self.edits.retain(|(existing, _)| !existing.starts_with(&path));
        self.edits.push((path, edit));
    }

    /// Applies the edits to `root`.
    ///
    /// Edits are applied last-first in document order so removals never
    /// shift the indices of edits still pending.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::VisitError`] if an edit addresses a node that
    /// does not exist or tries to remove the root.
    pub fn apply(mut self, root: &mut Node) -> Result<(), SyntaxError> {
        self.edits.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (path, edit) in self.edits.into_iter().rev() {
            match edit {
                Edit::Replace(node) => {
                    let slot = root.get_mut(path.as_slice()).ok_or_else(|| {
                        SyntaxError::visit(format!("no node at {path} to replace"))
                    })?;
                    *slot = node;
                }
                Edit::Remove => {
                    let (index, parent_steps) = path
                        .as_slice()
                        .split_last()
                        .ok_or_else(|| SyntaxError::visit("cannot remove the root node"))?;
                    let parent = root.get_mut(parent_steps).ok_or_else(|| {
                        SyntaxError::visit(format!("no parent for {path} to remove from"))
                    })?;
                    if *index >= parent.children().len() {
                        return Err(SyntaxError::visit(format!("no node at {path} to remove")));
                    }
                    parent.children_mut().remove(*index);
                }
            }
        }
        Ok(())
    }
}

/// Outcome of a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// How the walk ended.
    pub completion: Completion,
    /// Number of nodes entered.
    pub visited: usize,
    /// Edits requested by the visitor.
    pub edits: EditScript,
}

#[derive(Debug, Default)]
struct Control {
    stop: bool,
    skip: bool,
    edit: Option<Edit>,
}

/// Position of the current node and the actions available to a visitor.
pub struct VisitContext<'c, 't> {
    ancestors: &'c [&'t Node],
    path: &'c NodePath,
    control: Control,
}

impl<'c, 't> VisitContext<'c, 't> {
    fn new(ancestors: &'c [&'t Node], path: &'c NodePath) -> Self {
        Self {
            ancestors,
            path,
            control: Control::default(),
        }
    }

    /// Returns the parent of the current node, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<&'t Node> {
        self.ancestors.last().copied()
    }

    /// Returns the ancestors of the current node, root first.
    #[must_use]
    pub const fn ancestors(&self) -> &'c [&'t Node] {
        self.ancestors
    }

    /// Returns the path from the root to the current node.
    #[must_use]
    pub const fn path(&self) -> &'c NodePath {
        self.path
    }

    /// Returns the depth of the current node; the root is depth zero.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Ends the whole traversal after this callback.
    pub const fn stop(&mut self) {
        self.control.stop = true;
    }

    /// Skips the children of the current node. Has no effect on exit.
    pub const fn skip(&mut self) {
        self.control.skip = true;
    }

    /// Replaces the current node once the traversal finishes. Its children
    /// are not visited and its exit hook does not run.
    pub fn replace(&mut self, node: Node) {
        self.control.edit = Some(Edit::Replace(node));
    }

    /// Removes the current node once the traversal finishes. Its children
    /// are not visited and its exit hook does not run.
    pub fn remove(&mut self) {
        self.control.edit = Some(Edit::Remove);
    }
}

/// Callbacks invoked around every node of a traversal.
pub trait Visitor<'t> {
    /// Called before the node's children are visited.
    fn enter(&mut self, node: &'t Node, ctx: &mut VisitContext<'_, 't>) {
        let _ = (node, ctx);
    }

    /// Called after the node's children are visited.
    fn exit(&mut self, node: &'t Node, ctx: &mut VisitContext<'_, 't>) {
        let _ = (node, ctx);
    }
}

type Callback<'t, 'f> = Box<dyn FnMut(&'t Node, &mut VisitContext<'_, 't>) + 'f>;

/// A visitor assembled from per-kind callbacks.
#[derive(Default)]
pub struct VisitorTable<'t, 'f> {
    enter: HashMap<NodeKind, Vec<Callback<'t, 'f>>>,
    exit: HashMap<NodeKind, Vec<Callback<'t, 'f>>>,
    any: Vec<Callback<'t, 'f>>,
}

impl<'t, 'f> VisitorTable<'t, 'f> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enter: HashMap::new(),
            exit: HashMap::new(),
            any: Vec::new(),
        }
    }

    /// Registers a callback run when entering nodes of `kind`.
    #[must_use]
    pub fn on_enter(
        mut self,
        kind: NodeKind,
        callback: impl FnMut(&'t Node, &mut VisitContext<'_, 't>) + 'f,
    ) -> Self {
        self.enter.entry(kind).or_default().push(Box::new(callback));
        self
    }

    /// Registers a callback run when leaving nodes of `kind`.
    #[must_use]
    pub fn on_exit(
        mut self,
        kind: NodeKind,
        callback: impl FnMut(&'t Node, &mut VisitContext<'_, 't>) + 'f,
    ) -> Self {
        self.exit.entry(kind).or_default().push(Box::new(callback));
        self
    }

    /// Registers a callback run when entering any node, before per-kind
    /// callbacks.
    #[must_use]
    pub fn on_any(
        mut self,
        callback: impl FnMut(&'t Node, &mut VisitContext<'_, 't>) + 'f,
    ) -> Self {
        self.any.push(Box::new(callback));
        self
    }
}

impl<'t> Visitor<'t> for VisitorTable<'t, '_> {
    fn enter(&mut self, node: &'t Node, ctx: &mut VisitContext<'_, 't>) {
        for callback in &mut self.any {
            callback(node, ctx);
        }
        if let Some(callbacks) = self.enter.get_mut(node.kind()) {
            for callback in callbacks {
                callback(node, ctx);
            }
        }
    }

    fn exit(&mut self, node: &'t Node, ctx: &mut VisitContext<'_, 't>) {
        if let Some(callbacks) = self.exit.get_mut(node.kind()) {
            for callback in callbacks {
                callback(node, ctx);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

struct Walker<'t, 'v, V> {
    visitor: &'v mut V,
    ancestors: Vec<&'t Node>,
    path: NodePath,
    limits: TraversalLimits,
    visited: usize,
    edits: EditScript,
    completion: Completion,
}

/// What to do after a node's enter callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Descend,
    Leave,
    Settled,
    Halt,
}

impl<'t, V: Visitor<'t>> Walker<'t, '_, V> {
    /// Pre-order walk over an explicit stack of `(node, next child)` frames.
    fn walk(&mut self, root: &'t Node) {
        match self.enter(root) {
            Step::Descend => {}
            Step::Leave => {
                self.leave(root);
                return;
            }
            Step::Settled | Step::Halt => return,
        }
        self.ancestors.push(root);
        let mut frames: Vec<(&'t Node, usize)> = vec![(root, 0)];
        while let Some(frame) = frames.last_mut() {
            let (node, index) = *frame;
            let Some(child) = node.children().get(index) else {
                frames.pop();
                self.ancestors.pop();
                if self.leave(node) == Flow::Halt {
                    return;
                }
                self.path.pop();
                continue;
            };
            frame.1 = index.saturating_add(1);
            self.path.push(index);
            match self.enter(child) {
                Step::Descend => {
                    self.ancestors.push(child);
                    frames.push((child, 0));
                }
                Step::Leave => {
                    if self.leave(child) == Flow::Halt {
                        return;
                    }
                    self.path.pop();
                }
                Step::Settled => {
                    self.path.pop();
                }
                Step::Halt => return,
            }
        }
    }

    fn enter(&mut self, node: &'t Node) -> Step {
        if self.ancestors.len() > self.limits.max_depth {
            warn!(
                target: VISIT_TARGET,
                limit = self.limits.max_depth,
                path = %self.path,
                "traversal depth ceiling reached"
            );
            self.completion = Completion::DepthLimitExceeded {
                limit: self.limits.max_depth,
            };
            return Step::Halt;
        }
        self.visited = self.visited.saturating_add(1);

        let entered = {
            let mut ctx = VisitContext::new(&self.ancestors, &self.path);
            self.visitor.enter(node, &mut ctx);
            ctx.control
        };
        if let Some(edit) = entered.edit {
            self.edits.record(self.path.clone(), edit);
            return match self.halt_if(entered.stop) {
                Flow::Halt => Step::Halt,
                Flow::Continue => Step::Settled,
            };
        }
        if entered.stop {
            self.halt_if(true);
            return Step::Halt;
        }
        if entered.skip { Step::Leave } else { Step::Descend }
    }

    /// Runs the exit callback; `node` must no longer be on the ancestor stack.
    fn leave(&mut self, node: &'t Node) -> Flow {
        let exited = {
            let mut ctx = VisitContext::new(&self.ancestors, &self.path);
            self.visitor.exit(node, &mut ctx);
            ctx.control
        };
        if let Some(edit) = exited.edit {
            self.edits.record(self.path.clone(), edit);
        }
        self.halt_if(exited.stop)
    }

    fn halt_if(&mut self, stop: bool) -> Flow {
        if stop {
            self.completion = Completion::Stopped;
            Flow::Halt
        } else {
            Flow::Continue
        }
    }
}

/// Walks `root` in pre-order, calling `visitor` around every node.
///
/// Requested edits are returned, not applied; see [`rewrite`] for a walk
/// that applies them.
pub fn traverse<'t, V: Visitor<'t>>(
    root: &'t Node,
    visitor: &mut V,
    limits: TraversalLimits,
) -> Traversal {
    let mut walker = Walker {
        visitor,
        ancestors: Vec::new(),
        path: NodePath::root(),
        limits,
        visited: 0,
        edits: EditScript::default(),
        completion: Completion::Finished,
    };
    walker.walk(root);
    Traversal {
        completion: walker.completion,
        visited: walker.visited,
        edits: walker.edits,
    }
}

struct FnVisitor<F>(F);

impl<'t, F> Visitor<'t> for FnVisitor<F>
where
    F: FnMut(&'t Node, &mut VisitContext<'_, 't>),
{
    fn enter(&mut self, node: &'t Node, ctx: &mut VisitContext<'_, 't>) {
        (self.0)(node, ctx);
    }
}

/// Walks `root` with an enter callback and applies the requested edits.
///
/// # Errors
///
/// Returns [`SyntaxError::VisitError`] when the depth ceiling is hit or a
/// requested edit cannot be applied. The tree is left untouched in both
/// cases.
pub fn rewrite<F>(
    root: &mut Node,
    limits: TraversalLimits,
    callback: F,
) -> Result<usize, SyntaxError>
where
    F: for<'t> FnMut(&'t Node, &mut VisitContext<'_, 't>),
{
    let traversal = {
        let mut visitor = FnVisitor(callback);
        traverse(&*root, &mut visitor, limits)
    };
    if let Completion::DepthLimitExceeded { limit } = traversal.completion {
        return Err(SyntaxError::visit(format!(
            "tree is deeper than the limit of {limit}"
        )));
    }
    let applied = traversal.edits.len();
    let mut working = root.clone();
    traversal.edits.apply(&mut working)?;
    *root = working;
    Ok(applied)
}

/// A node found by [`collect`] or [`find`], with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef<'t> {
    /// The node.
    pub node: &'t Node,
    /// The node's parent, or `None` for the root.
    pub parent: Option<&'t Node>,
    /// Path from the root to the node.
    pub path: NodePath,
    /// Depth of the node; the root is depth zero.
    pub depth: usize,
}

/// Collects every node matching `predicate`, in pre-order.
pub fn collect<'t>(
    root: &'t Node,
    limits: TraversalLimits,
    mut predicate: impl FnMut(&'t Node) -> bool,
) -> Vec<NodeRef<'t>> {
    let mut found = Vec::new();
    let mut visitor = FnVisitor(|node: &'t Node, ctx: &mut VisitContext<'_, 't>| {
        if predicate(node) {
            found.push(NodeRef {
                node,
                parent: ctx.parent(),
                path: ctx.path().clone(),
                depth: ctx.depth(),
            });
        }
    });
    traverse(root, &mut visitor, limits);
    found
}

/// Returns the first node matching `predicate`, in pre-order.
pub fn find<'t>(
    root: &'t Node,
    limits: TraversalLimits,
    mut predicate: impl FnMut(&'t Node) -> bool,
) -> Option<NodeRef<'t>> {
    let mut found = None;
    let mut visitor = FnVisitor(|node: &'t Node, ctx: &mut VisitContext<'_, 't>| {
        if predicate(node) {
            found = Some(NodeRef {
                node,
                parent: ctx.parent(),
                path: ctx.path().clone(),
                depth: ctx.depth(),
            });
            ctx.stop();
        }
    });
    traverse(root, &mut visitor, limits);
    found
}
