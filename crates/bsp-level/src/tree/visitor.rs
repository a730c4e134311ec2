//! Visitor pattern for depth-aware tree walks.
//!
//! Visitors allow custom processing of nodes during a walk without
//! recomputing each node's depth from its ancestor chain.

use super::arena::{BinaryTree, NodeId};

/// A node as seen by a [`TreeVisitor`].
#[derive(Debug)]
pub struct VisitedNode<'a, T> {
    pub id: NodeId,
    pub value: &'a T,
    /// Number of ancestors (0 for the root).
    pub depth: usize,
    pub is_leaf: bool,
}

/// Visitor for processing nodes during a depth-first walk.
pub trait TreeVisitor<T> {
    /// Called once per node, in pre-order, left before right.
    fn visit(&mut self, node: VisitedNode<'_, T>);
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F> {
    func: F,
}

impl<F> FnVisitor<F> {
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<T, F> TreeVisitor<T> for FnVisitor<F>
where
    F: FnMut(VisitedNode<'_, T>),
{
    fn visit(&mut self, node: VisitedNode<'_, T>) {
        (self.func)(node);
    }
}

/// Walks the subtree rooted at `from` depth-first (pre-order, left before
/// right), handing every node to `visitor`.
///
/// Depths are reported relative to the tree root, not to `from`.
pub fn walk<T, V: TreeVisitor<T>>(tree: &BinaryTree<T>, from: NodeId, visitor: &mut V) {
    let Some(value) = tree.get(from) else {
        return;
    };
    let mut stack = vec![(from, super::depth(tree, from), value)];
    while let Some((id, depth, value)) = stack.pop() {
        let children = tree.children(id);
        if let Some([left, right]) = children {
            stack.push((right, depth + 1, &tree[right]));
            stack.push((left, depth + 1, &tree[left]));
        }
        visitor.visit(VisitedNode {
            id,
            value,
            depth,
            is_leaf: children.is_none(),
        });
    }
}
