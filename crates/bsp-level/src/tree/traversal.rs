//! Traversal functions over [`BinaryTree`].

use super::arena::{BinaryTree, NodeId};

/// Pre-order, left-to-right depth-first iterator.
///
/// Created by [`depth_first`].
#[derive(Debug, Clone)]
pub struct DepthFirst<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for DepthFirst<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some([left, right]) = self.tree.children(id) {
            // Right first so the left subtree is popped first.
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(id)
    }
}

/// Iterator over the ancestors of a node, from its parent up to the root.
///
/// Created by [`ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a, T> {
    tree: &'a BinaryTree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}

/// Visits `from` and all of its descendants in pre-order, left before right.
///
/// Yields nothing if `from` does not belong to `tree`.
pub fn depth_first<T>(tree: &BinaryTree<T>, from: NodeId) -> DepthFirst<'_, T> {
    let stack = if tree.contains(from) { vec![from] } else { Vec::new() };
    DepthFirst { tree, stack }
}

/// Returns the leaves under `from` (including `from` itself if it is a leaf)
/// in left-to-right order.
pub fn leaves<T>(tree: &BinaryTree<T>, from: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    depth_first(tree, from).filter(move |&id| tree.is_leaf(id))
}

/// Returns the ancestors of `id`, nearest first, ending with the root.
pub fn ancestors<T>(tree: &BinaryTree<T>, id: NodeId) -> Ancestors<'_, T> {
    Ancestors {
        tree,
        next: tree.parent(id),
    }
}

/// Returns the number of ancestors of `id` (0 for the root).
pub fn depth<T>(tree: &BinaryTree<T>, id: NodeId) -> usize {
    ancestors(tree, id).count()
}

/// Returns `true` if `ancestor` is a proper ancestor of `id`.
pub fn is_ancestor<T>(tree: &BinaryTree<T>, ancestor: NodeId, id: NodeId) -> bool {
    ancestors(tree, id).any(|a| a == ancestor)
}

/// Returns the deepest node that has both `a` and `b` in its subtree.
///
/// A node counts as being in its own subtree, so the result is `a` when `a`
/// is an ancestor of `b`. Returns `None` if either id is foreign.
pub fn lowest_common_ancestor<T>(tree: &BinaryTree<T>, a: NodeId, b: NodeId) -> Option<NodeId> {
    if !tree.contains(a) || !tree.contains(b) {
        return None;
    }
    let path_a: Vec<NodeId> = std::iter::once(a).chain(ancestors(tree, a)).collect();
    std::iter::once(b)
        .chain(ancestors(tree, b))
        .find(|candidate| path_a.contains(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds:
    /// ```text
    ///        0
    ///      /   \
    ///     1     2
    ///    / \
    ///   3   4
    ///      / \
    ///     5   6
    /// ```
    fn make_tree() -> (BinaryTree<u32>, [NodeId; 7]) {
        let mut tree = BinaryTree::new(0);
        let root = tree.root();
        let [n1, n2] = tree.split(root, 1, 2);
        let [n3, n4] = tree.split(n1, 3, 4);
        let [n5, n6] = tree.split(n4, 5, 6);
        (tree, [root, n1, n2, n3, n4, n5, n6])
    }

    #[test]
    fn depth_first_is_preorder_left_first() {
        let (tree, _) = make_tree();
        let values: Vec<u32> = depth_first(&tree, tree.root()).map(|id| tree[id]).collect();
        assert_eq!(values, vec![0, 1, 3, 4, 5, 6, 2]);
    }

    #[test]
    fn leaves_in_left_to_right_order() {
        let (tree, _) = make_tree();
        let values: Vec<u32> = leaves(&tree, tree.root()).map(|id| tree[id]).collect();
        assert_eq!(values, vec![3, 5, 6, 2]);
    }

    #[test]
    fn leaves_of_subtree() {
        let (tree, ids) = make_tree();
        let values: Vec<u32> = leaves(&tree, ids[4]).map(|id| tree[id]).collect();
        assert_eq!(values, vec![5, 6]);

        let single: Vec<NodeId> = leaves(&tree, ids[2]).collect();
        assert_eq!(single, vec![ids[2]]);
    }

    #[test]
    fn ancestors_run_to_root() {
        let (tree, ids) = make_tree();
        let chain: Vec<NodeId> = ancestors(&tree, ids[5]).collect();
        assert_eq!(chain, vec![ids[4], ids[1], ids[0]]);
        assert_eq!(ancestors(&tree, ids[0]).count(), 0);
    }

    #[test]
    fn depth_counts_ancestors() {
        let (tree, ids) = make_tree();
        assert_eq!(depth(&tree, ids[0]), 0);
        assert_eq!(depth(&tree, ids[2]), 1);
        assert_eq!(depth(&tree, ids[3]), 2);
        assert_eq!(depth(&tree, ids[6]), 3);
    }

    #[test]
    fn ancestor_relation() {
        let (tree, ids) = make_tree();
        assert!(is_ancestor(&tree, ids[1], ids[5]));
        assert!(is_ancestor(&tree, ids[0], ids[2]));
        assert!(!is_ancestor(&tree, ids[2], ids[5]));
        assert!(!is_ancestor(&tree, ids[5], ids[5]));
    }

    #[test]
    fn lowest_common_ancestor_cases() {
        let (tree, ids) = make_tree();
        assert_eq!(lowest_common_ancestor(&tree, ids[5], ids[6]), Some(ids[4]));
        assert_eq!(lowest_common_ancestor(&tree, ids[3], ids[6]), Some(ids[1]));
        assert_eq!(lowest_common_ancestor(&tree, ids[3], ids[2]), Some(ids[0]));
        assert_eq!(lowest_common_ancestor(&tree, ids[1], ids[5]), Some(ids[1]));
    }
}
