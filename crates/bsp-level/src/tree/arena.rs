//! Arena storage for binary trees.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`BinaryTree`].
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node slot in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot<T> {
    value: T,
    parent: Option<NodeId>,
    /// Left and right child. Both present or both absent.
    children: Option<[NodeId; 2]>,
}

/// A strictly binary tree stored as a flat arena.
///
/// Every node is either a leaf or has exactly two children. Parent and
/// child links are indices, so the tree has no owning cycles and can be
/// traversed from any number of readers at once. Nodes are never removed;
/// the whole tree is dropped at once.
///
/// Traversals live in free functions in [`crate::tree`] rather than on the
/// node type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryTree<T> {
    slots: Vec<Slot<T>>,
}

impl<T> BinaryTree<T> {
    /// Creates a tree consisting of a single root leaf.
    pub fn new(root: T) -> Self {
        Self {
            slots: vec![Slot {
                value: root,
                parent: None,
                children: None,
            }],
        }
    }

    /// Returns the root id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes (internal and leaves).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// A tree always holds at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `id` belongs to this tree.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.slots.len()
    }

    /// Returns the value stored at `id`, if any.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0).map(|slot| &slot.value)
    }

    /// Returns a mutable reference to the value stored at `id`, if any.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0).map(|slot| &mut slot.value)
    }

    /// Returns the parent of `id`, or `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    /// Returns the `[left, right]` children of `id`, or `None` for a leaf.
    #[inline]
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 2]> {
        self.slots.get(id.0).and_then(|slot| slot.children)
    }

    /// Returns the left child of `id`.
    #[inline]
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).map(|[left, _]| left)
    }

    /// Returns the right child of `id`.
    #[inline]
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).map(|[_, right]| right)
    }

    /// Returns `true` if `id` has no children.
    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_none()
    }

    /// Turns the leaf `id` into an internal node with two new children and
    /// returns their ids as `[left, right]`.
    ///
    /// # Panics
    /// Panics if `id` is not a leaf of this tree. Splitting is only done by
    /// the partitioner, which only ever splits fresh leaves.
    pub fn split(&mut self, id: NodeId, left: T, right: T) -> [NodeId; 2] {
        assert!(self.contains(id), "node {id:?} does not belong to this tree");
        assert!(self.is_leaf(id), "node {id:?} is already split");

        let left_id = NodeId(self.slots.len());
        let right_id = NodeId(self.slots.len() + 1);
        for value in [left, right] {
            self.slots.push(Slot {
                value,
                parent: Some(id),
                children: None,
            });
        }
        self.slots[id.0].children = Some([left_id, right_id]);
        [left_id, right_id]
    }

    /// Iterates over all nodes in arena (creation) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (NodeId(index), &slot.value))
    }
}

impl<T> Index<NodeId> for BinaryTree<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        &self.slots[id.0].value
    }
}

impl<T> IndexMut<NodeId> for BinaryTree<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.slots[id.0].value
    }
}
