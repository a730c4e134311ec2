//! Generic arena-backed binary tree.
//!
//! The room hierarchy is stored in a [`BinaryTree`], a flat arena of nodes
//! addressed by [`NodeId`]. Parent/child links are indices rather than
//! owning pointers, and every traversal is a free function:
//!
//! - [`depth_first`] / [`leaves`]: pre-order, left-to-right enumeration
//! - [`ancestors`] / [`depth`]: walking up towards the root
//! - [`lowest_common_ancestor`]: relating two nodes
//! - [`walk`] with a [`TreeVisitor`]: depth-aware custom processing

mod arena;
mod traversal;
mod visitor;

pub use arena::{BinaryTree, NodeId};
pub use traversal::{
    Ancestors, DepthFirst, ancestors, depth, depth_first, is_ancestor, leaves,
    lowest_common_ancestor,
};
pub use visitor::{FnVisitor, TreeVisitor, VisitedNode, walk};
