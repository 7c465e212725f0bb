//! Error types. Duplicate inserts and deletes of missing keys are not errors, they are reported
//! through `bool`/`Option` results instead.

use std::alloc::Layout;

use thiserror::Error;

/// The global allocator could not provide memory for a new [`Node`][crate::Node].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("failed to allocate {} bytes for a tree node", .layout.size())]
pub struct AllocError {
    /// The layout of the node that couldn't be allocated.
    pub layout: Layout,
}

/// A structural problem found by [`Tree::validate`][crate::Tree::validate].
///
/// Positions are in-order indices (0 is the smallest key), depths count the root as 0.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A key is not strictly greater than its in-order predecessor.
    #[error("key at in-order position {position} is not greater than its predecessor")]
    OutOfOrder {
        /// In-order position of the offending key.
        position: usize,
    },

    /// A node's cached balance factor disagrees with the heights of its subtrees.
    #[error("node at depth {depth} caches balance {cached} but its subtrees differ by {actual}")]
    BalanceMismatch {
        /// Depth of the offending node.
        depth: usize,
        /// The balance factor stored in the node.
        cached: i8,
        /// `height(right) - height(left)` as measured.
        actual: isize,
    },

    /// A node's subtrees differ in height by more than one.
    #[error("node at depth {depth} has subtrees differing in height by {difference}")]
    Unbalanced {
        /// Depth of the offending node.
        depth: usize,
        /// `height(right) - height(left)` as measured.
        difference: isize,
    },

    /// The tracked length doesn't match the number of reachable nodes.
    #[error("tree tracks {tracked} entries but {reachable} nodes are reachable")]
    LenMismatch {
        /// The count the tree keeps.
        tracked: usize,
        /// The count found by walking the tree.
        reachable: usize,
    },
}
