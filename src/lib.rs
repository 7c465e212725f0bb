//! This crate exposes a height-balanced Binary Search Tree (an AVL tree).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is the
//! longest path from the root `Node` to a leaf `Node`).
//!
//! ## AVL Trees
//!
//! An AVL tree adds one more invariant: for every `Node`, the heights of its
//! two subtrees differ by at most one. Each `Node` caches that difference as
//! its [`Balance`] and inserts and deletes keep it current on their way back
//! up from the modified leaf, rotating subtrees where a difference of two
//! would appear. This bounds the height at roughly `1.44 lg N`, so every
//! operation is `O(lg N)`.
//!
//! ```
//! use avl::{Order, Tree};
//!
//! let mut tree = Tree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key, key.to_string());
//! }
//!
//! // Inserting in ascending order rotated 20 up to the root.
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), &20);
//! assert_eq!(tree.height(), 2);
//!
//! let keys: Vec<_> = tree.traverse(Order::In).into_iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [10, 20, 30]);
//! ```
//!
//! The tree is single-threaded and not internally synchronized. Share it across threads behind a
//! lock around every call.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
mod node;
mod rebalance;
mod traverse;
mod tree;
mod util;

pub use error::{AllocError, InvariantError};
pub use node::{Balance, Node};
pub use traverse::{Dump, Iter, Order};
pub use tree::Tree;
