//! The storage unit of a [`Tree`][crate::Tree]. Nodes only carry data; all invariant maintenance
//! lives in the tree's algorithms.

use std::alloc::{self, Layout};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ptr::NonNull;

use crate::error::AllocError;

/// An exclusively owned child slot. `None` marks an empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// The cached height difference `height(right) - height(left)` of a node. An AVL tree never
/// stores anything outside of these three states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Balance {
    /// The left subtree is one level taller.
    LeftHeavy,
    /// Both subtrees have the same height.
    Even,
    /// The right subtree is one level taller.
    RightHeavy,
}

impl Balance {
    /// The balance as a signed factor: -1, 0 or +1.
    pub fn factor(self) -> i8 {
        match self {
            Self::LeftHeavy => -1,
            Self::Even => 0,
            Self::RightHeavy => 1,
        }
    }
}

/// A `Node` has a key that is used for searching/sorting and a value that is associated with
/// that key. Either child may be missing.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) balance: Balance,
}

impl<K, V> Node<K, V> {
    /// Allocates a new leaf, reporting allocation failure instead of aborting.
    pub(crate) fn try_new_boxed(key: K, value: V) -> Result<Box<Self>, AllocError> {
        let layout = Layout::new::<Self>();
        // SAFETY: `Node` always contains two `Option<Box<_>>` links so its layout is never
        // zero-sized, which is the only requirement of `alloc`.
        let Some(ptr) = NonNull::new(unsafe { alloc::alloc(layout) }.cast::<Self>()) else {
            log::warn!("node allocation of {} bytes failed", layout.size());
            return Err(AllocError { layout });
        };

        // SAFETY: `ptr` was just returned by the global allocator for `Layout::new::<Self>()` so
        // it is valid for writes and properly aligned. After the write it points to an
        // initialized `Node`, and `Box` uses the same allocator and layout to free it.
        unsafe {
            ptr.as_ptr().write(Self {
                key,
                value,
                left: None,
                right: None,
                balance: Balance::Even,
            });
            Ok(Box::from_raw(ptr.as_ptr()))
        }
    }

    /// The key this node is sorted by.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored alongside the key.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The cached `height(right) - height(left)` of this node.
    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Consumes a detached node, handing back its payload.
    pub(crate) fn into_entry(self: Box<Self>) -> (K, V) {
        let Self { key, value, .. } = *self;
        (key, value)
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Less => self.left().and_then(|n| n.find(key)),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right().and_then(|n| n.find(key)),
        }
    }

    pub(crate) fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut Self>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Less => self.left.as_deref_mut().and_then(|n| n.find_mut(key)),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right.as_deref_mut().and_then(|n| n.find_mut(key)),
        }
    }

    /// The height of the subtree rooted here. Only the cached balances are consulted: the taller
    /// side is always the one the balance leans towards.
    pub(crate) fn height(&self) -> usize {
        let taller = match self.balance {
            Balance::LeftHeavy | Balance::Even => self.left(),
            Balance::RightHeavy => self.right(),
        };
        1 + taller.map_or(0, Self::height)
    }

    /// Leftmost node of this subtree.
    pub(crate) fn min(&self) -> &Self {
        self.left().map_or(self, Self::min)
    }

    /// Rightmost node of this subtree.
    pub(crate) fn max(&self) -> &Self {
        self.right().map_or(self, Self::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_nodes_are_even_leaves() {
        let node = Node::try_new_boxed(1, "one").unwrap();

        assert_eq!(node.key(), &1);
        assert_eq!(node.value(), &"one");
        assert_eq!(node.balance(), Balance::Even);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
        assert_eq!(node.height(), 1);
    }

    #[test]
    fn zero_sized_payloads_still_allocate() {
        let node = Node::try_new_boxed((), ()).unwrap();

        assert_eq!(node.into_entry(), ((), ()));
    }

    #[test]
    fn balance_factors() {
        assert_eq!(Balance::LeftHeavy.factor(), -1);
        assert_eq!(Balance::Even.factor(), 0);
        assert_eq!(Balance::RightHeavy.factor(), 1);
    }

    #[test]
    fn height_follows_the_heavy_side() {
        let mut root = Node::try_new_boxed(2, ()).unwrap();
        let mut right = Node::try_new_boxed(3, ()).unwrap();
        right.right = Some(Node::try_new_boxed(4, ()).unwrap());
        right.balance = Balance::RightHeavy;
        root.left = Some(Node::try_new_boxed(1, ()).unwrap());
        root.right = Some(right);
        root.balance = Balance::RightHeavy;

        assert_eq!(root.height(), 3);
        assert_eq!(root.min().key(), &1);
        assert_eq!(root.max().key(), &4);
        assert_eq!(root.find(&3).map(Node::key), Some(&3));
        assert!(root.find(&5).is_none());
    }
}
