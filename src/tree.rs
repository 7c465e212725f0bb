//! The owning tree and its recursive insert/delete algorithms.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), None);
//!
//! assert!(tree.insert(1, 2));
//! assert_eq!(tree.search(&1), Some(&2));
//!
//! // Duplicate keys are rejected and the stored value is kept.
//! assert!(!tree.insert(1, 3));
//! assert_eq!(tree.search(&1), Some(&2));
//!
//! // Deleting reports whether anything was there.
//! assert!(tree.delete(&1));
//! assert!(!tree.delete(&1));
//! assert!(tree.is_empty());
//! ```

use std::alloc::handle_alloc_error;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::{AllocError, InvariantError};
use crate::node::{Link, Node};
use crate::rebalance;
use crate::util::{Height, Insertion, Removal};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) mapping unique keys to values.
///
/// Every node caches its balance factor and the insert and delete paths update those factors on
/// the way back up, rotating wherever a subtree would lean by two levels.
#[derive(Clone)]
pub struct Tree<K, V> {
    pub(crate) root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts `value` under `key`. Returns `false`, leaving the tree untouched, when `key` is
    /// already present.
    ///
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] when a node can't be allocated. Use
    /// [`try_insert`][Self::try_insert] to handle that case instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert("a", 1));
    /// assert!(!tree.insert("a", 2));
    /// assert_eq!(tree.search("a"), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Ord,
    {
        match self.try_insert(key, value) {
            Ok(inserted) => inserted,
            Err(AllocError { layout }) => handle_alloc_error(layout),
        }
    }

    /// Like [`insert`][Self::insert] but reports allocation failure as an error. The tree is
    /// unchanged when an error is returned.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, AllocError>
    where
        K: Ord,
    {
        match insert(&mut self.root, key, value)? {
            Insertion::Duplicate => {
                log::debug!("rejected duplicate key");
                Ok(false)
            }
            Insertion::Added(_) => {
                self.len += 1;
                Ok(true)
            }
        }
    }

    /// Deletes the node holding `key`. Returns whether there was one.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Deletes the node holding `key` and returns its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Deletes the node holding `key` and returns its key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match remove(&mut self.root, key) {
            Removal::NotFound => None,
            Removal::Removed { entry, .. } => {
                self.len -= 1;
                Some(entry)
            }
        }
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root().and_then(|n| n.find(key)).map(Node::value)
    }

    /// Alias of [`search`][Self::search].
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key)
    }

    /// A mutable reference to the value stored under `key`. Keys themselves can't be changed in
    /// place since that could break the ordering.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root
            .as_deref_mut()
            .and_then(|n| n.find_mut(key))
            .map(|n| &mut n.value)
    }

    /// Whether a node holds `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.root().map(Node::min).map(|n| (n.key(), n.value()))
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root().map(Node::max).map(|n| (n.key(), n.value()))
    }

    /// The number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of levels in the tree, 0 when empty. This is `O(lg N)` since it only walks the
    /// heavier side of each node.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// The root node, for inspecting the tree's shape.
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Walks the whole tree and checks that keys are strictly ascending, that every cached
    /// balance matches the real subtree heights and stays within one level, and that the tracked
    /// length matches the number of nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_, _> = (0..100).map(|x| (x, x)).collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        K: Ord,
    {
        let mut walk = Validation {
            previous: None,
            position: 0,
        };
        walk.check(self.root(), 0)?;

        if walk.position != self.len {
            return Err(InvariantError::LenMismatch {
                tracked: self.len,
                reachable: walk.position,
            });
        }
        Ok(())
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    /// Inserts every pair in order. Pairs whose key is already present are dropped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Inserts into the subtree owned by `slot`, rebalancing on the way back up.
fn insert<K, V>(slot: &mut Link<K, V>, key: K, value: V) -> Result<Insertion, AllocError>
where
    K: Ord,
{
    let Some(node) = slot.as_mut() else {
        *slot = Some(Node::try_new_boxed(key, value)?);
        return Ok(Insertion::Added(Height::Changed));
    };

    let insertion = match key.cmp(&node.key) {
        Ordering::Less => match insert(&mut node.left, key, value)? {
            Insertion::Added(Height::Changed) => Insertion::Added(rebalance::left_grew(node)),
            insertion => insertion,
        },
        Ordering::Equal => Insertion::Duplicate,
        Ordering::Greater => match insert(&mut node.right, key, value)? {
            Insertion::Added(Height::Changed) => Insertion::Added(rebalance::right_grew(node)),
            insertion => insertion,
        },
    };
    Ok(insertion)
}

/// Deletes `key` from the subtree owned by `slot`, rebalancing on the way back up.
fn remove<K, V, Q>(slot: &mut Link<K, V>, key: &Q) -> Removal<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(node) = slot.as_mut() else {
        return Removal::NotFound;
    };

    match key.cmp(node.key.borrow()) {
        Ordering::Less => match remove(&mut node.left, key) {
            Removal::Removed {
                entry,
                height: Height::Changed,
            } => Removal::Removed {
                entry,
                height: rebalance::left_shrank(node),
            },
            removal => removal,
        },
        Ordering::Greater => match remove(&mut node.right, key) {
            Removal::Removed {
                entry,
                height: Height::Changed,
            } => Removal::Removed {
                entry,
                height: rebalance::right_shrank(node),
            },
            removal => removal,
        },
        Ordering::Equal => {
            // With two children we promote this node's predecessor, the largest node in the left
            // subtree. Its payload moves in here and the predecessor's node is the one destroyed.
            if node.right.is_some() {
                if let Some((mut predecessor, height)) = detach_max(&mut node.left) {
                    mem::swap(&mut node.key, &mut predecessor.key);
                    mem::swap(&mut node.value, &mut predecessor.value);
                    let height = match height {
                        Height::Changed => rebalance::left_shrank(node),
                        Height::Unchanged => Height::Unchanged,
                    };
                    return Removal::Removed {
                        entry: predecessor.into_entry(),
                        height,
                    };
                }
            }

            // At most one child: it takes our place.
            let child = node.left.take().or_else(|| node.right.take());
            match mem::replace(slot, child) {
                Some(removed) => Removal::Removed {
                    entry: removed.into_entry(),
                    height: Height::Changed,
                },
                None => Removal::NotFound,
            }
        }
    }
}

/// Unlinks the rightmost node of the subtree owned by `slot`, splicing its left child into its
/// place. Returns the detached node and whether the subtree shrank.
fn detach_max<K, V>(slot: &mut Link<K, V>) -> Option<(Box<Node<K, V>>, Height)> {
    let node = slot.as_mut()?;
    if node.right.is_some() {
        let (max, height) = detach_max(&mut node.right)?;
        let height = match height {
            Height::Changed => rebalance::right_shrank(node),
            Height::Unchanged => Height::Unchanged,
        };
        return Some((max, height));
    }

    let mut max = slot.take()?;
    *slot = max.left.take();
    Some((max, Height::Changed))
}

/// State for [`Tree::validate`]'s in-order walk.
struct Validation<'a, K> {
    previous: Option<&'a K>,
    position: usize,
}

impl<'a, K: Ord> Validation<'a, K> {
    /// Checks the subtree rooted at `node` and returns its measured height.
    fn check<V>(
        &mut self,
        node: Option<&'a Node<K, V>>,
        depth: usize,
    ) -> Result<usize, InvariantError> {
        let Some(node) = node else {
            return Ok(0);
        };

        let left_height = self.check(node.left(), depth + 1)?;

        if self.previous.is_some_and(|previous| previous >= node.key()) {
            return Err(InvariantError::OutOfOrder {
                position: self.position,
            });
        }
        self.previous = Some(node.key());
        self.position += 1;

        let right_height = self.check(node.right(), depth + 1)?;

        let difference = right_height as isize - left_height as isize;
        if difference.abs() > 1 {
            return Err(InvariantError::Unbalanced { depth, difference });
        }
        let cached = node.balance().factor();
        if isize::from(cached) != difference {
            return Err(InvariantError::BalanceMismatch {
                depth,
                cached,
                actual: difference,
            });
        }

        Ok(left_height.max(right_height) + 1)
    }
}
