//! Traversal orders, the in-order iterator and a structural dump.
//!
//! # Examples
//!
//! ```
//! use avl::{Order, Tree};
//!
//! let tree: Tree<_, _> = (1..=7).map(|x| (x, ())).collect();
//!
//! let keys = |order| tree.traverse(order).into_iter().map(|(k, _)| *k).collect::<Vec<_>>();
//! assert_eq!(keys(Order::Pre), [4, 2, 1, 3, 6, 5, 7]);
//! assert_eq!(keys(Order::In), [1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(keys(Order::Post), [1, 3, 2, 5, 7, 6, 4]);
//! assert_eq!(keys(Order::Level), [4, 2, 6, 1, 3, 5, 7]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::node::Node;
use crate::tree::Tree;

/// The order in which [`Tree::visit`] and [`Tree::traverse`] reach nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, then node, then right subtree. Keys come out ascending.
    In,
    /// Left subtree, then right subtree, then node.
    Post,
    /// Breadth first, top to bottom and left to right within a level.
    Level,
}

impl<K, V> Tree<K, V> {
    /// Calls `f` on every entry in the given order.
    pub fn visit<'a, F>(&'a self, order: Order, mut f: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        let Some(root) = self.root() else {
            return;
        };
        match order {
            Order::Pre => pre_order(root, &mut f),
            Order::In => in_order(root, &mut f),
            Order::Post => post_order(root, &mut f),
            Order::Level => level_order(root, &mut f),
        }
    }

    /// Collects every entry in the given order.
    pub fn traverse(&self, order: Order) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.len());
        self.visit(order, |k, v| entries.push((k, v)));
        entries
    }

    /// An iterator over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    ///
    /// assert!(tree.iter().eq([(&1, &'a'), (&2, &'b'), (&3, &'c')]));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height()),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root());
        iter
    }

    /// A [`Display`][fmt::Display] adapter drawing the tree on its side: the right subtree
    /// first, then the node indented by its depth, then the left subtree. Reading the output
    /// with the head tilted to the left shows the usual top-down picture.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_, _> = [(10, ()), (20, ()), (30, ())].into_iter().collect();
    ///
    /// assert_eq!(tree.dump().to_string(), "    30\n20\n    10\n");
    /// ```
    pub fn dump(&self) -> Dump<'_, K, V> {
        Dump { tree: self }
    }
}

fn pre_order<'a, K, V>(node: &'a Node<K, V>, f: &mut impl FnMut(&'a K, &'a V)) {
    f(&node.key, &node.value);
    if let Some(left) = node.left() {
        pre_order(left, f);
    }
    if let Some(right) = node.right() {
        pre_order(right, f);
    }
}

fn in_order<'a, K, V>(node: &'a Node<K, V>, f: &mut impl FnMut(&'a K, &'a V)) {
    if let Some(left) = node.left() {
        in_order(left, f);
    }
    f(&node.key, &node.value);
    if let Some(right) = node.right() {
        in_order(right, f);
    }
}

fn post_order<'a, K, V>(node: &'a Node<K, V>, f: &mut impl FnMut(&'a K, &'a V)) {
    if let Some(left) = node.left() {
        post_order(left, f);
    }
    if let Some(right) = node.right() {
        post_order(right, f);
    }
    f(&node.key, &node.value);
}

fn level_order<'a, K, V>(root: &'a Node<K, V>, f: &mut impl FnMut(&'a K, &'a V)) {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        f(&node.key, &node.value);
        queue.extend(node.left());
        queue.extend(node.right());
    }
}

/// In-order iterator over a [`Tree`], created by [`Tree::iter`].
///
/// The stack holds the nodes whose left subtree has been (or is being) yielded but which haven't
/// been yielded themselves, so it never grows past the tree's height.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sideways drawing of a [`Tree`], created by [`Tree::dump`].
pub struct Dump<'a, K, V> {
    tree: &'a Tree<K, V>,
}

impl<K, V> Dump<'_, K, V>
where
    K: fmt::Display,
{
    fn node_fmt(f: &mut fmt::Formatter<'_>, node: &Node<K, V>, depth: usize) -> fmt::Result {
        if let Some(right) = node.right() {
            Self::node_fmt(f, right, depth + 1)?;
        }
        writeln!(f, "{:indent$}{}", "", node.key, indent = depth * 4)?;
        if let Some(left) = node.left() {
            Self::node_fmt(f, left, depth + 1)?;
        }
        Ok(())
    }
}

impl<K, V> fmt::Display for Dump<'_, K, V>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(root) = self.tree.root() {
            Self::node_fmt(f, root, 0)?;
        }

        Ok(())
    }
}
