//! Rotations and the balance bookkeeping that goes with them.
//!
//! All functions here work on `&mut Box<Node>`, the slot that owns the subtree root. A rotation
//! moves child ownership between slots and then swaps the new root into the slot, so every node
//! keeps exactly one owner throughout.
//!
//! See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.

use std::mem;

use crate::node::{Balance, Node};
use crate::util::Height;

/// Re-derives the balance of `node` after its left subtree grew taller. Returns whether `node`'s
/// subtree grew taller in turn.
pub(crate) fn left_grew<K, V>(node: &mut Box<Node<K, V>>) -> Height {
    match node.balance {
        Balance::RightHeavy => {
            node.balance = Balance::Even;
            Height::Unchanged
        }
        Balance::Even => {
            node.balance = Balance::LeftHeavy;
            Height::Changed
        }
        Balance::LeftHeavy => {
            left_heavy_after_insert(node);
            Height::Unchanged
        }
    }
}

/// Mirror of [`left_grew`].
pub(crate) fn right_grew<K, V>(node: &mut Box<Node<K, V>>) -> Height {
    match node.balance {
        Balance::LeftHeavy => {
            node.balance = Balance::Even;
            Height::Unchanged
        }
        Balance::Even => {
            node.balance = Balance::RightHeavy;
            Height::Changed
        }
        Balance::RightHeavy => {
            right_heavy_after_insert(node);
            Height::Unchanged
        }
    }
}

/// Re-derives the balance of `node` after its left subtree shrank. Returns whether `node`'s
/// subtree shrank in turn.
pub(crate) fn left_shrank<K, V>(node: &mut Box<Node<K, V>>) -> Height {
    match node.balance {
        Balance::LeftHeavy => {
            node.balance = Balance::Even;
            Height::Changed
        }
        Balance::Even => {
            node.balance = Balance::RightHeavy;
            Height::Unchanged
        }
        Balance::RightHeavy => right_heavy_after_delete(node),
    }
}

/// Mirror of [`left_shrank`].
pub(crate) fn right_shrank<K, V>(node: &mut Box<Node<K, V>>) -> Height {
    match node.balance {
        Balance::RightHeavy => {
            node.balance = Balance::Even;
            Height::Changed
        }
        Balance::Even => {
            node.balance = Balance::LeftHeavy;
            Height::Unchanged
        }
        Balance::LeftHeavy => left_heavy_after_delete(node),
    }
}

/// `node` was already left heavy and its left subtree grew. Afterwards the subtree has the height
/// it had before the insert.
fn left_heavy_after_insert<K, V>(node: &mut Box<Node<K, V>>) {
    match child_balance(node.left.as_deref()) {
        Balance::LeftHeavy => {
            log::trace!("insert: single right rotation");
            node.balance = Balance::Even;
            set_balance(node.left.as_deref_mut(), Balance::Even);
            rotate_right(node);
        }
        Balance::RightHeavy => {
            log::trace!("insert: left-right rotation");
            rotate_left_right(node);
        }
        // A subtree that just grew taller always leans towards the side that grew.
        Balance::Even => unreachable!("left subtree grew taller but is evenly balanced"),
    }
}

/// Mirror of [`left_heavy_after_insert`].
fn right_heavy_after_insert<K, V>(node: &mut Box<Node<K, V>>) {
    match child_balance(node.right.as_deref()) {
        Balance::RightHeavy => {
            log::trace!("insert: single left rotation");
            node.balance = Balance::Even;
            set_balance(node.right.as_deref_mut(), Balance::Even);
            rotate_left(node);
        }
        Balance::LeftHeavy => {
            log::trace!("insert: right-left rotation");
            rotate_right_left(node);
        }
        Balance::Even => unreachable!("right subtree grew taller but is evenly balanced"),
    }
}

/// `node` was already left heavy and its right subtree shrank. Returns whether the rotated
/// subtree ended up shorter than it was before the delete.
fn left_heavy_after_delete<K, V>(node: &mut Box<Node<K, V>>) -> Height {
    match child_balance(node.left.as_deref()) {
        Balance::LeftHeavy => {
            log::trace!("delete: single right rotation");
            node.balance = Balance::Even;
            set_balance(node.left.as_deref_mut(), Balance::Even);
            rotate_right(node);
            Height::Changed
        }
        // The pivot's right subtree is as tall as its left one, so it lands next to the old root
        // at the same depth and the overall height stays put.
        Balance::Even => {
            log::trace!("delete: single right rotation, height kept");
            node.balance = Balance::LeftHeavy;
            set_balance(node.left.as_deref_mut(), Balance::RightHeavy);
            rotate_right(node);
            Height::Unchanged
        }
        Balance::RightHeavy => {
            log::trace!("delete: left-right rotation");
            rotate_left_right(node);
            Height::Changed
        }
    }
}

/// Mirror of [`left_heavy_after_delete`].
fn right_heavy_after_delete<K, V>(node: &mut Box<Node<K, V>>) -> Height {
    match child_balance(node.right.as_deref()) {
        Balance::RightHeavy => {
            log::trace!("delete: single left rotation");
            node.balance = Balance::Even;
            set_balance(node.right.as_deref_mut(), Balance::Even);
            rotate_left(node);
            Height::Changed
        }
        Balance::Even => {
            log::trace!("delete: single left rotation, height kept");
            node.balance = Balance::RightHeavy;
            set_balance(node.right.as_deref_mut(), Balance::LeftHeavy);
            rotate_left(node);
            Height::Unchanged
        }
        Balance::LeftHeavy => {
            log::trace!("delete: right-left rotation");
            rotate_right_left(node);
            Height::Changed
        }
    }
}

/// Double rotation for a left heavy `node` whose left child leans right. The grandchild becomes
/// the subtree root and the balances of all three nodes follow from the grandchild's old balance.
fn rotate_left_right<K, V>(node: &mut Box<Node<K, V>>) {
    let left = node
        .left
        .as_mut()
        .expect("Left-right rotation => left child");
    let grandchild = left
        .right
        .as_mut()
        .expect("Left-right rotation => left-right grandchild");

    let (node_balance, left_balance) = match grandchild.balance {
        Balance::LeftHeavy => (Balance::RightHeavy, Balance::Even),
        Balance::Even => (Balance::Even, Balance::Even),
        Balance::RightHeavy => (Balance::Even, Balance::LeftHeavy),
    };
    grandchild.balance = Balance::Even;
    left.balance = left_balance;
    rotate_left(left);

    node.balance = node_balance;
    rotate_right(node);
}

/// Mirror of [`rotate_left_right`].
fn rotate_right_left<K, V>(node: &mut Box<Node<K, V>>) {
    let right = node
        .right
        .as_mut()
        .expect("Right-left rotation => right child");
    let grandchild = right
        .left
        .as_mut()
        .expect("Right-left rotation => right-left grandchild");

    let (node_balance, right_balance) = match grandchild.balance {
        Balance::LeftHeavy => (Balance::Even, Balance::RightHeavy),
        Balance::Even => (Balance::Even, Balance::Even),
        Balance::RightHeavy => (Balance::LeftHeavy, Balance::Even),
    };
    grandchild.balance = Balance::Even;
    right.balance = right_balance;
    rotate_right(right);

    node.balance = node_balance;
    rotate_left(node);
}

/// Rotate `root` to the left. This moves the right child up vertically and `root` down
/// vertically. Balances are left untouched; callers set them.
///
/// ## Panics
///
/// When called on a node without a right child.
///
/// # Diagram
///
/// ```text
///   old_root                  new_root
///    /    \                    /    \
///   x   new_root  rotate ->  old_root z
///        /  \                 /  \
///       y    z               x    y
/// ```
pub(crate) fn rotate_left<K, V>(root: &mut Box<Node<K, V>>) {
    let mut new_root = root.right.take().expect("Rotate left => right child");
    root.right = new_root.left.take();
    mem::swap(root, &mut new_root);
    // `new_root` now holds the old root.
    root.left = Some(new_root);
}

/// Rotate `root` to the right. This moves the left child up vertically and `root` down
/// vertically. Balances are left untouched; callers set them.
///
/// ## Panics
///
/// When called on a node without a left child.
///
/// # Diagram
///
/// ```text
///      old_root               new_root
///       /    \                 /    \
///   new_root  z   rotate ->   x   old_root
///    /  \                          /  \
///   x    y                        y    z
/// ```
pub(crate) fn rotate_right<K, V>(root: &mut Box<Node<K, V>>) {
    let mut new_root = root.left.take().expect("Rotate right => left child");
    root.left = new_root.right.take();
    mem::swap(root, &mut new_root);
    root.right = Some(new_root);
}

fn child_balance<K, V>(child: Option<&Node<K, V>>) -> Balance {
    child
        .expect("Rebalancing a heavy side => child on that side")
        .balance
}

fn set_balance<K, V>(child: Option<&mut Node<K, V>>, balance: Balance) {
    if let Some(child) = child {
        child.balance = balance;
    }
}
