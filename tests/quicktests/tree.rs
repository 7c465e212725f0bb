use avl::{Order, Tree};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

use crate::Op;

/// Applies a set of operations to a tree and a set, validating the tree after each one.
/// Returns how many inserts and deletes succeeded.
fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K, K>, set: &mut BTreeSet<K>) -> (usize, usize)
where
    K: Ord + Clone + std::fmt::Debug,
{
    let (mut inserted, mut deleted) = (0, 0);
    for op in ops {
        match op {
            Op::Insert(k) => {
                let fresh = set.insert(k.clone());
                assert_eq!(tree.insert(k.clone(), k.clone()), fresh);
                inserted += usize::from(fresh);
            }
            Op::Delete(k) => {
                let present = set.remove(k);
                assert_eq!(tree.delete(k), present);
                deleted += usize::from(present);
            }
        }
        assert_eq!(tree.validate(), Ok(()), "after {op:?}");
    }

    (inserted, deleted)
}

fn in_order_keys<K: Clone, V>(tree: &Tree<K, V>) -> Vec<K> {
    tree.traverse(Order::In)
        .into_iter()
        .map(|(k, _)| k.clone())
        .collect()
}

#[quickcheck]
fn size_tracks_successful_operations(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    let (inserted, deleted) = do_ops(&ops, &mut tree, &mut set);
    tree.len() == inserted - deleted && tree.len() == set.len()
}

#[quickcheck]
fn in_order_is_strictly_ascending(ops: Vec<Op<i16>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut tree, &mut set);

    let keys = in_order_keys(&tree);
    keys.windows(2).all(|w| w[0] < w[1]) && keys.into_iter().eq(set)
}

#[quickcheck]
fn round_trip_to_empty(xs: Vec<u8>, seed: u64) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, ());
    }

    // Delete in a scrambled but deterministic order.
    let mut keys: Vec<_> = xs.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    let len = keys.len();
    for i in 0..len {
        let j = (seed.wrapping_mul(i as u64 + 1) as usize) % (len - i) + i;
        keys.swap(i, j);
    }
    for key in &keys {
        if !tree.delete(key) || tree.validate().is_err() {
            return false;
        }
    }

    tree.is_empty() && tree.height() == 0 && tree.len() == 0
}

#[quickcheck]
fn duplicates_leave_the_shape_alone(xs: Vec<i8>, dup: usize) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    if xs.is_empty() {
        return true;
    }

    let key = xs[dup % xs.len()];
    let before = tree.traverse(Order::Pre);
    let before: Vec<_> = before.into_iter().map(|(k, v)| (*k, *v)).collect();

    let rejected = !tree.insert(key, key.wrapping_add(1));
    let after: Vec<_> = tree
        .traverse(Order::Pre)
        .into_iter()
        .map(|(k, v)| (*k, *v))
        .collect();

    rejected && before == after
}

#[quickcheck]
fn height_within_avl_bound(ops: Vec<Op<u16>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut tree, &mut set);

    let bound = 1.44 * ((tree.len() + 2) as f64).log2();
    tree.height() as f64 <= bound
}

#[quickcheck]
fn search_agrees_with_model(ops: Vec<Op<i8>>, probes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut tree, &mut set);

    probes
        .iter()
        .all(|p| tree.search(p) == set.get(p) && tree.contains_key(p) == set.contains(p))
}
