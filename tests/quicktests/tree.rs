use rooted_bst::{same_shape, Error, Tree};

use quickcheck::quickcheck;
use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a map. Inserting a key that is already present is
/// skipped for both so the tree stays free of duplicates and can be compared value for value.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut BTreeMap<K, V>)
where
    K: Ord + Clone,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                if !map.contains_key(k) {
                    bst.insert(k.clone(), v.clone());
                    map.insert(k.clone(), v.clone());
                }
            }
            Op::Remove(k) => {
                assert_eq!(bst.remove(k).ok(), map.remove(k));
            }
            Op::RemoveRoot => {
                let Some((root, key)) = bst.root().map(|n| (n.id(), n.key().clone())) else {
                    assert!(map.is_empty());
                    continue;
                };
                assert_eq!(bst.remove(&key).ok(), map.remove(&key));
                if !map.is_empty() {
                    assert_eq!(bst.root().map(|n| n.id()), Some(root));
                }
            }
            Op::Kth(k) => {
                let k = usize::from(*k);
                let expected = k
                    .checked_sub(1)
                    .and_then(|skip| map.values().rev().nth(skip))
                    .ok_or(Error::EmptyResult { rank: k });
                assert_eq!(bst.kth_largest(k).map(|n| n.value()), expected);
            }
            Op::Iter => assert!(bst.iter().eq(map.iter())),
        }
    }
}

/// Pre-order keys with a flag for each child slot.
fn outline(tree: &Tree<i8, ()>) -> Vec<(i8, bool, bool)> {
    tree.pre_order()
        .map(|n| (*n.key(), n.left().is_some(), n.right().is_some()))
        .collect()
}

fn inserted(keys: &[i8]) -> Tree<i8, ()> {
    let mut tree = Tree::new();
    for key in keys {
        tree.insert(*key, ());
    }
    tree
}

quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
        let mut tree = Tree::new();
        let mut map = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut map);
        map.iter().all(|(key, value)| tree.find(key) == Ok(value))
            && tree.iter().eq(map.iter())
            && tree.len() == map.len()
            && tree.is_valid_bst()
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }

        xs.iter().all(|x| tree.find(x) == Ok(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x) == Err(Error::KeyNotFound))
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while tree.remove(delete).is_ok() {}
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        deletes.iter().all(|x| tree.find(x).is_err())
            && still_present.iter().all(|x| tree.find(x).is_ok())
            && tree.len() == still_present.len()
    }

    fn same_shape_agrees_with_insertion(xs: Vec<i8>, ys: Vec<i8>) -> bool {
        // Squash the key space so matching shapes actually turn up.
        let xs: Vec<i8> = xs.into_iter().take(6).map(|x| x % 3).collect();
        let ys: Vec<i8> = ys.into_iter().take(6).map(|y| y % 3).collect();

        same_shape(&xs, &ys) == (outline(&inserted(&xs)) == outline(&inserted(&ys)))
    }

    fn same_shape_is_reflexive(xs: Vec<i8>) -> bool {
        same_shape(&xs, &xs)
    }

    fn kth_largest_matches_sorted(xs: Vec<i8>, k: u8) -> bool {
        let tree = inserted(&xs);
        let mut sorted = xs;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let k = usize::from(k % 16);

        let expected = k
            .checked_sub(1)
            .and_then(|i| sorted.get(i).copied())
            .ok_or(Error::EmptyResult { rank: k });
        tree.kth_largest(k).map(|n| *n.key()) == expected
    }

    fn from_sorted_is_never_taller(xs: Vec<i8>) -> bool {
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        sorted.dedup();
        let balanced = Tree::from_sorted(sorted.iter().map(|x| (*x, ())));

        balanced.is_valid_bst()
            && balanced.len() == sorted.len()
            && balanced.height() <= inserted(&sorted).height()
            && balanced.is_balanced()
    }
}
