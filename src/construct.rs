//! Building trees from sequences, and predicting the shape a sequence of insertions would build.

use crate::tree::{Node, NodeId, Tree};

/// Whether inserting `first` into an empty tree would build exactly the same tree, keys and shape,
/// as inserting `second`. Neither tree is built.
///
/// The first element of each sequence becomes the root. The remaining elements split into those
/// less than the root, which form the left subtree in the order given, and the rest, which
/// form the right subtree. The two sequences match when their roots are equal and both pairs of
/// groups match in turn. The split uses the same rule as [`Tree::insert`] so duplicates land on the
/// right.
///
/// # Examples
///
/// ```
/// use rooted_bst::same_shape;
///
/// assert!(same_shape(&[3, 5, 4, 6, 1, 0, 2], &[3, 1, 5, 2, 4, 6, 0]));
/// assert!(!same_shape(&[3, 5, 4, 6, 1, 0, 2], &[3, 1, 5, 2, 4, 6, 3]));
/// ```
pub fn same_shape<K: Ord>(first: &[K], second: &[K]) -> bool {
    let mut pending: Vec<(Vec<&K>, Vec<&K>)> =
        vec![(first.iter().collect(), second.iter().collect())];

    while let Some((first, second)) = pending.pop() {
        if first.len() != second.len() {
            return false;
        }
        let (Some((first_root, first_rest)), Some((second_root, second_rest))) =
            (first.split_first(), second.split_first())
        else {
            continue;
        };
        if first_root != second_root {
            return false;
        }

        let (first_left, first_right) = split_at_pivot(*first_root, first_rest);
        let (second_left, second_right) = split_at_pivot(*second_root, second_rest);
        pending.push((first_left, second_left));
        pending.push((first_right, second_right));
    }

    true
}

/// Splits `rest` into the keys that would go left of `pivot` and those that would go right,
/// keeping their relative order.
fn split_at_pivot<'a, K: Ord>(pivot: &K, rest: &[&'a K]) -> (Vec<&'a K>, Vec<&'a K>) {
    rest.iter().copied().partition(|key| *key < pivot)
}

impl<K, V> Tree<K, V> {
    /// Builds a tree of minimal height from entries already sorted by key. Each range of entries
    /// is rooted at its middle element, rounding down, with the elements before it on the left and
    /// those after it on the right.
    ///
    /// The entries are not sorted or checked. Unsorted input gives a tree that fails
    /// [`Tree::is_valid_bst`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let tree = Tree::from_sorted((1..=7).map(|k| (k, k * 10)));
    ///
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(4));
    /// assert_eq!(tree.find(&6), Ok(&60));
    /// assert!(tree.is_valid_bst());
    /// ```
    pub fn from_sorted<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<_> = entries.into_iter().map(Some).collect();
        let mut tree = Self::new();
        let len = entries.len();
        let root = tree.build_range(&mut entries, 0, len, None);
        tree.set_root(root);
        tree
    }

    /// Builds the subtree for `entries[start..end]` under `parent`. Recurses once per level, and
    /// the levels number `log2(len)`.
    fn build_range(
        &mut self,
        entries: &mut [Option<(K, V)>],
        start: usize,
        end: usize,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        if start >= end {
            return None;
        }
        let middle = start + (end - 1 - start) / 2;
        let (key, value) = entries[middle].take().expect("each entry is placed once");
        let id = self.alloc(Node::new(key, value, parent));

        let left = self.build_range(entries, start, middle, Some(id));
        let right = self.build_range(entries, middle + 1, end, Some(id));
        let node = self.slot_mut(id);
        node.left = left;
        node.right = right;
        Some(id)
    }
}
