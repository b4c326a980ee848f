//! Read-only measurements of a tree's shape: height, search-order validity, rank queries and
//! leaf-depth balance.
//!
//! Nothing here assumes the tree was built by [`Tree::insert`]. Trees assembled with
//! [`Tree::graft_left`]/[`Tree::graft_right`] may break the search order and the validity check
//! will say so.

use std::collections::BTreeSet;
use std::convert::Infallible;

use crate::error::{Error, Result};
use crate::tree::{Node, NodeId, NodeRef, Tree};

/// The span of keys found in a subtree, as computed bottom-up by the validity check.
#[derive(Debug, PartialEq, Eq)]
pub enum SubtreeRange<'a, K> {
    /// The subtree has no nodes.
    Empty,
    /// Every key in the subtree lies within `[min, max]` and the subtree is strictly ordered.
    Bounded {
        /// Smallest key.
        min: &'a K,
        /// Largest key.
        max: &'a K,
    },
    /// Somewhere in the subtree a key sits on the wrong side of an ancestor.
    Invalid,
}

impl<'a, K: Ord> SubtreeRange<'a, K> {
    /// Combines the ranges of a node's two subtrees with the node's own key. Keys must be strictly
    /// less on the left and strictly greater on the right.
    fn merge(key: &'a K, left: Self, right: Self) -> Self {
        use SubtreeRange::{Bounded, Empty, Invalid};

        match (left, right) {
            (Empty, Empty) => Bounded { min: key, max: key },
            (Empty, Bounded { min, max }) if min > key => Bounded { min: key, max },
            (Bounded { min, max }, Empty) if max < key => Bounded { min, max: key },
            (Bounded { min, max: left_max }, Bounded { min: right_min, max })
                if left_max < key && key < right_min =>
            {
                Bounded { min, max }
            }
            _ => Invalid,
        }
    }
}

enum Visit {
    Enter(Option<NodeId>),
    Exit(NodeId),
}

impl<K, V> Tree<K, V> {
    /// Folds the subtree rooted at `from` bottom-up. `combine` sees a node together with the
    /// folded values of its left and right subtrees, and can stop the walk by returning `Err`.
    fn try_fold_post_order<'a, T, E>(
        &'a self,
        from: Option<NodeId>,
        empty: impl Fn() -> T,
        mut combine: impl FnMut(&'a Node<K, V>, T, T) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let mut visits = vec![Visit::Enter(from)];
        let mut folded = Vec::new();
        while let Some(visit) = visits.pop() {
            match visit {
                Visit::Enter(None) => folded.push(empty()),
                Visit::Enter(Some(id)) => {
                    let node = self.slot(id);
                    visits.push(Visit::Exit(id));
                    visits.push(Visit::Enter(node.right));
                    visits.push(Visit::Enter(node.left));
                }
                Visit::Exit(id) => {
                    let right = folded.pop().expect("right subtree folded before its parent");
                    let left = folded.pop().expect("left subtree folded before its parent");
                    folded.push(combine(self.slot(id), left, right)?);
                }
            }
        }
        Ok(folded.pop().expect("a fold yields exactly one value"))
    }

    fn height_from(&self, from: Option<NodeId>) -> usize {
        self.try_fold_post_order(from, || 0, |_, left: usize, right: usize| {
            Ok::<_, Infallible>(left.max(right) + 1)
        })
        .unwrap_or_else(|never| match never {})
    }

    fn key_range_from(&self, from: Option<NodeId>) -> SubtreeRange<'_, K>
    where
        K: Ord,
    {
        self.try_fold_post_order(from, || SubtreeRange::Empty, |node, left, right| {
            match SubtreeRange::merge(&node.key, left, right) {
                SubtreeRange::Invalid => Err(()),
                range => Ok(range),
            }
        })
        .unwrap_or(SubtreeRange::Invalid)
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has height
    /// 0 and a lone root has height 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(1, ());
    /// assert_eq!(tree.height(), 1);
    ///
    /// tree.insert(2, ());
    /// tree.insert(3, ());
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        self.height_from(self.root_id())
    }

    /// The span of keys in the tree, or [`SubtreeRange::Invalid`] if the keys are not strictly
    /// ordered.
    pub fn key_range(&self) -> SubtreeRange<'_, K>
    where
        K: Ord,
    {
        self.key_range_from(self.root_id())
    }

    /// Whether every node's key is strictly greater than all keys to its left and strictly less
    /// than all keys to its right. Duplicate keys therefore make a tree invalid even though
    /// [`Tree::insert`] accepts them.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [2, 1, 3] {
    ///     tree.insert(key, ());
    /// }
    /// assert!(tree.is_valid_bst());
    ///
    /// tree.insert(2, ());
    /// assert!(!tree.is_valid_bst());
    /// ```
    pub fn is_valid_bst(&self) -> bool
    where
        K: Ord,
    {
        !matches!(self.key_range(), SubtreeRange::Invalid)
    }

    /// The node holding the `k`-th largest key, counting from 1. Walks right subtree, node, left
    /// subtree and stops as soon as `k` nodes have been seen.
    ///
    /// Fails with [`Error::EmptyResult`] when `k` is 0 or the tree has fewer than `k` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// for key in [3, 1, 4, 6, 9, 2, 5, 7] {
    ///     tree.insert(key, ());
    /// }
    ///
    /// assert_eq!(tree.kth_largest(1).map(|n| *n.key()), Ok(9));
    /// assert_eq!(tree.kth_largest(3).map(|n| *n.key()), Ok(6));
    /// assert_eq!(tree.kth_largest(9).map(|n| *n.key()), Err(Error::EmptyResult { rank: 9 }));
    /// ```
    pub fn kth_largest(&self, k: usize) -> Result<NodeRef<'_, K, V>> {
        k.checked_sub(1)
            .and_then(|skip| self.in_order_desc().nth(skip))
            .ok_or(Error::EmptyResult { rank: k })
    }

    /// Shorthand for `kth_largest(3)`.
    pub fn third_largest(&self) -> Result<NodeRef<'_, K, V>> {
        self.kth_largest(3)
    }

    /// The distinct depths at which leaves occur. The root sits at depth 1.
    pub fn leaf_depths(&self) -> BTreeSet<usize> {
        let mut depths = BTreeSet::new();
        let mut stack: Vec<_> = self.root_id().map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            let node = self.slot(id);
            if node.left.is_none() && node.right.is_none() {
                depths.insert(depth);
            }
            stack.extend(
                [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }
        depths
    }

    /// Whether the leaves all sit within one level of each other: the set of leaf depths has at
    /// most two members and, if two, they are adjacent.
    ///
    /// This only looks at leaves. It is not the AVL notion of balance, which compares the heights
    /// of sibling subtrees at every node, and the two can disagree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.is_balanced());
    ///
    /// for key in [4, 2, 6, 1] {
    ///     tree.insert(key, ());
    /// }
    /// // Leaves at depths 2 and 3.
    /// assert!(tree.is_balanced());
    ///
    /// tree.insert(0, ());
    /// // Leaves at depths 2 and 4.
    /// assert!(!tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        let depths = self.leaf_depths();
        let mut depths = depths.iter();
        match (depths.next(), depths.next(), depths.next()) {
            (None, _, _) | (Some(_), None, _) => true,
            (Some(shallow), Some(deep), None) => deep - shallow <= 1,
            _ => false,
        }
    }
}

impl<'a, K, V> NodeRef<'a, K, V> {
    /// The height of the subtree rooted at this node.
    pub fn height(&self) -> usize {
        self.tree().height_from(Some(self.id()))
    }

    /// The span of keys in the subtree rooted at this node.
    pub fn key_range(&self) -> SubtreeRange<'a, K>
    where
        K: Ord,
    {
        self.tree().key_range_from(Some(self.id()))
    }

    /// Whether the subtree rooted at this node is strictly ordered.
    pub fn is_valid_bst(&self) -> bool
    where
        K: Ord,
    {
        !matches!(self.key_range(), SubtreeRange::Invalid)
    }
}
