//! Read-only walks over a [`Tree`]. All of them keep their own stack so a degenerate tree (for
//! example one built from ascending keys) cannot exhaust the call stack.

use crate::tree::{NodeId, NodeRef, Tree};

/// Sorted iteration. Visits the left subtree, then the node, then the right subtree, or the
/// mirror image of that when descending.
pub struct InOrder<'a, K, V> {
    tree: &'a Tree<K, V>,
    stack: Vec<NodeId>,
    descending: bool,
}

impl<'a, K, V> InOrder<'a, K, V> {
    fn new(tree: &'a Tree<K, V>, descending: bool) -> Self {
        let mut walk = Self {
            tree,
            stack: Vec::new(),
            descending,
        };
        walk.push_spine(tree.root_id());
        walk
    }

    /// Pushes `current` and every node reachable from it by following the near-side links.
    fn push_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            let node = self.tree.slot(id);
            current = if self.descending {
                node.right
            } else {
                node.left
            };
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = NodeRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.slot(id);
        let far_side = if self.descending {
            node.left
        } else {
            node.right
        };
        self.push_spine(far_side);
        Some(NodeRef::new(self.tree, id))
    }
}

/// Visits each node before its children, left subtree first.
pub struct PreOrder<'a, K, V> {
    tree: &'a Tree<K, V>,
    stack: Vec<NodeId>,
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = NodeRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.slot(id);
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(NodeRef::new(self.tree, id))
    }
}

/// Visits each node after both of its children, left subtree first.
pub struct PostOrder<'a, K, V> {
    tree: &'a Tree<K, V>,
    // The flag records whether the node's children have already been pushed.
    stack: Vec<(NodeId, bool)>,
}

impl<'a, K, V> Iterator for PostOrder<'a, K, V> {
    type Item = NodeRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            if expanded {
                return Some(NodeRef::new(self.tree, id));
            }
            let node = self.tree.slot(id);
            self.stack.push((id, true));
            self.stack.extend(node.right.map(|right| (right, false)));
            self.stack.extend(node.left.map(|left| (left, false)));
        }
    }
}

impl<K, V> Tree<K, V> {
    /// Iterates over the entries in ascending key order. Equal keys come out in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [3, 1, 2] {
    ///     tree.insert(key, key * 10);
    /// }
    ///
    /// let entries: Vec<_> = tree.iter().collect();
    /// assert_eq!(entries, [(&1, &10), (&2, &20), (&3, &30)]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.in_order().map(|node| (node.key(), node.value()))
    }

    /// Iterates over the entries in descending key order.
    pub fn iter_desc(&self) -> impl Iterator<Item = (&K, &V)> {
        self.in_order_desc().map(|node| (node.key(), node.value()))
    }

    /// The keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// The values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [5, 3, 8, 3] {
    ///     tree.insert(key, key * 2);
    /// }
    ///
    /// assert_eq!(tree.values().sum::<i32>(), 38);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Nodes in ascending key order.
    pub fn in_order(&self) -> InOrder<'_, K, V> {
        InOrder::new(self, false)
    }

    /// Nodes in descending key order: right subtree, then the node, then the left subtree.
    pub fn in_order_desc(&self) -> InOrder<'_, K, V> {
        InOrder::new(self, true)
    }

    /// Nodes with each parent before its children.
    pub fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder {
            tree: self,
            stack: self.root_id().into_iter().collect(),
        }
    }

    /// Nodes with each parent after its children.
    pub fn post_order(&self) -> PostOrder<'_, K, V> {
        PostOrder {
            tree: self,
            stack: self.root_id().map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Groups the nodes by depth, root level first. Each level lists its nodes left to right.
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [3, 1, 4, 6] {
    ///     tree.insert(key, ());
    /// }
    ///
    /// let levels: Vec<Vec<i32>> = tree
    ///     .levels()
    ///     .iter()
    ///     .map(|level| level.iter().map(|n| *n.key()).collect())
    ///     .collect();
    /// assert_eq!(levels, vec![vec![3], vec![1, 4], vec![6]]);
    /// ```
    pub fn levels(&self) -> Vec<Vec<NodeRef<'_, K, V>>> {
        let mut levels = Vec::new();
        let mut level: Vec<_> = self.root().into_iter().collect();
        while !level.is_empty() {
            let next = level
                .iter()
                .flat_map(|node| node.left().into_iter().chain(node.right()))
                .collect();
            levels.push(std::mem::replace(&mut level, next));
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<'a>(nodes: impl Iterator<Item = NodeRef<'a, i32, ()>>) -> Vec<i32> {
        nodes.map(|n| *n.key()).collect()
    }

    /// ```text
    ///       5
    ///     /   \
    ///    3     8
    ///   / \   /
    ///  1   4 7
    /// ```
    fn sample() -> Tree<i32, ()> {
        let mut tree = Tree::new();
        for key in [5, 3, 8, 1, 4, 7] {
            tree.insert(key, ());
        }
        tree
    }

    #[test]
    fn walks_on_empty_tree() {
        let tree: Tree<i32, ()> = Tree::new();

        assert_eq!(tree.iter().count(), 0);
        assert_eq!(tree.in_order_desc().count(), 0);
        assert_eq!(tree.pre_order().count(), 0);
        assert_eq!(tree.post_order().count(), 0);
        assert!(tree.levels().is_empty());
    }

    #[test]
    fn in_order_both_directions() {
        let tree = sample();

        assert_eq!(keys(tree.in_order()), [1, 3, 4, 5, 7, 8]);
        assert_eq!(keys(tree.in_order_desc()), [8, 7, 5, 4, 3, 1]);
    }

    #[test]
    fn pre_and_post_order() {
        let tree = sample();

        assert_eq!(keys(tree.pre_order()), [5, 3, 1, 4, 8, 7]);
        assert_eq!(keys(tree.post_order()), [1, 4, 3, 7, 8, 5]);
    }

    #[test]
    fn levels_left_to_right() {
        let tree = sample();
        let levels: Vec<Vec<i32>> = tree
            .levels()
            .into_iter()
            .map(|level| keys(level.into_iter()))
            .collect();

        assert_eq!(levels, vec![vec![5], vec![3, 8], vec![1, 4, 7]]);
    }

    #[test]
    fn duplicates_iterate_in_insertion_order() {
        let mut tree = Tree::new();
        tree.insert(2, 'a');
        tree.insert(1, 'b');
        tree.insert(2, 'c');

        let entries: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, [(1, 'b'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn keys_and_values_follow_key_order() {
        let mut tree = Tree::new();
        for key in [5, 3, 8, 1] {
            tree.insert(key, key * 10);
        }
        tree.remove(&5).unwrap();

        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 3, 8]);
        assert_eq!(tree.values().copied().collect::<Vec<_>>(), [10, 30, 80]);
        assert_eq!(tree.values().sum::<i32>(), 120);
        assert_eq!(Tree::<i32, i32>::new().values().sum::<i32>(), 0);
    }

    #[test]
    fn deep_tree_does_not_overflow() {
        let mut tree = Tree::new();
        for key in 0..10_000 {
            tree.insert(key, ());
        }

        assert_eq!(tree.in_order().count(), 10_000);
        assert_eq!(tree.post_order().last().map(|n| *n.key()), Some(0));
    }
}
