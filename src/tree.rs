//! An unbalanced BST whose nodes live in an arena owned by the [`Tree`]. Children are linked by
//! [`NodeId`] and every node keeps a non-owning link back to its parent.
//!
//! The `Tree` value is the handle to the whole structure. Mutations go through `&mut Tree` so
//! whoever holds it sees every change, including removal of the node at the root position: the
//! root slot is overwritten in place and keeps its `NodeId` for as long as the tree is non-empty.
//!
//! # Examples
//!
//! ```
//! use rooted_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), Err(Error::KeyNotFound));
//!
//! tree.insert(1, "one");
//! tree.insert(2, "two");
//! assert_eq!(tree.find(&1), Ok(&"one"));
//!
//! // Removing the root keeps the same root slot.
//! let root = tree.root().map(|n| n.id());
//! assert_eq!(tree.remove(&1), Ok("one"));
//! assert_eq!(tree.root().map(|n| n.id()), root);
//! assert_eq!(tree.find(&2), Ok(&"two"));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Identifies a node inside the [`Tree`] that created it. Ids of removed nodes are reused by
/// later insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Which child link of a node is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A Binary Search Tree mapping keys to values. Keys equal to an existing key are placed in its
/// right subtree, so duplicates are kept rather than overwritten. The tree never rebalances.
#[derive(Clone)]
pub struct Tree<K, V> {
    root: Option<NodeId>,
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
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
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            nodes: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The node at the root position, if any.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    /// Looks up a node by id. Returns `None` for ids this tree does not currently hold.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.get(id).map(|_| NodeRef::new(self, id))
    }

    /// Drops every node. The tree stays usable.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Inserts the given value into the tree stored at the given key and returns the id of the new
    /// node. Keys less than a node's key go left and all others go right, so inserting an existing
    /// key adds a second node rather than replacing the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let first = tree.insert(1, 'a');
    /// let second = tree.insert(1, 'b');
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.node(second).and_then(|n| n.parent()).map(|n| n.id()), Some(first));
    /// assert_eq!(tree.find(&1), Ok(&'a'));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> NodeId
    where
        K: Ord,
    {
        let Some(mut current) = self.root else {
            let id = self.alloc(Node::new(key, value, None));
            self.root = Some(id);
            trace!(node = ?id, "inserted root");
            return id;
        };

        loop {
            let node = self.slot(current);
            let side = if key < node.key {
                Side::Left
            } else {
                Side::Right
            };
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let id = self.alloc(Node::new(key, value, Some(current)));
                    *self.slot_mut(current).child_mut(side) = Some(id);
                    trace!(node = ?id, parent = ?current, ?side, "inserted leaf");
                    return id;
                }
            }
        }
    }

    /// Finds the value stored at the first node on the search path whose key equals `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Ok(&2));
    /// assert_eq!(tree.find(&42), Err(Error::KeyNotFound));
    /// ```
    pub fn find(&self, key: &K) -> Result<&V>
    where
        K: Ord,
    {
        self.locate(key).map(|id| &self.slot(id).value)
    }

    /// Like [`Tree::find`] but allows the value to be updated in place.
    pub fn find_mut(&mut self, key: &K) -> Result<&mut V>
    where
        K: Ord,
    {
        let id = self.locate(key)?;
        Ok(&mut self.slot_mut(id).value)
    }

    /// Whether [`Tree::find`] would succeed for `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.locate(key).is_ok()
    }

    /// Returns the id of the node [`Tree::find`] would read from.
    pub fn locate(&self, key: &K) -> Result<NodeId>
    where
        K: Ord,
    {
        let mut current = self.root.ok_or(Error::KeyNotFound)?;
        loop {
            let node = self.slot(current);
            let next = match key.cmp(&node.key) {
                Ordering::Equal => return Ok(current),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            current = next.ok_or(Error::KeyNotFound)?;
        }
    }

    /// Removes the node [`Tree::find`] would read from and returns its value. Nothing is modified
    /// when the key is missing.
    ///
    /// A node with two children takes over the key and value of its in-order successor and the
    /// successor's node is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use rooted_bst::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Ok(2));
    /// assert_eq!(tree.remove(&1), Err(Error::KeyNotFound));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<V>
    where
        K: Ord,
    {
        let target = self.locate(key)?;
        let node = self.slot(target);
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                trace!(node = ?target, ?successor, "promoting in-order successor");
                let (key, value) = self.detach(successor);
                let node = self.slot_mut(target);
                node.key = key;
                Ok(mem::replace(&mut node.value, value))
            }
            _ => {
                trace!(node = ?target, "unlinking node");
                Ok(self.detach(target).1)
            }
        }
    }

    /// Attaches a new left child to `parent` without checking key order. Returns `None` if
    /// `parent` is not in the tree or already has a left child.
    ///
    /// Together with [`Tree::insert`] on an empty tree this builds arbitrary shapes, including
    /// ones that break the search order.
    ///
    /// ```
    /// use rooted_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(3, ());
    /// tree.graft_left(root, 4, ());
    /// tree.graft_right(root, 5, ());
    ///
    /// assert!(!tree.is_valid_bst());
    /// ```
    pub fn graft_left(&mut self, parent: NodeId, key: K, value: V) -> Option<NodeId> {
        self.graft(parent, Side::Left, key, value)
    }

    /// The right-hand counterpart of [`Tree::graft_left`].
    pub fn graft_right(&mut self, parent: NodeId, key: K, value: V) -> Option<NodeId> {
        self.graft(parent, Side::Right, key, value)
    }

    fn graft(&mut self, parent: NodeId, side: Side, key: K, value: V) -> Option<NodeId> {
        if self.get(parent)?.child(side).is_some() {
            return None;
        }
        let id = self.alloc(Node::new(key, value, Some(parent)));
        *self.slot_mut(parent).child_mut(side) = Some(id);
        Some(id)
    }

    fn leftmost(&self, mut current: NodeId) -> NodeId {
        while let Some(left) = self.slot(current).left {
            current = left;
        }
        current
    }

    /// Unlinks a node with at most one child and returns its entry. A root with a child takes
    /// over the child's contents so the root slot survives.
    fn detach(&mut self, id: NodeId) -> (K, V) {
        let node = self.slot(id);
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "detached node has two children"
        );
        let (parent, child) = (node.parent, node.left.or(node.right));

        match (parent, child) {
            (Some(parent), child) => {
                let parent_node = self.slot_mut(parent);
                if parent_node.left == Some(id) {
                    parent_node.left = child;
                } else {
                    parent_node.right = child;
                }
                if let Some(child) = child {
                    self.slot_mut(child).parent = Some(parent);
                }
                let node = self.release(id);
                (node.key, node.value)
            }
            (None, Some(child)) => {
                let promoted = self.release(child);
                let root = self.slot_mut(id);
                let key = mem::replace(&mut root.key, promoted.key);
                let value = mem::replace(&mut root.value, promoted.value);
                root.left = promoted.left;
                root.right = promoted.right;
                self.fix_left_child_parent(id);
                self.fix_right_child_parent(id);
                debug!(root = ?id, "root slot took over its only child");
                (key, value)
            }
            (None, None) => {
                let node = self.release(id);
                self.clear();
                debug!("removed the last node");
                (node.key, node.value)
            }
        }
    }

    fn fix_left_child_parent(&mut self, id: NodeId) {
        if let Some(left) = self.slot(id).left {
            self.slot_mut(left).parent = Some(id);
        }
    }

    fn fix_right_child_parent(&mut self, id: NodeId) {
        if let Some(right) = self.slot(id).right {
            self.slot_mut(right).parent = Some(id);
        }
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.nodes[id.0].take().expect("released node is live");
        self.free.push(id);
        self.len -= 1;
        node
    }

    fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Node<K, V> {
        self.get(id).expect("linked node is live")
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.nodes[id.0].as_mut().expect("linked node is live")
    }
}

/// A read-only view of one node and its position in the tree.
pub struct NodeRef<'a, K, V> {
    tree: &'a Tree<K, V>,
    id: NodeId,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> fmt::Debug for NodeRef<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    // TODO stack based Debug, this recurses once per level
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("value", self.value())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub(crate) fn tree(&self) -> &'a Tree<K, V> {
        self.tree
    }

    fn node(&self) -> &'a Node<K, V> {
        self.tree.slot(self.id)
    }

    /// The id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored at this node.
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// The value stored at this node.
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// The node this one hangs from, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.tree, id))
    }

    /// The left child.
    pub fn left(&self) -> Option<Self> {
        self.node().left.map(|id| Self::new(self.tree, id))
    }

    /// The right child.
    pub fn right(&self) -> Option<Self> {
        self.node().right.map(|id| Self::new(self.tree, id))
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }
}
