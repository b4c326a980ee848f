//! An ordered map kept as a plain (never rebalanced) Binary Search Tree, together with the usual
//! textbook analyses of such trees.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored records. Each `Node` stores a key, a value and up to two child `Node`s. The invariants
//! kept here are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key less than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key greater than or equal to
//!    its own key. Inserting a key that is already present adds another node to the right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the number of nodes on the longest path from the
//! root to a leaf. [`Tree`] does nothing to keep the height down, so inserting sorted keys builds
//! a chain. [`Tree::from_sorted`] builds a tree of minimal height in one go and the functions in
//! [`analysis`] measure how a tree turned out.
//!
//! ## Layout
//!
//! Nodes live in an arena owned by the [`Tree`]. Children are owned through their parent's links
//! and every node also records its parent, which lets removal splice nodes out in place. The
//! `Tree` itself is the handle callers hold. Removing the node at the root position rewrites the
//! root slot instead of replacing it.
//!
//! ```
//! use rooted_bst::{same_shape, Tree};
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key.to_string());
//! }
//! let root = tree.root().map(|n| n.id());
//!
//! // 5 has two children so its successor 7 moves up into its slot.
//! assert_eq!(tree.remove(&5), Ok("5".to_string()));
//! assert_eq!(tree.root().map(|n| (n.id(), *n.key())), root.map(|id| (id, 7)));
//! assert!(tree.is_valid_bst());
//!
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.third_largest().map(|n| *n.key()), Ok(7));
//! assert!(same_shape(&[2, 1, 3], &[2, 3, 1]));
//! ```

#![deny(missing_docs)]

pub mod analysis;
pub mod construct;
pub mod error;
pub mod traversal;
pub mod tree;


pub use analysis::SubtreeRange;
pub use construct::same_shape;
pub use error::{Error, Result};
pub use traversal::{InOrder, PostOrder, PreOrder};
pub use tree::{NodeId, NodeRef, Tree};
