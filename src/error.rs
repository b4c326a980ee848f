//! Errors returned by tree operations.

use thiserror::Error;

/// Result alias for fallible tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The ways a tree query can come up empty. Neither leaves the tree modified.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key was not on the descent path of a lookup or removal.
    #[error("key not found")]
    KeyNotFound,

    /// A rank query asked for a node the tree does not have.
    #[error("no node at rank {rank} from the largest")]
    EmptyResult {
        /// The requested rank (1 is the largest key).
        rank: usize,
    },
}
