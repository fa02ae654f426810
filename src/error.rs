use thiserror::Error;

/// The error type for operations that require a non-empty tree.
///
/// Only the extreme/nearest-key queries and the extreme removals can fail:
/// `min`, `max`, `remove_min`, `remove_max`, `floor`, and `ceiling` all need
/// at least one entry to answer from. Lookups, insertion, and keyed removal
/// never fail; an absent key is reported through `Option`, not an error.
/// A failed call leaves the tree unmodified.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Error, LlrbMap};
///
/// let map: LlrbMap<i32, &str> = LlrbMap::new();
/// assert_eq!(map.min(), Err(Error::EmptyTree));
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The tree contains no entries.
    #[error("tree is empty")]
    EmptyTree,
}
