//! A left-leaning red-black tree ordered map for Rust.
//!
//! This crate provides [`LlrbMap`], an ordered map with O(log n) search,
//! insertion, and deletion, plus ordered queries and order-statistic
//! operations:
//!
//! - [`min`](LlrbMap::min) / [`max`](LlrbMap::max) - The smallest and largest keys
//! - [`floor`](LlrbMap::floor) / [`ceiling`](LlrbMap::ceiling) - Predecessor and successor queries
//! - [`select`](LlrbMap::select) - Get the entry at a given sorted position
//! - [`rank`](LlrbMap::rank) - Get the sorted position of a key
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the smallest entry
//!
//! # Example
//!
//! ```
//! use llrb_tree::{LlrbMap, Rank};
//!
//! let mut scores = LlrbMap::new();
//! scores.put("Alice", 100);
//! scores.put("Bob", 85);
//! scores.put("Carol", 92);
//!
//! // Ordered-map operations
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.min(), Ok(&"Alice"));
//! assert_eq!(scores.floor(&"Bo"), Ok(Some(&"Alice")));
//!
//! // Order-statistic operations (O(log n))
//! let (name, score) = scores.select(1).unwrap();
//! assert_eq!((*name, *score), ("Bob", 85));
//! assert_eq!(scores.rank(&"Carol"), 2);
//! assert_eq!(scores[Rank(0)], 100); // Alice's score (first alphabetically)
//!
//! // Ordered removal
//! assert_eq!(scores.remove_min(), Ok(("Alice", 100)));
//! assert_eq!(scores.len(), 2);
//! ```
//!
//! # Features
//!
//! - **Ordered queries** - min/max and floor/ceiling in O(log n)
//! - **O(log n) rank operations** - Efficient order-statistic queries via subtree size augmentation
//! - **Guaranteed balance** - Red-black invariants bound the height by 2 log2(n + 1)
//! - **No unsafe code** - The crate is `#![forbid(unsafe_code)]`
//!
//! # Implementation
//!
//! The map is a left-leaning red-black tree, a binary-tree encoding of a 2-3
//! tree: red links bind pairs of nodes into logical 3-nodes and always lean
//! left, and every path from the root to a leaf crosses the same number of
//! black links. Each node also caches the size of its subtree, enabling
//! O(log n) rank-based access without full traversal.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod order_statistic;
mod raw;

pub mod llrb_map;

pub use error::Error;
pub use llrb_map::LlrbMap;
pub use order_statistic::Rank;
