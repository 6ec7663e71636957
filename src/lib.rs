//! An AVL-balanced ordered map and multimap, augmented with subtree sizes for
//! O(log n) range counting and rank queries.
//!
//! [`AvlTree`] supports point lookups, bounded iteration in either direction,
//! callback-driven walks and mutating walks that may update or delete entries
//! as they go. Whether entries may share a key is chosen at construction with
//! a [`KeyPolicy`]; entries sharing a key are kept adjacent in key order, in
//! the order they were inserted.
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use ordavl::{AvlTree, Direction};
//!
//! let mut t = AvlTree::multimap();
//! for (k, v) in [(3, "c"), (1, "a"), (3, "d"), (2, "b")] {
//!     t.insert(k, v);
//! }
//!
//! // Range queries and counts.
//! assert_eq!(t.count_range(2..=3), 3);
//! let got = t
//!     .range(Direction::Descending, 2..)
//!     .map(|(_, v)| *v)
//!     .collect::<Vec<_>>();
//! assert_eq!(got, ["d", "c", "b"]);
//!
//! // Delete entries while walking, stopping once one has been removed.
//! let removed = t.delete_range_iter(Direction::Ascending, 3..=3, |_, _| {
//!     (true, ControlFlow::Break(()))
//! });
//! assert_eq!(removed, [(3, "c")]);
//! assert_eq!(t.len(), 3);
//! ```
//!
//! Nodes are held in a [`NodeStore`], by default an [`ArenaStore`] addressing
//! nodes by index. A store may optionally maintain parent back-references (see
//! [`TreeConfig`]), speeding up mutating walks.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

mod arena;
mod config;
mod entry;
mod error;
mod group;
mod iter;
mod mutate;
mod node;
mod rank;
mod store;
mod tree;
mod validate;

#[cfg(test)]
mod test_utils;

pub use arena::{ArenaStore, NodeId};
pub use config::{KeyPolicy, TreeConfig};
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::InvariantError;
pub use iter::{Direction, IntoIter, Iter};
pub use mutate::{Alter, Altered};
pub use store::NodeStore;
pub use tree::{AvlTree, Inserted};
