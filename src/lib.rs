//! Navigable ordered sets for Rust, on an unbalanced binary search tree.
//!
//! This crate provides [`OrderedTree`], an ordered set with navigation queries
//! ([`lower`](OrderedTree::lower), [`floor`](OrderedTree::floor),
//! [`ceiling`](OrderedTree::ceiling), [`higher`](OrderedTree::higher)) and
//! iteration in both directions, and [`OrderedSetView`], a shared handle onto
//! one tree that can flip its notion of "ascending" without copying keys.
//!
//! # Example
//!
//! ```
//! use navset::{Error, OrderedSetView};
//!
//! let scores = OrderedSetView::new();
//! for score in [72, 95, 88, 60] {
//!     scores.add(score).unwrap();
//! }
//!
//! // Navigation in natural order.
//! assert_eq!(scores.floor(&90), Ok(Some(88)));
//! assert_eq!(scores.higher(&95), Ok(None));
//!
//! // The same keys, best first. Both views see every change.
//! let best_first = scores.descending_set();
//! assert_eq!(best_first.first(), Ok(95));
//! best_first.add(99).unwrap();
//! assert_eq!(scores.last(), Ok(99));
//!
//! // Iterators notice when the set changes under them.
//! let mut iter = scores.iter();
//! scores.remove(&60).unwrap();
//! assert_eq!(iter.has_next(), Err(Error::StaleIterator));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Custom orderings** - Any [`Comparator`], including plain closures;
//!   comparability is checked lazily, pair by pair
//! - **Shared reversible views** - [`OrderedSetView::descending_set`] shares storage
//! - **Stale iterator detection** - via a per-tree mutation counter
//! - **`tracing`** (optional) - trace events for every structural change
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index, including a
//! non-owning parent link used to step to the in-order successor or
//! predecessor without searching from the root. The tree is deliberately left
//! unbalanced: operations are O(height), which degrades to O(n) for sorted
//! input.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod error;
mod raw;

pub mod ordered_tree;
pub mod view;

pub use comparator::{Comparator, NaturalOrder};
pub use error::{Error, Result};
pub use ordered_tree::OrderedTree;
pub use view::{OrderedSetView, ViewIter};
