// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_kdtree --heading-base-level=0

//! Understory K-D Tree: a mutable 2D point index with nearest-neighbor queries.
//!
//! - Insert, overwrite, and remove values keyed by unique 2D points.
//! - Exact lookup by point.
//! - Nearest-neighbor search under L1 (Manhattan), L2 (squared Euclidean), or Linf (Chebyshev),
//!   with a "pop closest" variant that removes what it finds.
//! - Bulk construction from a batch of values, much cheaper than inserting them one by one.
//!
//! It is generic over the coordinate type (`i32`, `i64`, `f32`, `f64` via [`Scalar`]) and over
//! an arbitrary payload type, which is moved in and out and never cloned.
//!
//! The tree rebalances itself: it tracks the sum of all node depths, and when an insertion
//! pushes that sum past `bit_width(len) * len + 1` it rebuilds itself from its values.
//! [`KdTree::balance`] reports how well that is working.
//!
//! # Example
//!
//! ```rust
//! use understory_kdtree::{KdTree, Norm, Point};
//!
//! let mut tree: KdTree<i32, &str> = KdTree::new();
//! tree.insert(Point::new(10, 0), "east");
//! tree.insert(Point::new(9, 4), "north-east");
//! tree.insert(Point::new(7, 7), "diagonal");
//!
//! // The answer depends on the norm.
//! let origin = Point::new(0, 0);
//! assert_eq!(tree.find_closest(&origin, Norm::L1).payload, "east");
//! assert_eq!(tree.find_closest(&origin, Norm::L2).payload, "north-east");
//! assert_eq!(tree.find_closest(&origin, Norm::Linf).payload, "diagonal");
//!
//! // Points are unique keys: `insert` keeps the old payload, `set` replaces it.
//! assert!(!tree.insert(Point::new(7, 7), "ignored"));
//! assert_eq!(tree.set(Point::new(7, 7), "replaced"), Some("diagonal"));
//!
//! // Drain the tree nearest-first.
//! while !tree.is_empty() {
//!     let next = tree.pop_closest(&origin, Norm::L2);
//!     assert!(!tree.exists(&next.point));
//! }
//! ```
//!
//! Known values are better loaded in bulk:
//!
//! ```rust
//! use understory_kdtree::{KdTree, Value, Point};
//!
//! let tree: KdTree<f64, u32> = (0..100_u32)
//!     .map(|i| Value::new(Point::new(f64::from(i % 10), f64::from(i / 10)), i))
//!     .collect();
//! assert_eq!(tree.len(), 100);
//! assert!(tree.depth_max() <= 8);
//! assert!(tree.check_invariants().is_ok());
//! ```
//!
//! ## Features
//!
//! - `std` (default): float math through the standard library.
//! - `libm`: float math through `libm`, for `no_std` builds. One of `std` or `libm` is required.
//! - `kurbo`: conversions between [`Point<f64>`] and `kurbo::Point`.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. A NaN coordinate never compares
//! equal to anything, so a value stored under one cannot be found again.
//!
//! ### Logging
//!
//! Rebuilds are reported through the [`log`] facade at `debug` (whole-tree rebalance) and
//! `trace` (subtree rebuild on removal) levels. Nothing is printed unless the application
//! installs a logger.

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_kdtree requires either the `std` or `libm` feature");

mod build;
mod iter;
mod nearest;
mod node;
pub mod norm;
mod stats;
mod tree;
pub mod types;
mod validate;

pub use iter::{IntoIter, Iter};
pub use norm::Norm;
pub use stats::Balance;
pub use tree::{KdTree, KdTreeF32, KdTreeF64, KdTreeI32, KdTreeI64};
pub use types::{Point, Pointd, Pointf, Pointi, Scalar, ScalarAcc, Value};
pub use validate::InvariantViolation;

#[cfg(test)]
mod proptests;
