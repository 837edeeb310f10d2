// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural self-check.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Display};

use crate::node::{Counters, Node};
use crate::tree::KdTree;
use crate::types::{Point, Scalar, le, lt};

/// A broken structural invariant, reported by [`KdTree::check_invariants`].
#[derive(Clone, Debug, PartialEq)]
pub enum InvariantViolation<T> {
    /// A node's stored depth differs from its distance to the root.
    DepthMismatch {
        /// Point held by the node.
        point: Point<T>,
        /// Depth recorded in the node.
        stored: usize,
        /// Depth implied by the node's position.
        expected: usize,
    },
    /// A point lies outside the region its ancestors' splits assign to it.
    OutOfBounds {
        /// The misplaced point.
        point: Point<T>,
        /// Depth of the node holding it.
        depth: usize,
    },
    /// The tracked size differs from the number of reachable nodes.
    CountMismatch {
        /// Size tracked by the tree.
        recorded: usize,
        /// Nodes actually reachable from the root.
        actual: usize,
    },
    /// The tracked depth sum differs from the sum over reachable nodes.
    DepthSumMismatch {
        /// Depth sum tracked by the tree.
        recorded: usize,
        /// Sum of the depths of reachable nodes.
        actual: usize,
    },
}

impl<T: Display> Display for InvariantViolation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthMismatch {
                point,
                stored,
                expected,
            } => write!(
                f,
                "node at {point} records depth {stored} but sits at depth {expected}"
            ),
            Self::OutOfBounds { point, depth } => {
                write!(f, "point {point} at depth {depth} violates an ancestor split")
            }
            Self::CountMismatch { recorded, actual } => {
                write!(f, "tree records {recorded} values but holds {actual}")
            }
            Self::DepthSumMismatch { recorded, actual } => {
                write!(f, "tree records depth sum {recorded} but nodes sum to {actual}")
            }
        }
    }
}

impl<T: Debug + Display> core::error::Error for InvariantViolation<T> {}

/// Half-open region `[lo, hi)` per axis; `None` is unbounded.
#[derive(Copy, Clone)]
struct Region<T> {
    lo: [Option<T>; 2],
    hi: [Option<T>; 2],
}

impl<T: Scalar> Region<T> {
    fn contains(&self, point: &Point<T>) -> bool {
        (0..2).all(|axis| {
            let c = point[axis];
            self.lo[axis].is_none_or(|lo| le(lo, c)) && self.hi[axis].is_none_or(|hi| lt(c, hi))
        })
    }
}

impl<T: Scalar, P> KdTree<T, P> {
    /// Walk the whole tree and verify its structure.
    ///
    /// Checks that every node's depth matches its position, that every point
    /// lies strictly below each ancestor it descends left from and at or above
    /// each ancestor it descends right from (on that ancestor's axis), and that
    /// the tracked size and depth sum match the nodes present.
    ///
    /// Costs a full traversal; meant for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation<T>> {
        let mut seen = Counters::default();
        let unbounded = Region {
            lo: [None; 2],
            hi: [None; 2],
        };
        let mut stack: Vec<(&Node<T, P>, usize, Region<T>)> = self
            .root
            .as_deref()
            .map(|root| (root, 0, unbounded))
            .into_iter()
            .collect();

        while let Some((node, depth, region)) = stack.pop() {
            let point = node.value.point;
            if node.depth != depth {
                return Err(InvariantViolation::DepthMismatch {
                    point,
                    stored: node.depth,
                    expected: depth,
                });
            }
            if !region.contains(&point) {
                return Err(InvariantViolation::OutOfBounds { point, depth });
            }
            seen.attach(depth);

            let axis = node.axis();
            if let Some(child) = node.children[0].as_deref() {
                let mut left = region;
                left.hi[axis] = Some(point[axis]);
                stack.push((child, depth + 1, left));
            }
            if let Some(child) = node.children[1].as_deref() {
                let mut right = region;
                right.lo[axis] = Some(point[axis]);
                stack.push((child, depth + 1, right));
            }
        }

        if seen.count != self.counters.count {
            return Err(InvariantViolation::CountMismatch {
                recorded: self.counters.count,
                actual: seen.count,
            });
        }
        if seen.sum_depth != self.counters.sum_depth {
            return Err(InvariantViolation::DepthSumMismatch {
                recorded: self.counters.sum_depth,
                actual: seen.sum_depth,
            });
        }
        Ok(())
    }
}
