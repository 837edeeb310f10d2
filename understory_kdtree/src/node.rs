// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes and the incrementally maintained depth counters.

use alloc::boxed::Box;

use crate::types::{Point, Scalar, Value, lt};

/// Owning link to a subtree.
pub(crate) type Link<T, P> = Option<Box<Node<T, P>>>;

/// Splitting axis at `depth`.
#[inline]
pub(crate) const fn axis_at(depth: usize) -> usize {
    depth % 2
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) value: Value<T, P>,
    pub(crate) depth: usize,
    /// Child 0 holds points strictly less on this node's axis, child 1 the rest.
    pub(crate) children: [Link<T, P>; 2],
}

impl<T: Scalar, P> Node<T, P> {
    pub(crate) fn new(value: Value<T, P>, depth: usize) -> Self {
        Self {
            value,
            depth,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) const fn axis(&self) -> usize {
        axis_at(self.depth)
    }

    /// Index of the child a point descends into from this node.
    #[inline]
    pub(crate) fn child_for(&self, point: &Point<T>) -> usize {
        let axis = self.axis();
        if lt(point[axis], self.value.point[axis]) {
            0
        } else {
            1
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0].is_none() && self.children[1].is_none()
    }
}

/// Live node count and the sum of all live node depths.
///
/// Both are updated on every structural change and are never recomputed by
/// walking the tree outside of validation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Counters {
    pub(crate) count: usize,
    pub(crate) sum_depth: usize,
}

impl Counters {
    #[inline]
    pub(crate) fn attach(&mut self, depth: usize) {
        self.count += 1;
        self.sum_depth += depth;
    }

    #[inline]
    pub(crate) fn detach(&mut self, depth: usize) {
        debug_assert!(self.count > 0, "detaching from an empty tree");
        self.count -= 1;
        self.sum_depth -= depth;
    }

    /// Depth sum a full rebuild is triggered above.
    ///
    /// `bit_width(count)` is the height of a complete binary tree with `count`
    /// nodes, so `bit_width(count) * count` bounds its depth sum. The exact
    /// formula determines when rebuilds happen and is observable through the
    /// depth diagnostics.
    pub(crate) fn rebalance_bound(&self) -> usize {
        let bit_width = (usize::BITS - self.count.leading_zeros()) as usize;
        bit_width * self.count + 1
    }

    #[inline]
    pub(crate) fn needs_rebalance(&self) -> bool {
        self.sum_depth > self.rebalance_bound()
    }
}
