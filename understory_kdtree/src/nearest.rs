// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Branch-and-bound nearest-neighbor search.

use crate::node::Node;
use crate::norm::Norm;
use crate::tree::KdTree;
use crate::types::{Point, Scalar, Value, lt};

/// Depth-first search state: the query and the best candidate so far.
struct Nearest<'a, T: Scalar, P> {
    query: Point<T>,
    norm: Norm,
    best: Option<(T::Acc, &'a Value<T, P>)>,
}

impl<'a, T: Scalar, P> Nearest<'a, T, P> {
    /// Whether `dist` beats the current best. Ties keep the earlier candidate.
    fn improves(&self, dist: T::Acc) -> bool {
        self.best.as_ref().is_none_or(|(best, _)| lt(dist, *best))
    }

    fn visit(&mut self, node: &'a Node<T, P>) {
        let dist = self.norm.distance(&node.value.point, &self.query);
        if self.improves(dist) {
            self.best = Some((dist, &node.value));
        }

        let axis = node.axis();
        let near = node.child_for(&self.query);
        if let Some(child) = node.children[near].as_deref() {
            self.visit(child);
        }

        // The far side can only hold something closer if the splitting line is.
        let bound = self
            .norm
            .axis_distance(self.query[axis], node.value.point[axis]);
        if self.improves(bound)
            && let Some(child) = node.children[1 - near].as_deref()
        {
            self.visit(child);
        }
    }
}

impl<T: Scalar, P> KdTree<T, P> {
    /// The value closest to `point` under `norm`.
    ///
    /// When several values are equally close, the first one reached by the
    /// search wins.
    ///
    /// # Panics
    ///
    /// Panics if the tree is empty. Check [`is_empty`](Self::is_empty) first.
    pub fn find_closest(&self, point: &Point<T>, norm: Norm) -> &Value<T, P> {
        let root = self
            .root
            .as_deref()
            .expect("find_closest requires a non-empty tree");
        let mut search = Nearest {
            query: *point,
            norm,
            best: None,
        };
        search.visit(root);
        match search.best {
            Some((_, value)) => value,
            None => unreachable!("a non-empty search always records a candidate"),
        }
    }

    /// Remove and return the value closest to `point` under `norm`.
    ///
    /// # Panics
    ///
    /// Panics if the tree is empty. Check [`is_empty`](Self::is_empty) first.
    pub fn pop_closest(&mut self, point: &Point<T>, norm: Norm) -> Value<T, P> {
        assert!(!self.is_empty(), "pop_closest requires a non-empty tree");
        let target = self.find_closest(point, norm).point;
        self.remove(&target)
            .expect("the closest point was just found in the tree")
    }
}
