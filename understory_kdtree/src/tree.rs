// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `KdTree` container: construction, insertion, deletion, and exact lookup.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;

use log::{debug, trace};

use crate::build::{build_balanced, drain_subtree};
use crate::node::{Counters, Link, Node};
use crate::types::{Point, Scalar, Value, cmp_t, lt};

/// A mutable 2D K-D tree mapping unique points to payloads.
///
/// A node at depth `d` splits on axis `d % 2`: its child 0 subtree holds points
/// strictly less than it on that axis and its child 1 subtree holds the rest.
/// Ties on the splitting axis always go to child 1.
///
/// The tree tracks its size and the sum of all node depths incrementally. After
/// an insertion grows the depth sum past `bit_width(len) * len + 1` the whole
/// tree is rebuilt from its values (see [`KdTree::rebalance`]), which keeps the
/// average depth logarithmic amortized over any sequence of inserts and removes.
/// No per-operation worst-case bound is provided.
///
/// The tree is single-threaded: mutating it while an [`Iter`](crate::Iter) is
/// alive is prevented by the borrow checker, and concurrent use needs external
/// synchronization.
#[derive(Clone)]
pub struct KdTree<T, P> {
    pub(crate) root: Link<T, P>,
    pub(crate) counters: Counters,
}

/// Tree with `i32` coordinates.
pub type KdTreeI32<P> = KdTree<i32, P>;

/// Tree with `i64` coordinates.
pub type KdTreeI64<P> = KdTree<i64, P>;

/// Tree with `f32` coordinates.
pub type KdTreeF32<P> = KdTree<f32, P>;

/// Tree with `f64` coordinates.
pub type KdTreeF64<P> = KdTree<f64, P>;

enum Placement<P> {
    Inserted,
    /// The point was present; carries the payload that was not stored.
    Rejected(P),
    /// The point was present; carries the payload that was overwritten.
    Replaced(P),
}

impl<T, P> Default for KdTree<T, P> {
    fn default() -> Self {
        Self {
            root: None,
            counters: Counters::default(),
        }
    }
}

impl<T: Scalar, P> KdTree<T, P> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a balanced tree from `values` in one pass.
    ///
    /// This is much cheaper than inserting the values one at a time, as no
    /// rebalance is ever triggered. If several values share a point only the
    /// first one is kept, as sequential [`insert`](Self::insert) would do.
    pub fn from_values(mut values: Vec<Value<T, P>>) -> Self {
        // Stable sort, so the first of each run of equal points survives dedup.
        values.sort_by(|a, b| cmp_t(&a.point, &b.point));
        values.dedup_by(|later, earlier| later.point == earlier.point);

        let mut counters = Counters::default();
        let root = build_balanced(values, 0, &mut counters);
        Self { root, counters }
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.counters.count
    }

    /// Sum of the depths of all nodes (root depth is 0).
    pub fn depth_sum(&self) -> usize {
        self.counters.sum_depth
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.root = None;
        self.counters = Counters::default();
    }

    /// Insert `payload` at `point` unless the point is already present.
    ///
    /// Returns `true` if the value was inserted. An existing payload is never
    /// overwritten; use [`set`](Self::set) for that.
    pub fn insert(&mut self, point: Point<T>, payload: P) -> bool {
        self.insert_value(Value::new(point, payload))
    }

    /// Insert a [`Value`] unless its point is already present.
    pub fn insert_value(&mut self, value: Value<T, P>) -> bool {
        match self.place(value, false) {
            Placement::Inserted => true,
            Placement::Rejected(_) | Placement::Replaced(_) => false,
        }
    }

    /// Insert `payload` at `point`, overwriting any existing payload there.
    ///
    /// Returns the previous payload if the point was already present.
    pub fn set(&mut self, point: Point<T>, payload: P) -> Option<P> {
        match self.place(Value::new(point, payload), true) {
            Placement::Inserted | Placement::Rejected(_) => None,
            Placement::Replaced(old) => Some(old),
        }
    }

    /// Remove the value stored at `point`, if any.
    pub fn remove(&mut self, point: &Point<T>) -> Option<Value<T, P>> {
        remove_at(&mut self.root, point, &mut self.counters)
    }

    /// Whether a value is stored at `point`.
    pub fn exists(&self, point: &Point<T>) -> bool {
        self.find(point).is_some()
    }

    /// The value stored at `point`, if any.
    pub fn find(&self, point: &Point<T>) -> Option<&Value<T, P>> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if node.value.point == *point {
                return Some(&node.value);
            }
            cursor = node.children[node.child_for(point)].as_deref();
        }
        None
    }

    /// Mutable access to the payload stored at `point`, if any.
    pub fn find_mut(&mut self, point: &Point<T>) -> Option<&mut P> {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            if node.value.point == *point {
                return Some(&mut node.value.payload);
            }
            let child = node.child_for(point);
            cursor = node.children[child].as_deref_mut();
        }
        None
    }

    /// Rebuild the whole tree into balanced shape.
    ///
    /// Runs automatically after insertions that push the depth sum past the
    /// rebalance bound; calling it directly is useful after many removals.
    pub fn rebalance(&mut self) {
        if self.root.is_none() {
            return;
        }
        debug!("kdtree: rebalancing {} values", self.counters.count);
        let mut values = Vec::with_capacity(self.counters.count);
        drain_subtree(self.root.take(), &mut values, &mut self.counters);
        debug_assert_eq!(
            self.counters,
            Counters::default(),
            "draining the whole tree must zero the counters"
        );
        self.root = build_balanced(values, 0, &mut self.counters);
    }

    fn place(&mut self, value: Value<T, P>, overwrite: bool) -> Placement<P> {
        let mut link = &mut self.root;
        let mut depth = 0;
        while let Some(node) = link {
            if node.value.point == value.point {
                return if overwrite {
                    Placement::Replaced(mem::replace(&mut node.value.payload, value.payload))
                } else {
                    Placement::Rejected(value.payload)
                };
            }
            let child = node.child_for(&value.point);
            link = &mut node.children[child];
            depth += 1;
        }
        *link = Some(Box::new(Node::new(value, depth)));
        self.counters.attach(depth);

        if self.counters.needs_rebalance() {
            debug!(
                "kdtree: depth sum {} exceeds bound {} at {} values",
                self.counters.sum_depth,
                self.counters.rebalance_bound(),
                self.counters.count
            );
            self.rebalance();
        }
        Placement::Inserted
    }
}

/// Descend from `link` to the node holding `point` and remove it.
fn remove_at<T: Scalar, P>(
    link: &mut Link<T, P>,
    point: &Point<T>,
    counters: &mut Counters,
) -> Option<Value<T, P>> {
    let node = link.as_mut()?;
    if node.value.point == *point {
        return remove_node(link, counters);
    }
    let child = node.child_for(point);
    remove_at(&mut node.children[child], point, counters)
}

/// Remove the node at `link`, keeping the K-D invariant for everything around it.
fn remove_node<T: Scalar, P>(link: &mut Link<T, P>, counters: &mut Counters) -> Option<Value<T, P>> {
    let node = link.as_mut()?;

    if node.children[1].is_some() {
        // Any value in the right subtree is >= this node on its axis, so the
        // minimum one can take its place without moving anything else.
        let successor = leftmost_along_axis(node.children[1].as_deref(), node.axis())?;
        let replacement = remove_at(&mut node.children[1], &successor, counters)?;
        return Some(mem::replace(&mut node.value, replacement));
    }

    if let Some(left) = node.children[0].take() {
        // Promoting the left maximum would strand values tied with it on the
        // axis in the left subtree, so rebuild the left subtree in place instead.
        let depth = node.depth;
        let mut values = Vec::new();
        drain_subtree(Some(left), &mut values, counters);
        trace!(
            "kdtree: rebuilding {} values under a removed node at depth {depth}",
            values.len()
        );
        let removed = link.take()?;
        counters.detach(depth);
        *link = build_balanced(values, depth, counters);
        return Some(removed.value);
    }

    let removed = link.take()?;
    counters.detach(removed.depth);
    Some(removed.value)
}

/// Point of the node with the smallest coordinate on `axis` in the subtree.
///
/// Ties prefer the deepest node, which keeps replacement cascades short.
fn leftmost_along_axis<T: Scalar, P>(root: Option<&Node<T, P>>, axis: usize) -> Option<Point<T>> {
    let mut best: Option<&Node<T, P>> = None;
    let mut stack: Vec<&Node<T, P>> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        let coord = node.value.point[axis];
        let better = match best {
            None => true,
            Some(b) => {
                let best_coord = b.value.point[axis];
                lt(coord, best_coord) || (coord == best_coord && node.depth > b.depth)
            }
        };
        if better {
            best = Some(node);
        }
        stack.extend(node.children[0].as_deref());
        // Nodes splitting on `axis` keep only values >= themselves on their right.
        if node.axis() != axis {
            stack.extend(node.children[1].as_deref());
        }
    }
    best.map(|n| n.value.point)
}

impl<T: Scalar, P> FromIterator<Value<T, P>> for KdTree<T, P> {
    fn from_iter<I: IntoIterator<Item = Value<T, P>>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

impl<T: Scalar, P> Extend<Value<T, P>> for KdTree<T, P> {
    fn extend<I: IntoIterator<Item = Value<T, P>>>(&mut self, iter: I) {
        for value in iter {
            self.insert_value(value);
        }
    }
}

impl<T: Scalar, P> Debug for KdTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("len", &self.counters.count)
            .field("depth_sum", &self.counters.sum_depth)
            .field("root", &self.root.as_ref().map(|n| n.value.point))
            .finish_non_exhaustive()
    }
}
