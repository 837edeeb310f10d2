// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Median-partition bulk construction and subtree teardown.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::node::{Counters, Link, Node, axis_at};
use crate::types::{Scalar, Value, cmp_t, lt};

/// Build a balanced subtree rooted at `depth` from `values`.
///
/// The pivot at each level is the lower median along the level's axis, found
/// with an expected-linear selection. Among values tied with the median on that
/// axis, the first one in partition order becomes the pivot and every strictly
/// smaller value lands in child 0, so child 0 never holds a value equal to its
/// parent on the splitting axis.
///
/// Every created node is recorded in `counters`.
pub(crate) fn build_balanced<T: Scalar, P>(
    mut values: Vec<Value<T, P>>,
    depth: usize,
    counters: &mut Counters,
) -> Link<T, P> {
    if values.is_empty() {
        return None;
    }
    let axis = axis_at(depth);
    let mid = values.len() / 2;
    values.select_nth_unstable_by(mid, |a, b| cmp_t(&a.point[axis], &b.point[axis]));
    let pivot = partition_below(&mut values, mid, axis);

    let right = values.split_off(pivot + 1);
    let value = values.pop()?;
    counters.attach(depth);
    let mut node = Box::new(Node::new(value, depth));
    node.children[0] = build_balanced(values, depth + 1, counters);
    node.children[1] = build_balanced(right, depth + 1, counters);
    Some(node)
}

/// Move every value in `values[..mid]` that is strictly less than `values[mid]`
/// on `axis` to the front, then place the selected value right after them.
///
/// Requires `values[..mid]` to hold no value greater than `values[mid]` on
/// `axis` (the post-condition of selection). Returns the pivot's new index.
fn partition_below<T: Scalar, P>(values: &mut [Value<T, P>], mid: usize, axis: usize) -> usize {
    let split = values[mid].point[axis];
    let mut first = 0;
    for i in 0..mid {
        if lt(values[i].point[axis], split) {
            values.swap(first, i);
            first += 1;
        }
    }
    values.swap(first, mid);
    first
}

/// Detach every node of `link`, appending values in pre-order.
///
/// Uses an explicit stack; each detached node is removed from `counters`.
pub(crate) fn drain_subtree<T, P>(
    link: Link<T, P>,
    out: &mut Vec<Value<T, P>>,
    counters: &mut Counters,
) {
    let mut stack: Vec<Box<Node<T, P>>> = match link {
        Some(node) => vec![node],
        None => return,
    };
    while let Some(node) = stack.pop() {
        let Node {
            value,
            depth,
            children: [first, second],
        } = *node;
        counters.detach(depth);
        out.push(value);
        stack.extend(second);
        stack.extend(first);
    }
}
