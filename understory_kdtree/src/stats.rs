// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth and balance diagnostics, and a human-readable tree dump.
//!
//! None of this is a stable machine contract; the formats are for debugging.

use alloc::string::{String, ToString};
use core::fmt::{self, Display};

use crate::node::Node;
use crate::tree::KdTree;
use crate::types::{Scalar, sqrt};

/// Snapshot of a tree's shape statistics.
///
/// Displayed as `size: N, max depth: D, avg depth: A, std dev: S, balance: B`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Balance {
    /// Number of values.
    pub size: usize,
    /// See [`KdTree::depth_max`].
    pub depth_max: usize,
    /// See [`KdTree::depth_avg`].
    pub depth_avg: f64,
    /// See [`KdTree::depth_stddev`].
    pub depth_stddev: f64,
    /// See [`KdTree::balance_factor`].
    pub balance_factor: f64,
}

impl Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size: {}, max depth: {}, avg depth: {:.3}, std dev: {:.3}, balance: {:.3}",
            self.size, self.depth_max, self.depth_avg, self.depth_stddev, self.balance_factor
        )
    }
}

impl<T: Scalar, P> KdTree<T, P> {
    /// Largest node depth, or 0 for an empty tree.
    pub fn depth_max(&self) -> usize {
        self.nodes().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Mean node depth, from the incrementally tracked depth sum. 0 when empty.
    pub fn depth_avg(&self) -> f64 {
        if self.counters.count == 0 {
            return 0.0;
        }
        self.counters.sum_depth as f64 / self.counters.count as f64
    }

    /// Structural imbalance measure.
    ///
    /// One bottom-up pass computes, for each subtree, its height and an
    /// accumulator equal to the accumulators of both children plus the squared
    /// difference of their heights. The result is `sqrt(acc(root) / len)`.
    /// This is 0 for a tree where every node's subtrees have equal height; it
    /// is not the statistical standard deviation of node depths.
    pub fn depth_stddev(&self) -> f64 {
        if self.counters.count == 0 {
            return 0.0;
        }
        let (_, acc) = height_imbalance(self.root.as_deref());
        sqrt(acc / self.counters.count as f64)
    }

    /// Number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|n| n.is_leaf()).count()
    }

    /// `2 * leaf_count / len`, or 1 for an empty tree.
    ///
    /// A complete tree scores close to 1; a chain scores close to 0. Lower means
    /// more nodes have a single child.
    pub fn balance_factor(&self) -> f64 {
        if self.counters.count == 0 {
            return 1.0;
        }
        2.0 * self.leaf_count() as f64 / self.counters.count as f64
    }

    /// All balance statistics at once.
    pub fn balance(&self) -> Balance {
        Balance {
            size: self.len(),
            depth_max: self.depth_max(),
            depth_avg: self.depth_avg(),
            depth_stddev: self.depth_stddev(),
            balance_factor: self.balance_factor(),
        }
    }

    /// One-line balance summary, as printed by [`Balance`]'s `Display`.
    pub fn balance_str(&self) -> String {
        self.balance().to_string()
    }
}

impl<T: Scalar + Display, P: Display> KdTree<T, P> {
    /// Indented dump of the tree, one value per line.
    ///
    /// Child 0 is drawn with `├─` and child 1 with `└─`.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

/// `(height, accumulator)` of a subtree, see [`KdTree::depth_stddev`].
fn height_imbalance<T, P>(node: Option<&Node<T, P>>) -> (usize, f64) {
    let Some(node) = node else {
        return (0, 0.0);
    };
    let (lh, lacc) = height_imbalance(node.children[0].as_deref());
    let (rh, racc) = height_imbalance(node.children[1].as_deref());
    let diff = lh.abs_diff(rh) as f64;
    (lh.max(rh) + 1, lacc + racc + diff * diff)
}

fn fmt_subtree<T: Display, P: Display>(
    f: &mut fmt::Formatter<'_>,
    node: Option<&Node<T, P>>,
    prefix: &mut String,
    first: bool,
) -> fmt::Result {
    let Some(node) = node else {
        return Ok(());
    };
    writeln!(f, "{prefix}{}{}", if first { "├─" } else { "└─" }, node.value)?;
    let len = prefix.len();
    prefix.push_str(if first { "│ " } else { "  " });
    fmt_subtree(f, node.children[0].as_deref(), prefix, true)?;
    fmt_subtree(f, node.children[1].as_deref(), prefix, false)?;
    prefix.truncate(len);
    Ok(())
}

impl<T: Display, P: Display> Display for KdTree<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root.as_deref() else {
            return Ok(());
        };
        writeln!(f, "{}", root.value)?;
        let mut prefix = String::new();
        fmt_subtree(f, root.children[0].as_deref(), &mut prefix, true)?;
        fmt_subtree(f, root.children[1].as_deref(), &mut prefix, false)
    }
}
