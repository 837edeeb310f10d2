// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pre-order traversal driven by an explicit stack.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::node::{Link, Node};
use crate::tree::KdTree;
use crate::types::{Scalar, Value};

/// Borrowing iterator over the nodes of a subtree, parent before children,
/// child 0 before child 1.
#[derive(Clone, Debug)]
pub(crate) struct Nodes<'a, T, P> {
    stack: Vec<&'a Node<T, P>>,
}

impl<'a, T, P> Nodes<'a, T, P> {
    pub(crate) fn new(root: Option<&'a Node<T, P>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T, P> Iterator for Nodes<'a, T, P> {
    type Item = &'a Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children[1].as_deref());
        self.stack.extend(node.children[0].as_deref());
        Some(node)
    }
}

impl<T, P> FusedIterator for Nodes<'_, T, P> {}

/// Iterator over the values of a [`KdTree`] in pre-order.
///
/// Created by [`KdTree::iter`]. The order depends on the tree's shape and is
/// not sorted in any sense.
#[derive(Clone, Debug)]
pub struct Iter<'a, T, P> {
    nodes: Nodes<'a, T, P>,
    remaining: usize,
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = &'a Value<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, P> ExactSizeIterator for Iter<'_, T, P> {}

impl<T, P> FusedIterator for Iter<'_, T, P> {}

/// Owning iterator over the values of a [`KdTree`] in pre-order.
///
/// Created by [`KdTree::into_iter`](IntoIterator::into_iter).
#[derive(Debug)]
pub struct IntoIter<T, P> {
    stack: Vec<Box<Node<T, P>>>,
    remaining: usize,
}

impl<T, P> Iterator for IntoIter<T, P> {
    type Item = Value<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node {
            value,
            children: [first, second],
            ..
        } = *node;
        self.stack.extend(second);
        self.stack.extend(first);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, P> ExactSizeIterator for IntoIter<T, P> {}

impl<T, P> FusedIterator for IntoIter<T, P> {}

impl<T: Scalar, P> KdTree<T, P> {
    /// Iterate over all values, each node before its children.
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            nodes: self.nodes(),
            remaining: self.len(),
        }
    }

    pub(crate) fn nodes(&self) -> Nodes<'_, T, P> {
        Nodes::new(self.root.as_deref())
    }
}

impl<'a, T: Scalar, P> IntoIterator for &'a KdTree<T, P> {
    type Item = &'a Value<T, P>;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Scalar, P> IntoIterator for KdTree<T, P> {
    type Item = Value<T, P>;
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        let root: Link<T, P> = self.root;
        IntoIter {
            stack: root.into_iter().collect(),
            remaining,
        }
    }
}
