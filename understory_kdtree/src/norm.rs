// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance metrics for nearest-neighbor queries.

use crate::types::{Point, Scalar, lt};

/// Distance metric used by [`KdTree::find_closest`](crate::KdTree::find_closest)
/// and [`KdTree::pop_closest`](crate::KdTree::pop_closest).
///
/// All distances are computed in the scalar's widened accumulator type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Norm {
    /// Manhattan distance: `|dx| + |dy|`.
    L1,
    /// Squared Euclidean distance: `dx² + dy²`.
    ///
    /// The square root is never taken; the ordering of candidates is the same.
    #[default]
    L2,
    /// Chebyshev distance: `max(|dx|, |dy|)`.
    Linf,
}

impl Norm {
    /// Distance between `a` and `b` under this norm.
    #[inline]
    pub fn distance<T: Scalar>(self, a: &Point<T>, b: &Point<T>) -> T::Acc {
        let dx = T::abs_delta(a.x, b.x);
        let dy = T::abs_delta(a.y, b.y);
        match self {
            Self::L1 => T::acc_add(dx, dy),
            Self::L2 => T::acc_add(T::acc_mul(dx, dx), T::acc_mul(dy, dy)),
            Self::Linf => {
                if lt(dx, dy) {
                    dy
                } else {
                    dx
                }
            }
        }
    }

    /// Lower bound on the distance to any point on the far side of a split at `split`,
    /// in the same units as [`Norm::distance`].
    #[inline]
    pub fn axis_distance<T: Scalar>(self, coord: T, split: T) -> T::Acc {
        let d = T::abs_delta(coord, split);
        match self {
            Self::L1 | Self::Linf => d,
            Self::L2 => T::acc_mul(d, d),
        }
    }
}
