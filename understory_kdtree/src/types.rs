// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points, stored values, and the coordinate scalar abstraction.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::ops::{Index, IndexMut};

/// A point in 2D, keyed by two coordinates of the same scalar type.
///
/// Coordinates are reachable by name (`x`, `y`) or by axis index (`p[0]`, `p[1]`);
/// the tree alternates the splitting axis with depth and uses the indexed form.
/// The derived ordering is lexicographic: by `x`, then by `y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point<T> {
    /// First coordinate (axis 0).
    pub x: T,
    /// Second coordinate (axis 1).
    pub y: T,
}

/// Point with `i32` coordinates.
pub type Pointi = Point<i32>;

/// Point with `f32` coordinates.
pub type Pointf = Point<f32>;

/// Point with `f64` coordinates.
pub type Pointd = Point<f64>;

impl<T> Point<T> {
    /// Create a new point.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Scalar> Point<T> {
    /// Euclidean distance to `other`.
    ///
    /// Intended for display and debugging; nearest-neighbor search compares
    /// [`Norm`](crate::Norm) distances in the scalar's accumulator type instead.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = T::to_f64(self.x) - T::to_f64(other.x);
        let dy = T::to_f64(self.y) - T::to_f64(other.y);
        sqrt(dx * dx + dy * dy)
    }
}

impl<T> Index<usize> for Point<T> {
    type Output = T;

    fn index(&self, axis: usize) -> &T {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("axis {axis} is out of range for a 2D point"),
        }
    }
}

impl<T> IndexMut<usize> for Point<T> {
    fn index_mut(&mut self, axis: usize) -> &mut T {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("axis {axis} is out of range for a 2D point"),
        }
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T: Display> Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.x, self.y)
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Point> for Point<f64> {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[cfg(feature = "kurbo")]
impl From<Point<f64>> for kurbo::Point {
    fn from(p: Point<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

/// A payload stored under a point. The point is the value's unique key within a tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Value<T, P> {
    /// Key of this value.
    pub point: Point<T>,
    /// User payload.
    pub payload: P,
}

impl<T, P> Value<T, P> {
    /// Pair a payload with its point.
    pub const fn new(point: Point<T>, payload: P) -> Self {
        Self { point, payload }
    }
}

impl<T, P> From<(Point<T>, P)> for Value<T, P> {
    fn from((point, payload): (Point<T>, P)) -> Self {
        Self { point, payload }
    }
}

impl<T: Display, P: Display> Display for Value<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({}, {})", self.payload, self.point)
    }
}

/// Numeric coordinate abstraction.
///
/// Distances are accumulated in a widened type (`i32`→`i64`, `i64`→`i128`,
/// `f32`→`f64`) so that integer norms do not overflow for ordinary inputs.
/// Integer accumulators saturate instead of wrapping at the extremes.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type for distances.
    type Acc: Copy + PartialOrd + Debug;

    /// Absolute difference `|a - b|` in the accumulator type.
    fn abs_delta(a: Self, b: Self) -> Self::Acc;

    /// Add two accumulator values.
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc;

    /// Multiply two accumulator values.
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc;

    /// Convert to `f64` for display-oriented math.
    fn to_f64(v: Self) -> f64;
}

impl Scalar for i32 {
    type Acc = i64;

    #[inline]
    fn abs_delta(a: Self, b: Self) -> Self::Acc {
        (i64::from(a) - i64::from(b)).abs()
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_add(b)
    }

    #[inline]
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_mul(b)
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn abs_delta(a: Self, b: Self) -> Self::Acc {
        (i128::from(a) - i128::from(b)).abs()
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_add(b)
    }

    #[inline]
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_mul(b)
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        v as f64
    }
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn abs_delta(a: Self, b: Self) -> Self::Acc {
        abs_f64(f64::from(a) - f64::from(b))
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }

    #[inline]
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a * b
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn abs_delta(a: Self, b: Self) -> Self::Acc {
        abs_f64(a - b)
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }

    #[inline]
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a * b
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        v
    }
}

/// Helper alias for the accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

#[inline]
fn abs_f64(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}

#[cfg(feature = "std")]
pub(crate) fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}

/// Total comparison used for selection; incomparable values (NaN) compare equal.
pub(crate) fn cmp_t<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
