// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::primitives::Interval;
use num_traits::Zero;
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

/// An address in the linear address space assigned to a buffer.
///
/// Offsets are unitless (typically bytes) and non-negative in any feasible
/// assignment, but the type is signed so that intermediate bound arithmetic
/// (which may involve negative effective sizes) stays closed.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Offset(i64);

/// A vertical extent in the address space, e.g. a buffer size or the height
/// of a window.
///
/// Signed: the effective size of a staircase-shaped buffer against a
/// neighbor can legitimately be zero or negative when their windows clear
/// one another.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct SpaceLength(i64);

/// The half-open vertical slice `[lower, upper)` a buffer occupies,
/// relative to its base offset.
pub type Window = Interval<Offset>;

impl std::fmt::Display for Offset {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Offset {
    #[inline]
    fn from(v: i64) -> Self {
        Offset(v)
    }
}

impl Offset {
    #[inline]
    pub const fn new(v: i64) -> Self {
        Offset(v)
    }

    #[inline]
    pub const fn zero() -> Self {
        Offset(0)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Rounds this offset up to the next multiple of `alignment`.
    ///
    /// `alignment` must be positive.
    #[inline]
    pub fn align_up(self, alignment: i64) -> Self {
        debug_assert!(alignment > 0, "Offset::align_up: non-positive alignment");
        let rem = self.0.rem_euclid(alignment);
        if rem == 0 {
            self
        } else {
            Offset(self.0 + (alignment - rem))
        }
    }

    /// Returns `true` if this offset is a multiple of `alignment`.
    #[inline]
    pub fn is_aligned_to(self, alignment: i64) -> bool {
        debug_assert!(alignment > 0);
        self.0.rem_euclid(alignment) == 0
    }

    #[inline]
    pub fn checked_add(self, len: SpaceLength) -> Option<Self> {
        self.0.checked_add(len.0).map(Offset)
    }
}

impl Add<SpaceLength> for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: SpaceLength) -> Offset {
        Offset(self.0 + rhs.0)
    }
}

impl Sub<SpaceLength> for Offset {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: SpaceLength) -> Offset {
        Offset(self.0 - rhs.0)
    }
}

impl Sub<Offset> for Offset {
    type Output = SpaceLength;

    #[inline]
    fn sub(self, rhs: Offset) -> SpaceLength {
        SpaceLength(self.0 - rhs.0)
    }
}

impl AddAssign<SpaceLength> for Offset {
    #[inline]
    fn add_assign(&mut self, rhs: SpaceLength) {
        self.0 += rhs.0;
    }
}

impl SubAssign<SpaceLength> for Offset {
    #[inline]
    fn sub_assign(&mut self, rhs: SpaceLength) {
        self.0 -= rhs.0;
    }
}

impl std::fmt::Display for SpaceLength {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SpaceLength {
    #[inline]
    fn from(v: i64) -> Self {
        SpaceLength(v)
    }
}

impl SpaceLength {
    #[inline]
    pub const fn new(v: i64) -> Self {
        SpaceLength(v)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(SpaceLength)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        SpaceLength(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        SpaceLength(self.0.max(rhs.0))
    }

    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        SpaceLength(self.0.min(rhs.0))
    }
}

impl Zero for SpaceLength {
    #[inline]
    fn zero() -> Self {
        SpaceLength(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for SpaceLength {
    type Output = SpaceLength;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        SpaceLength(self.0 + rhs.0)
    }
}

impl Sub for SpaceLength {
    type Output = SpaceLength;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        SpaceLength(self.0 - rhs.0)
    }
}

impl Neg for SpaceLength {
    type Output = SpaceLength;

    #[inline]
    fn neg(self) -> Self {
        SpaceLength(-self.0)
    }
}

impl AddAssign for SpaceLength {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for SpaceLength {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for SpaceLength {
    type Output = SpaceLength;

    #[inline]
    fn mul(self, rhs: i64) -> Self {
        SpaceLength(self.0 * rhs)
    }
}

impl Sum for SpaceLength {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        SpaceLength(iter.map(|l| l.0).sum())
    }
}

impl Interval<Offset> {
    /// Returns the height of this window.
    #[inline]
    pub fn height(&self) -> SpaceLength {
        self.measure()
    }
}
