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
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// An abstract, unitless point in the schedule (e.g. an operator index in a
/// compiled program).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimePoint(i64);

/// The difference between two [`TimePoint`]s.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeDelta(i64);

/// The half-open interval of time during which a buffer is live.
pub type Lifespan = Interval<TimePoint>;

impl std::fmt::Display for TimePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TimePoint {
    #[inline]
    fn from(v: i64) -> Self {
        TimePoint(v)
    }
}

impl TimePoint {
    #[inline]
    pub const fn new(v: i64) -> Self {
        TimePoint(v)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Add<TimeDelta> for TimePoint {
    type Output = TimePoint;

    #[inline]
    fn add(self, rhs: TimeDelta) -> TimePoint {
        TimePoint(self.0 + rhs.0)
    }
}

impl Sub<TimeDelta> for TimePoint {
    type Output = TimePoint;

    #[inline]
    fn sub(self, rhs: TimeDelta) -> TimePoint {
        TimePoint(self.0 - rhs.0)
    }
}

impl Sub<TimePoint> for TimePoint {
    type Output = TimeDelta;

    #[inline]
    fn sub(self, rhs: TimePoint) -> TimeDelta {
        TimeDelta(self.0 - rhs.0)
    }
}

impl AddAssign<TimeDelta> for TimePoint {
    #[inline]
    fn add_assign(&mut self, rhs: TimeDelta) {
        self.0 += rhs.0;
    }
}

impl SubAssign<TimeDelta> for TimePoint {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeDelta) {
        self.0 -= rhs.0;
    }
}

impl std::fmt::Display for TimeDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TimeDelta {
    #[inline]
    fn from(v: i64) -> Self {
        TimeDelta(v)
    }
}

impl TimeDelta {
    #[inline]
    pub const fn new(v: i64) -> Self {
        TimeDelta(v)
    }

    #[inline]
    pub const fn zero() -> Self {
        TimeDelta(0)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Add for TimeDelta {
    type Output = TimeDelta;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        TimeDelta(self.0 + rhs.0)
    }
}

impl Sub for TimeDelta {
    type Output = TimeDelta;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        TimeDelta(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_point_arithmetic() {
        let t = TimePoint::new(5);
        assert_eq!(t + TimeDelta::new(3), TimePoint::new(8));
        assert_eq!(t - TimeDelta::new(3), TimePoint::new(2));
        assert_eq!(TimePoint::new(8) - t, TimeDelta::new(3));
    }

    #[test]
    fn test_lifespan_measure() {
        let lifespan = Lifespan::new(TimePoint::new(2), TimePoint::new(9));
        assert_eq!(lifespan.measure(), TimeDelta::new(7));
        assert!(lifespan.contains(TimePoint::new(2)));
        assert!(!lifespan.contains(TimePoint::new(9)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TimePoint::new(4)), "4");
        let lifespan = Lifespan::new(TimePoint::new(0), TimePoint::new(3));
        assert_eq!(format!("{}", lifespan), "[0, 3)");
    }
}
