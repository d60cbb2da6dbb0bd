use crate::errors::{Error, Result};
use crate::multi_intervals::MultiInterval;
use chrono::{Duration, NaiveDateTime};
use std::cmp::{Ordering, PartialOrd};

/// The type used for the bounds of all intervals.  This is a wall-clock
/// time, see `kalends_lib::times` to attach a timezone.
pub type Timestamp = NaiveDateTime;

/// Which convention an interval uses for its upper bound.  The lower bound
/// is always included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundsKind {
    /// `[A,B)`, the canonical convention
    ClosedOpen,

    /// `[A,B]`
    ClosedClosed,
}

impl std::fmt::Display for BoundsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsKind::ClosedOpen => write!(f, "left-closed right-open"),
            BoundsKind::ClosedClosed => write!(f, "left-closed right-closed"),
        }
    }
}

/// A range of timestamps.
/// Two intervals are equal only when they have the same bounds and the same
/// convention, so `[A,B]` and `[A,B+1ns)` are not equal even though they
/// contain the same timestamps.  Use [`Interval::canonical`] to compare
/// them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    from: Timestamp,
    until: Timestamp,
    kind: BoundsKind,
}

impl Interval {
    /// Construct a left-closed, right-open interval (`[A,B)`)
    pub fn new_closed_open(from: Timestamp, until: Timestamp) -> Result<Self> {
        if until < from {
            return Err(Error::InvalidBounds { from, until });
        }
        Ok(Self::new_unchecked(from, until))
    }

    /// Construct a left-closed, right-closed interval (`[A,B]`).
    /// The upper bound cannot be the largest possible timestamp, since such
    /// an interval would have no canonical form.
    pub fn new_closed_closed(from: Timestamp, until: Timestamp) -> Result<Self> {
        if until < from {
            return Err(Error::InvalidBounds { from, until });
        }
        if until == Timestamp::MAX {
            return Err(Error::InvalidBounds { from, until });
        }
        Ok(Self {
            from,
            until,
            kind: BoundsKind::ClosedClosed,
        })
    }

    /// An empty interval located at ts (`[ts,ts)`)
    pub fn empty_at(ts: Timestamp) -> Self {
        Self::new_unchecked(ts, ts)
    }

    /// Only called when we know that from <= until
    pub(crate) fn new_unchecked(from: Timestamp, until: Timestamp) -> Self {
        Self {
            from,
            until,
            kind: BoundsKind::ClosedOpen,
        }
    }

    /// The lower bound, always included in the interval
    pub fn from(&self) -> Timestamp {
        self.from
    }

    /// The upper bound.  Whether it is part of the interval depends on
    /// [`Interval::kind`].
    pub fn until(&self) -> Timestamp {
        self.until
    }

    pub fn kind(&self) -> BoundsKind {
        self.kind
    }

    /// Whether the upper bound is part of the interval
    pub fn upper_inclusive(&self) -> bool {
        matches!(self.kind, BoundsKind::ClosedClosed)
    }

    /// True if the interval contains no timestamp.  Only right-open
    /// intervals can be empty.
    pub fn is_empty(&self) -> bool {
        match self.kind {
            BoundsKind::ClosedOpen => self.from == self.until,
            BoundsKind::ClosedClosed => false,
        }
    }

    /// Returns the equivalent left-closed right-open interval.
    /// There is nothing between a timestamp and the next nanosecond, so
    /// `[A,B]` is the same set of values as `[A,B+1ns)`.
    pub fn canonical(&self) -> Self {
        match self.kind {
            BoundsKind::ClosedOpen => *self,
            BoundsKind::ClosedClosed => Self::new_unchecked(
                self.from,
                // new_closed_closed() ensured that until has a successor
                self.until + Duration::nanoseconds(1),
            ),
        }
    }

    /// The time between the two bounds of the canonical form
    pub fn duration(&self) -> Duration {
        let c = self.canonical();
        c.until - c.from
    }

    /// Whether ts is part of the interval
    pub fn contains_timestamp(&self, ts: &Timestamp) -> bool {
        self.from <= *ts
            && match self.kind {
                BoundsKind::ClosedOpen => *ts < self.until,
                BoundsKind::ClosedClosed => *ts <= self.until,
            }
    }

    /// Compare the two intervals: first by lower bound, then by upper bound.
    /// The ordering is ill-defined between intervals that use different
    /// conventions, so this returns an error for those.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        self.check_same_kind(other)?;
        Ok(self
            .from
            .cmp(&other.from)
            .then_with(|| self.until.cmp(&other.until)))
    }

    /// Whether self starts strictly before other
    /// ```txt
    ///    [---- self ----)
    ///        [---- other ----)
    /// ```
    pub fn begins_before(&self, other: &Self) -> Result<bool> {
        self.check_same_kind(other)?;
        Ok(self.from < other.from)
    }

    /// Whether self starts strictly after other
    pub fn begins_after(&self, other: &Self) -> Result<bool> {
        self.check_same_kind(other)?;
        Ok(self.from > other.from)
    }

    /// Whether self ends strictly before other
    pub fn ends_before(&self, other: &Self) -> Result<bool> {
        self.check_same_kind(other)?;
        Ok(self.until < other.until)
    }

    /// Whether self ends strictly after other
    /// ```txt
    ///        [---- self ----)
    ///    [---- other ----)
    /// ```
    pub fn ends_after(&self, other: &Self) -> Result<bool> {
        self.check_same_kind(other)?;
        Ok(self.until > other.until)
    }

    fn check_same_kind(&self, other: &Self) -> Result<()> {
        if self.kind == other.kind {
            Ok(())
        } else {
            Err(Error::IncompatibleIntervalKinds {
                left: self.kind,
                right: other.kind,
            })
        }
    }

    /// Whether the two intervals have at least one timestamp in common.
    pub fn intersects(&self, right: &Self) -> bool {
        let (left, right) = (self.canonical(), right.canonical());
        !left.is_empty()
            && !right.is_empty()
            && left.from < right.until
            && right.from < left.until
    }

    /// Whether all timestamps of right are also in self.
    pub fn contains_interval(&self, right: &Self) -> bool {
        let (left, right) = (self.canonical(), right.canonical());
        right.from >= left.from && right.until <= left.until
    }

    /// If neither interval is empty, returns true if they overlap or if
    /// one ends exactly where the other starts.
    pub fn contiguous(&self, right: &Self) -> bool {
        let (left, right) = (self.canonical(), right.canonical());
        left.is_empty()
            || right.is_empty()
            || (left.from <= right.until && right.from <= left.until)
    }

    /// The smallest interval containing both intervals.
    pub fn convex_hull(&self, right: &Self) -> Self {
        let (left, right) = (self.canonical(), right.canonical());
        if left.is_empty() {
            right
        } else if right.is_empty() {
            left
        } else {
            Self::new_unchecked(
                left.from.min(right.from),
                left.until.max(right.until),
            )
        }
    }

    /// Returns the result of removing all values in right from self.
    /// The result is always made of canonical, non-empty intervals.
    /// ```txt
    ///    [----------- self -----------)
    ///            [--- right ---)
    ///    [------)              [------)    two intervals
    /// ```
    pub fn difference(&self, right: &Self) -> MultiInterval {
        let (left, right) = (self.canonical(), right.canonical());
        if left.is_empty() {
            MultiInterval::Empty
        } else if right.is_empty() {
            MultiInterval::One(left)
        } else {
            // The upper bound of the first part can't go past left's own,
            // and the lower bound of the second part can't go before left's
            // own, so the parts are either empty or within left.
            MultiInterval::new_from_two(
                Self::new_unchecked(left.from, right.from.clamp(left.from, left.until)),
                Self::new_unchecked(right.until.clamp(left.from, left.until), left.until),
            )
        }
    }

    /// Returns the intersection of the two intervals, computed as
    /// `self - (self - right)`.  This is the same as the [`&`] operator.
    pub fn intersection(&self, right: &Self) -> Option<Self> {
        crate::algebra::intersect_canonical(&self.canonical(), &right.canonical())
    }

    /// Returns a single interval if the two are contiguous, or both
    /// (canonical) intervals otherwise.  This is the same as the [`|`]
    /// operator.
    pub fn union(&self, right: &Self) -> MultiInterval {
        let (left, right) = (self.canonical(), right.canonical());
        if self.contiguous(&right) {
            MultiInterval::One(left.convex_hull(&right))
        } else {
            MultiInterval::Two(left, right)
        }
    }
}

impl PartialOrd for Interval {
    /// Returns None when the two intervals use different conventions
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

///   &Interval - &Interval
impl core::ops::Sub<&Interval> for &Interval {
    type Output = MultiInterval;

    /// Same as [`Interval::difference()`]
    fn sub(self, rhs: &Interval) -> Self::Output {
        self.difference(rhs)
    }
}

///   Interval - Interval
impl core::ops::Sub<Interval> for Interval {
    type Output = MultiInterval;

    /// Same as [`Interval::difference()`]
    fn sub(self, rhs: Interval) -> Self::Output {
        self.difference(&rhs)
    }
}

///  &Interval & &Interval
impl std::ops::BitAnd<&Interval> for &Interval {
    type Output = Option<Interval>;

    /// Same as [`Interval::intersection()`]
    fn bitand(self, rhs: &Interval) -> Self::Output {
        self.intersection(rhs)
    }
}

///  Interval & Interval
impl std::ops::BitAnd<Interval> for Interval {
    type Output = Option<Interval>;

    fn bitand(self, rhs: Interval) -> Self::Output {
        self.intersection(&rhs)
    }
}

///  &Interval | &Interval
impl std::ops::BitOr<&Interval> for &Interval {
    type Output = MultiInterval;

    /// Same as [`Interval::union()`]
    fn bitor(self, rhs: &Interval) -> Self::Output {
        self.union(rhs)
    }
}

///  Interval | Interval
impl std::ops::BitOr<Interval> for Interval {
    type Output = MultiInterval;

    fn bitor(self, rhs: Interval) -> Self::Output {
        self.union(&rhs)
    }
}

impl ::core::fmt::Debug for Interval {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self)
    }
}

impl ::core::fmt::Display for Interval {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self.kind {
            BoundsKind::ClosedOpen => write!(f, "[{}, {})", self.from, self.until),
            BoundsKind::ClosedClosed => {
                write!(f, "[{}, {}]", self.from, self.until)
            }
        }
    }
}
