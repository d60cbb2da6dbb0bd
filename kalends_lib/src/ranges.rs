use crate::errors::{out_of_range, Error, Result};
use kalends_intervals::{Interval, Period};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A calendar granularity (months, ISO weeks) whose values can be numbered
/// consecutively.  Two consecutive values have consecutive ordinals.
pub trait CalendarUnit: Copy + Ord + std::fmt::Display {
    fn ordinal(&self) -> i64;
    fn from_ordinal(ordinal: i64) -> Result<Self>;

    /// Move forward (or backward when n is negative) by n units
    fn shift(&self, n: i64) -> Result<Self> {
        let ordinal = self
            .ordinal()
            .checked_add(n)
            .ok_or_else(|| out_of_range(format!("{self} shifted by {n}")))?;
        Self::from_ordinal(ordinal)
    }

    /// Number of units from other to self (negative if self is before)
    fn diff(&self, other: &Self) -> i64 {
        self.ordinal() - other.ordinal()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(&self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// A run of `size` consecutive months or weeks starting at `start`, going
/// forward or backward in time.
///
/// ```
///    use kalends_lib::months::CalendarMonth;
///    use kalends_lib::ranges::Range;
///
///    let year = Range::new(
///        CalendarMonth::new(2024, 1).unwrap(),
///        CalendarMonth::new(2024, 12).unwrap(),
///    );
///    assert_eq!(year.len(), 12);
///    assert_eq!(year.iter().last().unwrap().to_string(), "2024-12");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "RawRange<T>",
    bound(deserialize = "T: CalendarUnit + Deserialize<'de>")
)]
pub struct Range<T> {
    start: T,
    size: usize,
    direction: Direction,
}

impl<T: CalendarUnit> Range<T> {
    /// A range including both endpoints.  The direction is deduced from
    /// their order.
    pub fn new(first: T, last: T) -> Self {
        let diff = last.diff(&first);
        Self {
            start: first,
            size: diff.unsigned_abs() as usize + 1,
            direction: if diff < 0 {
                Direction::Backward
            } else {
                Direction::Forward
            },
        }
    }

    /// From first to last, in increasing order.  This is empty when last
    /// is before first.
    pub fn forward(first: T, last: T) -> Self {
        if last < first {
            Self::empty(first)
        } else {
            Self::new(first, last)
        }
    }

    /// From first to last, in decreasing order.  This is empty when last
    /// is after first.
    pub fn backward(first: T, last: T) -> Self {
        if first < last {
            Self::empty(first)
        } else {
            Self {
                direction: Direction::Backward,
                ..Self::new(first, last)
            }
        }
    }

    /// A range of size elements.  Fails if the last element cannot be
    /// represented.
    pub fn with_size(start: T, size: usize, direction: Direction) -> Result<Self> {
        if let Some(last) = size.checked_sub(1) {
            let last = i64::try_from(last)
                .map_err(|_| out_of_range(format!("range of {size} elements")))?;
            start.shift(direction.step() * last)?;
        }
        Ok(Self {
            start,
            size,
            direction,
        })
    }

    pub fn empty(start: T) -> Self {
        Self {
            start,
            size: 0,
            direction: Direction::Forward,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The first element in iteration order
    pub fn first(&self) -> Option<T> {
        self.iter().next()
    }

    /// The last element in iteration order
    pub fn last(&self) -> Option<T> {
        self.iter().next_back()
    }

    /// The smallest element, whatever the direction
    pub fn earliest(&self) -> Option<T> {
        match self.direction {
            Direction::Forward => self.first(),
            Direction::Backward => self.last(),
        }
    }

    /// The largest element, whatever the direction
    pub fn latest(&self) -> Option<T> {
        match self.direction {
            Direction::Forward => self.last(),
            Direction::Backward => self.first(),
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        match (self.earliest(), self.latest()) {
            (Some(e), Some(l)) => e <= *value && *value <= l,
            _ => false,
        }
    }

    /// Same elements, in the opposite order
    pub fn reversed(&self) -> Self {
        match self.last() {
            None => *self,
            Some(last) => Self {
                start: last,
                size: self.size,
                direction: match self.direction {
                    Direction::Forward => Direction::Backward,
                    Direction::Backward => Direction::Forward,
                },
            },
        }
    }

    /// Lazily enumerate the elements.  This can be called any number of
    /// times.
    pub fn iter(&self) -> RangeIter<T> {
        RangeIter {
            start: self.start.ordinal(),
            step: self.direction.step(),
            front: 0,
            back: self.size,
            _unit: PhantomData,
        }
    }
}

/// Deserialized fields, validated by [`Range::with_size`]
#[derive(Deserialize)]
struct RawRange<T> {
    start: T,
    size: usize,
    direction: Direction,
}

impl<T: CalendarUnit> TryFrom<RawRange<T>> for Range<T> {
    type Error = Error;

    fn try_from(raw: RawRange<T>) -> Result<Self> {
        Self::with_size(raw.start, raw.size, raw.direction)
    }
}

impl<T: CalendarUnit> IntoIterator for Range<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: CalendarUnit> IntoIterator for &Range<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// From the start of the earliest element to the end of the latest one
impl<T: CalendarUnit + Period> Period for Range<T> {
    fn to_interval(&self) -> kalends_intervals::Result<Interval> {
        match (self.earliest(), self.latest()) {
            (Some(earliest), Some(latest)) => Interval::new_closed_open(
                earliest.to_interval()?.from(),
                latest.to_interval()?.until(),
            ),
            _ => Err(kalends_intervals::Error::EmptyRange),
        }
    }
}

impl<T: CalendarUnit> std::fmt::Display for Range<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => write!(f, "{}/{}", first, last),
            _ => write!(f, "empty"),
        }
    }
}

pub struct RangeIter<T> {
    start: i64,
    step: i64,
    front: usize,
    back: usize,
    _unit: PhantomData<T>,
}

impl<T: CalendarUnit> RangeIter<T> {
    fn nth_unit(&self, pos: usize) -> Option<T> {
        // All elements of a range were checked when it was created
        T::from_ordinal(self.start + self.step * pos as i64).ok()
    }
}

impl<T: CalendarUnit> Iterator for RangeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let value = self.nth_unit(self.front);
        self.front += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: CalendarUnit> DoubleEndedIterator for RangeIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.nth_unit(self.back)
    }
}

impl<T: CalendarUnit> ExactSizeIterator for RangeIter<T> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::months::CalendarMonth;
    use crate::weeks::IsoWeek;
    use chrono::NaiveDate;

    fn month(y: i32, m: u32) -> CalendarMonth {
        CalendarMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_forward() {
        let r = Range::forward(month(2024, 1), month(2024, 12));
        assert_eq!(r.len(), 12);
        assert_eq!(r.direction(), Direction::Forward);
        let all: Vec<CalendarMonth> = r.iter().collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], month(2024, 1));
        assert_eq!(all[11], month(2024, 12));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(r.first(), Some(month(2024, 1)));
        assert_eq!(r.last(), Some(month(2024, 12)));

        // Restartable
        assert_eq!(r.iter().count(), 12);
        assert_eq!(r.into_iter().count(), 12);
    }

    #[test]
    fn test_backward() {
        let r = Range::backward(month(2024, 12), month(2024, 1));
        assert_eq!(r.len(), 12);
        assert_eq!(r.direction(), Direction::Backward);
        let forward: Vec<CalendarMonth> =
            Range::forward(month(2024, 1), month(2024, 12)).iter().collect();
        let mut backward: Vec<CalendarMonth> = r.iter().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(r.earliest(), Some(month(2024, 1)));
        assert_eq!(r.latest(), Some(month(2024, 12)));
        assert_eq!(r.to_string(), "2024-12/2024-01");
        assert_eq!(r.reversed(), Range::forward(month(2024, 1), month(2024, 12)));
    }

    #[test]
    fn test_new_infers_direction() {
        let r = Range::new(month(2024, 3), month(2023, 11));
        assert_eq!(r.len(), 5);
        assert_eq!(r.direction(), Direction::Backward);
        assert_eq!(r.first(), Some(month(2024, 3)));
        assert_eq!(r.last(), Some(month(2023, 11)));

        let single = Range::new(month(2024, 3), month(2024, 3));
        assert_eq!(single.len(), 1);
        assert_eq!(single.direction(), Direction::Forward);
    }

    #[test]
    fn test_empty() {
        let r = Range::forward(month(2024, 3), month(2024, 1));
        assert!(r.is_empty());
        assert_eq!(r.earliest(), None);
        assert_eq!(r.latest(), None);
        assert_eq!(r.iter().next(), None);
        assert!(!r.contains(&month(2024, 2)));
        assert_eq!(r.to_string(), "empty");
        assert_eq!(
            r.to_interval(),
            Err(kalends_intervals::Error::EmptyRange)
        );
        assert!(Range::backward(month(2024, 1), month(2024, 3)).is_empty());
    }

    #[test]
    fn test_with_size() {
        let start = IsoWeek::new(2020, 52).unwrap();
        let r = Range::with_size(start, 3, Direction::Forward).unwrap();
        assert_eq!(
            r.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
            vec!["2020-W52", "2020-W53", "2021-W01"]
        );
        let r = Range::with_size(start, 2, Direction::Backward).unwrap();
        assert_eq!(r.last(), Some(IsoWeek::new(2020, 51).unwrap()));
        assert!(Range::with_size(start, 0, Direction::Backward)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_shift_overflow() {
        let m = month(2024, 1);
        assert!(matches!(
            m.shift(i64::MAX),
            Err(Error::Interval(kalends_intervals::Error::OutOfRange(_)))
        ));
        assert!(m.shift(i64::MIN).is_err());
        let w = IsoWeek::new(2024, 1).unwrap();
        assert!(w.shift(i64::MAX).is_err());
        assert!(w.shift(i64::MIN).is_err());
        assert!(IsoWeek::from_ordinal(i64::MAX / 2).is_err());
        assert!(IsoWeek::from_ordinal(i64::MIN).is_err());
        assert!(Range::with_size(m, usize::MAX, Direction::Forward).is_err());
        assert!(Range::with_size(m, usize::MAX, Direction::Backward).is_err());
    }

    #[test]
    fn test_serde() {
        let r = Range::backward(month(2024, 3), month(2024, 1));
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"start":"2024-03","size":3,"direction":"Backward"}"#
        );
        assert_eq!(serde_json::from_str::<Range<CalendarMonth>>(&json).unwrap(), r);

        // The last element must exist
        assert!(serde_json::from_str::<Range<CalendarMonth>>(
            r#"{"start":"2024-03","size":18446744073709551615,"direction":"Forward"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Range<CalendarMonth>>(
            r#"{"start":"2024-03","size":1000000000000,"direction":"Forward"}"#
        )
        .is_err());
    }

    #[test]
    fn test_double_ended() {
        let r = Range::forward(month(2023, 11), month(2024, 2));
        let mut it = r.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next_back(), Some(month(2024, 2)));
        assert_eq!(it.next(), Some(month(2023, 11)));
        assert_eq!(it.len(), 2);
        assert_eq!(it.rev().collect::<Vec<_>>(), vec![month(2024, 1), month(2023, 12)]);
    }

    #[test]
    fn test_contains_and_period() {
        let r = Range::backward(month(2024, 3), month(2024, 1));
        assert!(r.contains(&month(2024, 2)));
        assert!(!r.contains(&month(2024, 4)));
        let intv = r.to_interval().unwrap();
        assert_eq!(
            intv.from(),
            kalends_intervals::midnight(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(
            intv.until(),
            kalends_intervals::midnight(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
        );
    }
}
