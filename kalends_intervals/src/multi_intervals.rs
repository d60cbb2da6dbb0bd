use crate::intervals::Interval;

/// The result of operations on two intervals, which might give zero, one or
/// two intervals.  Empty intervals are never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultiInterval {
    Empty,
    One(Interval),
    Two(Interval, Interval),
}

impl MultiInterval {
    /// Combine two intervals, dropping whichever is empty.
    pub fn new_from_two(first: Interval, second: Interval) -> Self {
        match (first.is_empty(), second.is_empty()) {
            (true, true) => MultiInterval::Empty,
            (true, false) => MultiInterval::One(second),
            (false, true) => MultiInterval::One(first),
            (false, false) => MultiInterval::Two(first, second),
        }
    }

    /// Number of intervals
    pub fn len(&self) -> usize {
        match self {
            MultiInterval::Empty => 0,
            MultiInterval::One(_) => 1,
            MultiInterval::Two(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MultiInterval::Empty)
    }

    /// Returns the single interval, if there is exactly one
    pub fn single(&self) -> Option<Interval> {
        match self {
            MultiInterval::One(i) => Some(*i),
            MultiInterval::Empty | MultiInterval::Two(_, _) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> + '_ {
        let (first, second) = match self {
            MultiInterval::Empty => (None, None),
            MultiInterval::One(i) => (Some(i), None),
            MultiInterval::Two(i, j) => (Some(i), Some(j)),
        };
        first.into_iter().chain(second)
    }

    pub fn into_vec(self) -> Vec<Interval> {
        self.iter().copied().collect()
    }
}

impl IntoIterator for MultiInterval {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl ::core::fmt::Display for MultiInterval {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            MultiInterval::Empty => write!(f, "empty"),
            MultiInterval::One(i) => write!(f, "{}", i),
            MultiInterval::Two(i, j) => write!(f, "{} + {}", i, j),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> Interval {
        let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        Interval::new_closed_open(
            date.and_hms_opt(0, 0, 0).unwrap(),
            date.and_hms_opt(12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_from_two() {
        let empty = Interval::empty_at(day(1).from());
        assert_eq!(MultiInterval::new_from_two(empty, empty), MultiInterval::Empty);
        assert_eq!(
            MultiInterval::new_from_two(empty, day(2)),
            MultiInterval::One(day(2))
        );
        assert_eq!(
            MultiInterval::new_from_two(day(1), empty),
            MultiInterval::One(day(1))
        );
        assert_eq!(
            MultiInterval::new_from_two(day(1), day(2)),
            MultiInterval::Two(day(1), day(2))
        );
    }

    #[test]
    fn test_iter() {
        assert_eq!(MultiInterval::Empty.len(), 0);
        assert!(MultiInterval::Empty.is_empty());
        assert_eq!(MultiInterval::Empty.into_vec(), vec![]);

        let one = MultiInterval::One(day(3));
        assert_eq!(one.len(), 1);
        assert_eq!(one.single(), Some(day(3)));
        assert_eq!(one.into_vec(), vec![day(3)]);

        let two = MultiInterval::Two(day(3), day(5));
        assert_eq!(two.len(), 2);
        assert_eq!(two.single(), None);
        assert_eq!(two.into_iter().collect::<Vec<_>>(), vec![day(3), day(5)]);
        assert_eq!(
            format!("{}", two),
            "[2024-03-03 00:00:00, 2024-03-03 12:00:00) + \
             [2024-03-05 00:00:00, 2024-03-05 12:00:00)"
        );
    }
}
