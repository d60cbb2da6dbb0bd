use crate::errors::{Error, Result};
use crate::intervals::{Interval, Timestamp};
use chrono::{NaiveDate, NaiveTime};

/// Anything that covers a span of time.
///
/// The only requirement is to be able to convert to a canonical interval
/// (left-closed, right-open).  All operations in [`crate::algebra`] and
/// [`crate::overlay()`] go through this conversion, and never look at the
/// fields of the period itself.
///
/// The conversion should only fail when the period violates its own
/// invariants (an empty range for instance).
/// ```
///    use kalends_intervals::{Interval, Period, Result, midnight};
///    use chrono::NaiveDate;
///
///    struct Stay {
///        arrival: NaiveDate,
///        departure: NaiveDate,
///    }
///    impl Period for Stay {
///        fn to_interval(&self) -> Result<Interval> {
///            Interval::new_closed_open(
///                midnight(self.arrival),
///                midnight(self.departure),
///            )
///        }
///    }
/// ```
pub trait Period {
    fn to_interval(&self) -> Result<Interval>;
}

/// The first timestamp of a date
pub fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN)
}

impl Period for Interval {
    fn to_interval(&self) -> Result<Interval> {
        Ok(self.canonical())
    }
}

/// A calendar date, from its midnight to the next one
impl Period for NaiveDate {
    fn to_interval(&self) -> Result<Interval> {
        let next = self
            .succ_opt()
            .ok_or_else(|| Error::OutOfRange(format!("no date after {self}")))?;
        Interval::new_closed_open(midnight(*self), midnight(next))
    }
}

impl<P: Period + ?Sized> Period for &P {
    fn to_interval(&self) -> Result<Interval> {
        (**self).to_interval()
    }
}

impl<P: Period + ?Sized> Period for Box<P> {
    fn to_interval(&self) -> Result<Interval> {
        (**self).to_interval()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_date() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let intv = d.to_interval().unwrap();
        assert_eq!(intv.from(), d.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            intv.until(),
            NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(intv.duration(), Duration::hours(24));

        assert!(matches!(
            NaiveDate::MAX.to_interval(),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_interval_is_canonical() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let closed =
            Interval::new_closed_closed(midnight(d), midnight(d)).unwrap();
        assert_eq!(closed.to_interval().unwrap(), closed.canonical());
    }

    #[test]
    fn test_dyn() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let periods: Vec<Box<dyn Period>> =
            vec![Box::new(d), Box::new(d.to_interval().unwrap())];
        assert_eq!(
            periods[0].to_interval().unwrap(),
            periods[1].to_interval().unwrap()
        );
        let by_ref: &dyn Period = &d;
        assert_eq!((&by_ref).to_interval(), d.to_interval());
    }
}
