//! Textual representation of periods.
//!
//! | Literal                   | Period
//! |---------------------------|------------------------------------------
//! | `2024-07`                 | [`CalendarMonth`]
//! | `2024-W05`                | [`IsoWeek`]
//! | `2024-07-14`              | a single day
//! | `2024-W05-3`              | a single day, given as ISO week and weekday
//! | `2024-07-14T08:30:00`     | a timestamp, only valid inside a range
//! | `<left>/<right>`          | a range, both sides of the same kind
//!
//! Ranges of months, weeks or days include their right endpoint, so
//! `2024-01/2024-12` is the whole year 2024.  Ranges of timestamps are
//! half-open: `2024-07-14T08:00/2024-07-14T09:00` lasts exactly one hour.
//! Ranges of months and weeks may go backward in time.

use crate::dates::DateRange;
use crate::errors::{Error, Result};
use crate::months::{looks_like_month, CalendarMonth};
use crate::ranges::Range;
use crate::weeks::{looks_like_week, IsoWeek};
use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use kalends_intervals::{Interval, Period, Timestamp};
use regex::{Captures, Regex};
use std::sync::OnceLock;

pub use crate::weeks::parse_week_date;

/// The text of a named group, or an empty string when the group did not
/// participate in the match.
pub(crate) fn capture<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// A year with at least four digits, and a sign for years before 1 BCE
pub(crate) fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?\d{4,6}-\d{2}-\d{2}$").expect("date regex is valid")
    })
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<date>[+-]?\d{4,6}-\d{2}-\d{2})[T ](?P<time>\d{2}:\d{2}(:\d{2}(\.\d{1,9})?)?)$",
        )
        .expect("timestamp regex is valid")
    })
}

pub fn parse_month(s: &str) -> Result<CalendarMonth> {
    s.parse()
}

pub fn parse_week(s: &str) -> Result<IsoWeek> {
    s.parse()
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if !date_regex().is_match(s) {
        return Err(Error::InvalidDateFormat(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDateFormat(s.to_string()))
}

/// Parse `YYYY-MM-DDTHH:MM[:SS[.fff]]`.  A space is also accepted instead of
/// the `T` separator.
pub fn parse_timestamp(s: &str) -> Result<Timestamp> {
    let s = s.trim();
    let format_error = || Error::InvalidTimestampFormat(s.to_string());
    let caps = timestamp_regex().captures(s).ok_or_else(format_error)?;
    let date = NaiveDate::parse_from_str(capture(&caps, "date"), "%Y-%m-%d")
        .map_err(|_| format_error())?;
    let time = capture(&caps, "time");
    let time = chrono::NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
        .or_else(|_| chrono::NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| format_error())?;
    Ok(NaiveDateTime::new(date, time))
}

/// The granularity of one side of a literal, guessed from its shape only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Granularity {
    Day,
    Week,
    Month,
    Timestamp,
}

impl Granularity {
    fn guess(s: &str) -> Option<Self> {
        if date_regex().is_match(s) {
            Some(Granularity::Day)
        } else if timestamp_regex().is_match(s) {
            Some(Granularity::Timestamp)
        } else if let Some(is_day) = looks_like_week(s) {
            Some(if is_day {
                Granularity::Day
            } else {
                Granularity::Week
            })
        } else if looks_like_month(s) {
            Some(Granularity::Month)
        } else {
            None
        }
    }
}

/// A day given either as `YYYY-MM-DD` or as `YYYY-Www-D`
fn parse_day(s: &str) -> Result<NaiveDate> {
    match looks_like_week(s) {
        Some(true) => parse_week_date(s),
        Some(false) | None => parse_date(s),
    }
}

/// Any period that can be written as a literal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodLiteral {
    Date(NaiveDate),
    Week(IsoWeek),
    Month(CalendarMonth),
    Days(DateRange),
    Weeks(Range<IsoWeek>),
    Months(Range<CalendarMonth>),
    Interval(Interval),
}

/// Parse `<left>/<right>`, where both sides have the same granularity.
pub fn parse_range(s: &str) -> Result<PeriodLiteral> {
    let s = s.trim();
    let (left, right) = s
        .split('/')
        .map(str::trim)
        .collect_tuple()
        .ok_or_else(|| Error::InvalidRangeFormat(s.to_string()))?;
    let kinds = (Granularity::guess(left), Granularity::guess(right));
    log::debug!("range literal {s:?}: {kinds:?}");
    match kinds {
        (Some(Granularity::Day), Some(Granularity::Day)) => Ok(PeriodLiteral::Days(
            DateRange::new(parse_day(left)?, parse_day(right)?),
        )),
        (Some(Granularity::Week), Some(Granularity::Week)) => Ok(
            PeriodLiteral::Weeks(Range::new(parse_week(left)?, parse_week(right)?)),
        ),
        (Some(Granularity::Month), Some(Granularity::Month)) => {
            Ok(PeriodLiteral::Months(Range::new(
                parse_month(left)?,
                parse_month(right)?,
            )))
        }
        (Some(Granularity::Timestamp), Some(Granularity::Timestamp)) => {
            Ok(PeriodLiteral::Interval(Interval::new_closed_open(
                parse_timestamp(left)?,
                parse_timestamp(right)?,
            )?))
        }
        (Some(_), Some(_)) => Err(Error::MismatchedRangeBounds {
            left: left.to_string(),
            right: right.to_string(),
        }),
        (None, _) | (_, None) => Err(Error::InvalidRangeFormat(s.to_string())),
    }
}

/// Parse any period literal: a single month, week or day, or a range.
pub fn parse_period(s: &str) -> Result<PeriodLiteral> {
    let s = s.trim();
    if s.contains('/') {
        return parse_range(s);
    }
    match Granularity::guess(s) {
        Some(Granularity::Day) => Ok(PeriodLiteral::Date(parse_day(s)?)),
        Some(Granularity::Week) => Ok(PeriodLiteral::Week(parse_week(s)?)),
        Some(Granularity::Month) => Ok(PeriodLiteral::Month(parse_month(s)?)),
        Some(Granularity::Timestamp) | None => {
            Err(Error::InvalidPeriodFormat(s.to_string()))
        }
    }
}

impl std::str::FromStr for PeriodLiteral {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_period(s)
    }
}

impl Period for PeriodLiteral {
    fn to_interval(&self) -> kalends_intervals::Result<Interval> {
        match self {
            PeriodLiteral::Date(d) => d.to_interval(),
            PeriodLiteral::Week(w) => w.to_interval(),
            PeriodLiteral::Month(m) => m.to_interval(),
            PeriodLiteral::Days(r) => r.to_interval(),
            PeriodLiteral::Weeks(r) => r.to_interval(),
            PeriodLiteral::Months(r) => r.to_interval(),
            PeriodLiteral::Interval(i) => i.to_interval(),
        }
    }
}

fn format_timestamp(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

impl std::fmt::Display for PeriodLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodLiteral::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            PeriodLiteral::Week(w) => write!(f, "{w}"),
            PeriodLiteral::Month(m) => write!(f, "{m}"),
            PeriodLiteral::Days(r) => write!(f, "{r}"),
            PeriodLiteral::Weeks(r) => write!(f, "{r}"),
            PeriodLiteral::Months(r) => write!(f, "{r}"),
            PeriodLiteral::Interval(i) => {
                let c = i.canonical();
                write!(
                    f,
                    "{}/{}",
                    format_timestamp(&c.from()),
                    format_timestamp(&c.until())
                )
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single() {
        assert_eq!(parse_month("2019-07"), CalendarMonth::new(2019, 7));
        assert_eq!(parse_week("2019-W01"), IsoWeek::new(2019, 1));
        assert_eq!(parse_date("2024-02-29"), Ok(date(2024, 2, 29)));
        assert_eq!(
            parse_date("2023-02-29"),
            Err(Error::InvalidDateFormat("2023-02-29".into()))
        );
        assert_eq!(
            parse_date("2023-2-1"),
            Err(Error::InvalidDateFormat("2023-2-1".into()))
        );
        assert_eq!(parse_week_date("2024-W01-1"), Ok(date(2024, 1, 1)));
    }

    #[test]
    fn test_timestamp() {
        let expected = date(2024, 7, 14).and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-07-14T08:30:00"), Ok(expected));
        assert_eq!(parse_timestamp("2024-07-14 08:30:00"), Ok(expected));
        assert_eq!(parse_timestamp("2024-07-14T08:30"), Ok(expected));
        assert_eq!(
            parse_timestamp("2024-07-14T08:30:00.250"),
            Ok(date(2024, 7, 14).and_hms_milli_opt(8, 30, 0, 250).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-07-14T25:00:00"),
            Err(Error::InvalidTimestampFormat("2024-07-14T25:00:00".into()))
        );
        assert_eq!(
            parse_timestamp("2024-07-14"),
            Err(Error::InvalidTimestampFormat("2024-07-14".into()))
        );
    }

    #[test]
    fn test_period() {
        assert_eq!(
            parse_period("2019-07"),
            Ok(PeriodLiteral::Month(CalendarMonth::new(2019, 7).unwrap()))
        );
        assert_eq!(
            parse_period("2019-W01"),
            Ok(PeriodLiteral::Week(IsoWeek::new(2019, 1).unwrap()))
        );
        assert_eq!(
            parse_period("2019-W01-7"),
            Ok(PeriodLiteral::Date(date(2019, 1, 6)))
        );
        assert_eq!(
            parse_period("2019-07-14T10:00:00"),
            Err(Error::InvalidPeriodFormat("2019-07-14T10:00:00".into()))
        );
        assert_eq!(
            parse_period("yesterday"),
            Err(Error::InvalidPeriodFormat("yesterday".into()))
        );
        assert_eq!(
            parse_period("2019-13"),
            Err(Error::InvalidMonthIndex {
                year: 2019,
                month: 13
            })
        );
    }

    #[test]
    fn test_range() {
        let months = parse_range("2024-01/2024-12").unwrap();
        assert_eq!(
            months.to_interval().unwrap().duration(),
            Duration::days(366)
        );
        let PeriodLiteral::Months(r) = months else {
            panic!("expected months, got {months:?}");
        };
        assert_eq!(r.len(), 12);

        let backward = parse_range("2024-12/2024-01").unwrap();
        assert_eq!(backward.to_string(), "2024-12/2024-01");
        assert_eq!(backward.to_interval(), months.to_interval());

        let weeks = parse_range("2020-W52/2021-W01").unwrap();
        assert_eq!(
            weeks.to_interval().unwrap().duration(),
            Duration::weeks(3)
        );

        let days = parse_range("2024-03-01/2024-W09-7").unwrap();
        assert_eq!(
            days,
            PeriodLiteral::Days(DateRange::new(date(2024, 3, 1), date(2024, 3, 3)))
        );

        let hour = parse_range("2024-07-14T08:00/2024-07-14T09:00").unwrap();
        assert_eq!(hour.to_interval().unwrap().duration(), Duration::hours(1));
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(
            parse_range("2024-01/2024-W05"),
            Err(Error::MismatchedRangeBounds {
                left: "2024-01".into(),
                right: "2024-W05".into()
            })
        );
        assert_eq!(
            parse_range("2024-01"),
            Err(Error::InvalidRangeFormat("2024-01".into()))
        );
        assert_eq!(
            parse_range("2024-01/2024-02/2024-03"),
            Err(Error::InvalidRangeFormat("2024-01/2024-02/2024-03".into()))
        );
        assert_eq!(
            parse_range("2024-01/soon"),
            Err(Error::InvalidRangeFormat("2024-01/soon".into()))
        );
        assert!(matches!(
            parse_range("2024-07-14T09:00/2024-07-14T08:00"),
            Err(Error::Interval(kalends_intervals::Error::InvalidBounds { .. }))
        ));
        assert_eq!(
            parse_range("2024-01-10/2024-01-01").unwrap().to_interval(),
            Err(kalends_intervals::Error::EmptyRange)
        );
    }

    #[test]
    fn test_display_round_trip() {
        for s in [
            "2019-07",
            "2019-W01",
            "2019-07-14",
            "2019-07-01/2019-07-14",
            "2019-W01/2019-W10",
            "2019-10/2019-07",
            "2019-07-14T08:00:00/2019-07-14T09:30:00.500",
        ] {
            let literal: PeriodLiteral = s.parse().unwrap();
            assert_eq!(literal.to_string(), s);
        }
    }
}
