use crate::errors::{out_of_range, Error, Result};
use crate::literals::{capture, format_year};
use crate::ranges::CalendarUnit;
use chrono::{Datelike, Days, Months, NaiveDate};
use kalends_intervals::{midnight, Interval, Period};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A month of the gregorian calendar, like 2024-07.
/// Months are ordered chronologically.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarMonth {
    first: NaiveDate, //  always the first day of the month
    next: NaiveDate,  //  first day of the following month
}

impl CalendarMonth {
    /// Month is in 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonthIndex { year, month });
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| out_of_range(format!("month {year}-{month:02}")))?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| out_of_range(format!("month after {year}-{month:02}")))?;
        Ok(Self { first, next })
    }

    /// The month that contains the given date
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next - Days::new(1)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.first <= *date && *date < self.next
    }

    /// All days of the month, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let next = self.next;
        self.first.iter_days().take_while(move |d| *d < next)
    }

    pub fn next(&self) -> Result<Self> {
        self.shift(1)
    }

    pub fn previous(&self) -> Result<Self> {
        self.shift(-1)
    }
}

impl CalendarUnit for CalendarMonth {
    fn ordinal(&self) -> i64 {
        i64::from(self.year()) * 12 + i64::from(self.month()) - 1
    }

    fn from_ordinal(ordinal: i64) -> Result<Self> {
        let year = i32::try_from(ordinal.div_euclid(12))
            .map_err(|_| out_of_range(format!("month number {ordinal}")))?;
        // rem_euclid is in 0..12
        Self::new(year, ordinal.rem_euclid(12) as u32 + 1)
    }
}

impl Period for CalendarMonth {
    fn to_interval(&self) -> kalends_intervals::Result<Interval> {
        Interval::new_closed_open(midnight(self.first), midnight(self.next))
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", format_year(self.year()), self.month())
    }
}

fn month_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<year>[+-]?\d{4,6})-(?P<month>\d{2})$")
            .expect("month regex is valid")
    })
}

/// Whether the string looks like a month, whether or not the month index is
/// valid.
pub(crate) fn looks_like_month(s: &str) -> bool {
    month_regex().is_match(s)
}

impl std::str::FromStr for CalendarMonth {
    type Err = Error;

    /// Parse `YYYY-MM`.  A string in another format is reported as
    /// [`Error::InvalidMonthFormat`], a month outside of 1..=12 as
    /// [`Error::InvalidMonthIndex`].
    fn from_str(s: &str) -> Result<Self> {
        let caps = month_regex()
            .captures(s.trim())
            .ok_or_else(|| Error::InvalidMonthFormat(s.to_string()))?;
        let format_error = || Error::InvalidMonthFormat(s.to_string());
        let year: i32 = capture(&caps, "year")
            .parse()
            .map_err(|_| format_error())?;
        let month: u32 = capture(&caps, "month")
            .parse()
            .map_err(|_| format_error())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for CalendarMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CalendarMonth> for String {
    fn from(value: CalendarMonth) -> Self {
        value.to_string()
    }
}
