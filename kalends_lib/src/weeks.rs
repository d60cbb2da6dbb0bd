use crate::errors::{out_of_range, Error, Result};
use crate::literals::{capture, format_year};
use crate::ranges::CalendarUnit;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use kalends_intervals::{midnight, Interval, Period};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A week as numbered by ISO-8601: weeks start on Monday, and week 1 is the
/// week that contains the first Thursday of the year.  So the first days
/// of January might belong to the last week of the previous year.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct IsoWeek {
    monday: NaiveDate,
    next_monday: NaiveDate,
}

impl IsoWeek {
    /// Week is in 1..=52, or 1..=53 for years that have 53 weeks
    pub fn new(year: i32, week: u32) -> Result<Self> {
        let max = Self::weeks_in_year(year);
        if week < 1 || week > max {
            return Err(Error::InvalidWeekIndex { year, week, max });
        }
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .ok_or_else(|| out_of_range(format!("week {year}-W{week:02}")))?;
        Self::from_monday(monday)
    }

    fn from_monday(monday: NaiveDate) -> Result<Self> {
        let next_monday = monday
            .checked_add_days(Days::new(7))
            .ok_or_else(|| out_of_range(format!("week after {monday}")))?;
        Ok(Self {
            monday,
            next_monday,
        })
    }

    /// The week that contains the date
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        let days_since_monday = date.weekday().num_days_from_monday();
        let monday = date
            .checked_sub_days(Days::new(u64::from(days_since_monday)))
            .ok_or_else(|| out_of_range(format!("week of {date}")))?;
        Self::from_monday(monday)
    }

    /// Number of ISO weeks in the year (52 or 53).  December 28th is always
    /// in the last week of its year.
    pub fn weeks_in_year(year: i32) -> u32 {
        NaiveDate::from_ymd_opt(year, 12, 28).map_or(52, |d| d.iso_week().week())
    }

    /// The ISO year, which is not always the year of every day in the week
    pub fn year(&self) -> i32 {
        self.monday.iso_week().year()
    }

    pub fn week(&self) -> u32 {
        self.monday.iso_week().week()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.monday
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next_monday - Days::new(1)
    }

    /// The given day of the week
    pub fn date(&self, weekday: Weekday) -> NaiveDate {
        self.monday + Days::new(u64::from(weekday.num_days_from_monday()))
    }

    /// The day of the week, from 1 (Monday) to 7 (Sunday)
    pub fn date_from_index(&self, weekday: u32) -> Result<NaiveDate> {
        if !(1..=7).contains(&weekday) {
            return Err(Error::InvalidWeekday(weekday));
        }
        Ok(self.monday + Days::new(u64::from(weekday - 1)))
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.monday <= *date && *date < self.next_monday
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let next = self.next_monday;
        self.monday.iter_days().take_while(move |d| *d < next)
    }

    pub fn next(&self) -> Result<Self> {
        self.shift(1)
    }

    pub fn previous(&self) -> Result<Self> {
        self.shift(-1)
    }
}

/// Weeks are numbered from the Monday 0001-01-01
impl CalendarUnit for IsoWeek {
    fn ordinal(&self) -> i64 {
        (i64::from(self.monday.num_days_from_ce()) - 1).div_euclid(7)
    }

    fn from_ordinal(ordinal: i64) -> Result<Self> {
        let monday = ordinal
            .checked_mul(7)
            .and_then(|days| days.checked_add(1))
            .and_then(|days| i32::try_from(days).ok())
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| out_of_range(format!("week number {ordinal}")))?;
        Self::from_monday(monday)
    }
}

impl Period for IsoWeek {
    fn to_interval(&self) -> kalends_intervals::Result<Interval> {
        Interval::new_closed_open(midnight(self.monday), midnight(self.next_monday))
    }
}

impl std::fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", format_year(self.year()), self.week())
    }
}

fn week_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<year>[+-]?\d{4,6})-W(?P<week>\d{2})(-(?P<weekday>\d))?$",
        )
        .expect("week regex is valid")
    })
}

/// Whether the string looks like a week (`YYYY-Www`) or a day in a week
/// (`YYYY-Www-D`).  The second element is true for a day.
pub(crate) fn looks_like_week(s: &str) -> Option<bool> {
    week_regex()
        .captures(s)
        .map(|caps| caps.name("weekday").is_some())
}

/// Parse either `YYYY-Www` or `YYYY-Www-D`
fn parse_week_parts(s: &str) -> Result<(IsoWeek, Option<u32>)> {
    let format_error = || Error::InvalidWeekFormat(s.to_string());
    let caps = week_regex().captures(s.trim()).ok_or_else(format_error)?;
    let year: i32 = capture(&caps, "year").parse().map_err(|_| format_error())?;
    let week: u32 = capture(&caps, "week").parse().map_err(|_| format_error())?;
    let weekday = match caps.name("weekday") {
        None => None,
        Some(d) => Some(d.as_str().parse::<u32>().map_err(|_| format_error())?),
    };
    Ok((IsoWeek::new(year, week)?, weekday))
}

/// Parse `YYYY-Www-D` into the corresponding date, where D is 1 (Monday)
/// to 7 (Sunday).
pub fn parse_week_date(s: &str) -> Result<NaiveDate> {
    match parse_week_parts(s)? {
        (week, Some(weekday)) => week.date_from_index(weekday),
        (_, None) => Err(Error::InvalidWeekFormat(s.to_string())),
    }
}

impl std::str::FromStr for IsoWeek {
    type Err = Error;

    /// Parse `YYYY-Www`.
    fn from_str(s: &str) -> Result<Self> {
        match parse_week_parts(s)? {
            (week, None) => Ok(week),
            (_, Some(_)) => Err(Error::InvalidWeekFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for IsoWeek {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<IsoWeek> for String {
    fn from(value: IsoWeek) -> Self {
        value.to_string()
    }
}
