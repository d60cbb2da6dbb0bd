use crate::times::Disambiguation;
use kalends_intervals::Timestamp;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Interval(#[from] kalends_intervals::Error),

    #[error("invalid month index {month} in {year}, expected 1..=12")]
    InvalidMonthIndex { year: i32, month: u32 },

    #[error("invalid week index {week} in {year}, expected 1..={max}")]
    InvalidWeekIndex { year: i32, week: u32, max: u32 },

    #[error("invalid weekday {0}, expected 1 (Monday) ..= 7 (Sunday)")]
    InvalidWeekday(u32),

    #[error("invalid month format {0:?}, expected YYYY-MM")]
    InvalidMonthFormat(String),

    #[error("invalid week format {0:?}, expected YYYY-Www or YYYY-Www-D")]
    InvalidWeekFormat(String),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("invalid timestamp {0:?}, expected YYYY-MM-DDTHH:MM:SS")]
    InvalidTimestampFormat(String),

    #[error("invalid range {0:?}, expected <left>/<right>")]
    InvalidRangeFormat(String),

    #[error("invalid period {0:?}, expected a date, week, month or range")]
    InvalidPeriodFormat(String),

    #[error(
        "both sides of a range must use the same granularity, \
         got {left:?} and {right:?}"
    )]
    MismatchedRangeBounds { left: String, right: String },

    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    #[error("cannot resolve {timestamp} in {zone} ({mode}): {reason}")]
    TimezoneResolution {
        zone: String,
        timestamp: Timestamp,
        mode: Disambiguation,
        reason: &'static str,
    },

    #[error("field {field:?} not found")]
    MissingField { field: String },

    #[error("field {field:?} is not a date or timestamp: {value}")]
    InvalidFieldValue { field: String, value: String },

    #[error("{0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shortcut for values outside of the dates chrono can represent
pub(crate) fn out_of_range(msg: String) -> Error {
    Error::Interval(kalends_intervals::Error::OutOfRange(msg))
}
