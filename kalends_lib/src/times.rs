use crate::errors::{out_of_range, Error, Result};
use chrono::{DateTime, Days, LocalResult, Months, TimeZone};
use chrono_tz::Tz;
use kalends_intervals::{Interval, Period, Timestamp};

/// Specifies an instant in time, that is relative to some "now".
/// Such a specification can be stored in configuration files, for instance
/// as "one year ago".  That way, when we launch the application at some point
/// in the future, this is still "one year ago".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instant {
    Now,
    DaysAgo(u64),
    MonthsAgo(u32),
    YearsAgo(u32),
}

impl Instant {
    /// Convert self to an actual timestamp.
    pub fn to_timestamp(&self, now: Timestamp) -> Result<Timestamp> {
        let ts = match self {
            Instant::Now => Some(now),
            Instant::DaysAgo(count) => now.checked_sub_days(Days::new(*count)),
            Instant::MonthsAgo(count) => now.checked_sub_months(Months::new(*count)),
            Instant::YearsAgo(count) => count
                .checked_mul(12)
                .and_then(|m| now.checked_sub_months(Months::new(m))),
        };
        ts.ok_or_else(|| out_of_range(format!("{self:?} from {now}")))
    }
}

/// A duration looking back from some "now", like "the last three months".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookback {
    Days(u64),
    Months(u32),
    Years(u32),
}

impl Lookback {
    /// The period `[now - self, now)`.  The output only depends on `now`, so
    /// the lookback itself can be reused.
    pub fn anchored(&self, now: Timestamp) -> Result<RelativePeriod> {
        let start = match self {
            Lookback::Days(count) => Instant::DaysAgo(*count),
            Lookback::Months(count) => Instant::MonthsAgo(*count),
            Lookback::Years(count) => Instant::YearsAgo(*count),
        };
        Ok(RelativePeriod {
            interval: Interval::new_closed_open(
                start.to_timestamp(now)?,
                Instant::Now.to_timestamp(now)?,
            )?,
        })
    }
}

impl std::str::FromStr for Lookback {
    type Err = Error;

    /// Parse `<count><unit>` where unit is one of `d`, `m` or `y`, like `3m`.
    fn from_str(s: &str) -> Result<Self> {
        let format_error = || Error::InvalidPeriodFormat(s.to_string());
        let s = s.trim();
        let unit_pos = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(format_error)?;
        let (count, unit) = s.split_at(unit_pos);
        match unit {
            "d" => Ok(Lookback::Days(count.parse().map_err(|_| format_error())?)),
            "m" => Ok(Lookback::Months(count.parse().map_err(|_| format_error())?)),
            "y" => Ok(Lookback::Years(count.parse().map_err(|_| format_error())?)),
            _ => Err(format_error()),
        }
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookback::Days(count) => write!(f, "{count}d"),
            Lookback::Months(count) => write!(f, "{count}m"),
            Lookback::Years(count) => write!(f, "{count}y"),
        }
    }
}

/// A lookback resolved against a specific "now"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelativePeriod {
    interval: Interval,
}

impl Period for RelativePeriod {
    fn to_interval(&self) -> kalends_intervals::Result<Interval> {
        Ok(self.interval)
    }
}

/// How to convert a wall-clock time that is ambiguous in a timezone (when
/// clocks are moved backward, the same time happens twice).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disambiguation {
    /// Ambiguous times are an error
    #[default]
    Strict,

    /// The first occurrence
    Earliest,

    /// The second occurrence
    Latest,
}

impl std::fmt::Display for Disambiguation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disambiguation::Strict => write!(f, "strict"),
            Disambiguation::Earliest => write!(f, "earliest"),
            Disambiguation::Latest => write!(f, "latest"),
        }
    }
}

impl std::str::FromStr for Disambiguation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Disambiguation::Strict),
            "earliest" => Ok(Disambiguation::Earliest),
            "latest" => Ok(Disambiguation::Latest),
            _ => Err(format!(
                "invalid disambiguation {s:?}, expected strict, earliest or latest"
            )),
        }
    }
}

/// Find a timezone from its IANA name, like "Europe/Paris"
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::UnknownTimezone(name.to_string()))
}

/// Interpret a wall-clock time in the given timezone.
/// A time that is skipped when clocks move forward never resolves.
pub fn localize(ts: Timestamp, tz: Tz, mode: Disambiguation) -> Result<DateTime<Tz>> {
    let failure = |reason| Error::TimezoneResolution {
        zone: tz.name().to_string(),
        timestamp: ts,
        mode,
        reason,
    };
    match tz.from_local_datetime(&ts) {
        LocalResult::Single(d) => Ok(d),
        LocalResult::Ambiguous(earliest, latest) => match mode {
            Disambiguation::Earliest => Ok(earliest),
            Disambiguation::Latest => Ok(latest),
            Disambiguation::Strict => Err(failure("ambiguous local time")),
        },
        LocalResult::None => Err(failure("local time does not exist")),
    }
}

/// The wall-clock time of an instant, as seen in the timezone
pub fn to_wall_clock<Z: TimeZone>(instant: &DateTime<Z>, tz: Tz) -> Timestamp {
    instant.with_timezone(&tz).naive_local()
}

/// An interval whose bounds are actual instants in a timezone.  Its
/// duration is the elapsed time, which differs from the wall-clock duration
/// when the interval crosses a daylight saving change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZonedInterval {
    from: DateTime<Tz>,
    until: DateTime<Tz>,
}

impl ZonedInterval {
    pub fn from(&self) -> &DateTime<Tz> {
        &self.from
    }

    pub fn until(&self) -> &DateTime<Tz> {
        &self.until
    }

    pub fn duration(&self) -> chrono::Duration {
        self.until.clone() - self.from.clone()
    }
}

impl std::fmt::Display for ZonedInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.from.to_rfc3339(), self.until.to_rfc3339())
    }
}

/// Interpret the canonical interval of a period as wall-clock times in
/// the timezone.
pub fn localize_interval<P: Period + ?Sized>(
    period: &P,
    tz: Tz,
    mode: Disambiguation,
) -> Result<ZonedInterval> {
    let intv = period.to_interval()?;
    Ok(ZonedInterval {
        from: localize(intv.from(), tz, mode)?,
        until: localize(intv.until(), tz, mode)?,
    })
}
