use crate::errors::{Error, Result};
use chrono::{Days, NaiveDate};
use kalends_intervals::{midnight, Interval, Period};
use serde::{Deserialize, Serialize};

/// A sequence of days from `first` to `last`, both included, every `step`
/// days.
///
/// Only ranges with a step of 1 cover a contiguous span of time, so only
/// those convert to an [`Interval`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    first: NaiveDate,
    last: NaiveDate,
    step: i64,
}

impl DateRange {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            first,
            last,
            step: 1,
        }
    }

    /// The step must be strictly positive
    pub fn with_step(first: NaiveDate, last: NaiveDate, step: i64) -> Result<Self> {
        if step < 1 {
            return Err(Error::Interval(
                kalends_intervals::Error::UnsupportedStepSize { step },
            ));
        }
        Ok(Self { first, last, step })
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// Number of days in the sequence
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            let span = (self.last - self.first).num_days();
            (span / self.step) as usize + 1
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let step = Days::new(self.step.unsigned_abs());
        let last = self.last;
        std::iter::successors(Some(self.first), move |d| d.checked_add_days(step))
            .take_while(move |d| *d <= last)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.first <= *date
            && *date <= self.last
            && (*date - self.first).num_days() % self.step == 0
    }
}

#[derive(Deserialize)]
struct RawDateRange {
    first: NaiveDate,
    last: NaiveDate,
    #[serde(default = "default_step")]
    step: i64,
}

fn default_step() -> i64 {
    1
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::with_step(raw.first, raw.last, raw.step)
    }
}

impl Period for DateRange {
    fn to_interval(&self) -> kalends_intervals::Result<Interval> {
        if self.step != 1 {
            return Err(kalends_intervals::Error::UnsupportedStepSize {
                step: self.step,
            });
        }
        if self.is_empty() {
            return Err(kalends_intervals::Error::EmptyRange);
        }
        Interval::new_closed_open(midnight(self.first), self.last.to_interval()?.until())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.first, self.last)?;
        if self.step != 1 {
            write!(f, " every {} days", self.step)?;
        }
        Ok(())
    }
}
