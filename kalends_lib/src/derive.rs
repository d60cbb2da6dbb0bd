use crate::errors::{Error, Result};
use crate::literals::{parse_date, parse_period, parse_timestamp};
use kalends_intervals::{midnight, Interval, Period, Timestamp};
use serde::Serialize;
use serde_json::Value;

/// Which side of an interval a field provides
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

/// Find a field, possibly nested (`stay.checkin`).  A null value is the same
/// as a missing field, so that `Option` fields can be used.
fn lookup<'a>(root: &'a Value, field: &str) -> Result<&'a Value> {
    field
        .split('.')
        .try_fold(root, |v, key| v.get(key))
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::MissingField {
            field: field.to_string(),
        })
}

/// Convert a field to a timestamp.  A date as the end of an interval means
/// the whole day is included.
fn bound(value: &Value, field: &str, side: Side) -> Result<Timestamp> {
    let invalid = || Error::InvalidFieldValue {
        field: field.to_string(),
        value: value.to_string(),
    };
    let text = value.as_str().ok_or_else(invalid)?;
    if let Ok(date) = parse_date(text) {
        return match side {
            Side::Start => Ok(midnight(date)),
            Side::End => Ok(date.to_interval()?.until()),
        };
    }
    parse_timestamp(text).map_err(|_| invalid())
}

/// Build an interval from two fields of any serializable value.  Each field
/// holds a date or a timestamp.
///
/// ```
///    use chrono::NaiveDate;
///    use kalends_lib::derive::derive_interval_from;
///
///    #[derive(serde::Serialize)]
///    struct Stay {
///        checkin: NaiveDate,
///        checkout: NaiveDate,
///    }
///
///    let stay = Stay {
///        checkin: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///        checkout: NaiveDate::from_ymd_opt(2024, 7, 7).unwrap(),
///    };
///    let intv = derive_interval_from(&stay, "checkin", "checkout").unwrap();
///    assert_eq!(intv.duration(), chrono::Duration::days(7));
/// ```
pub fn derive_interval_from<S: Serialize + ?Sized>(
    value: &S,
    start_field: &str,
    end_field: &str,
) -> Result<Interval> {
    let json = serde_json::to_value(value)?;
    let from = bound(lookup(&json, start_field)?, start_field, Side::Start)?;
    let until = bound(lookup(&json, end_field)?, end_field, Side::End)?;
    log::trace!("derived [{from}, {until}) from {start_field:?} and {end_field:?}");
    Ok(Interval::new_closed_open(from, until)?)
}

/// Build an interval from a single field, which is either a period literal
/// (see [`crate::literals`]) or an object with `from` and `until` fields.
pub fn derive_interval_from_field<S: Serialize + ?Sized>(
    value: &S,
    field: &str,
) -> Result<Interval> {
    let json = serde_json::to_value(value)?;
    let found = lookup(&json, field)?;
    match found {
        Value::String(s) => Ok(parse_period(s)?.to_interval()?),
        Value::Object(_) => {
            let from_field = format!("{field}.from");
            let until_field = format!("{field}.until");
            let from = bound(lookup(&json, &from_field)?, &from_field, Side::Start)?;
            let until = bound(lookup(&json, &until_field)?, &until_field, Side::End)?;
            Ok(Interval::new_closed_open(from, until)?)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => {
            Err(Error::InvalidFieldValue {
                field: field.to_string(),
                value: found.to_string(),
            })
        }
    }
}

/// Any serializable value, seen as the period described by some of its
/// fields.  The fields are read once, when the period is created.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedPeriod<S> {
    value: S,
    interval: Interval,
}

impl<S: Serialize> DerivedPeriod<S> {
    pub fn new(value: S, start_field: &str, end_field: &str) -> Result<Self> {
        let interval = derive_interval_from(&value, start_field, end_field)?;
        Ok(Self { value, interval })
    }

    pub fn from_field(value: S, field: &str) -> Result<Self> {
        let interval = derive_interval_from_field(&value, field)?;
        Ok(Self { value, interval })
    }

    pub fn value(&self) -> &S {
        &self.value
    }

    pub fn into_inner(self) -> S {
        self.value
    }
}

impl<S> Period for DerivedPeriod<S> {
    fn to_interval(&self) -> kalends_intervals::Result<Interval> {
        Ok(self.interval)
    }
}
