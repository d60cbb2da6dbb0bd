//! Calendar periods (months, ISO weeks, days and ranges of those), their
//! textual literals and conversion to timezones.  All of them implement
//! [`kalends_intervals::Period`], so they can be combined with the algebra
//! and overlay from that crate.

pub mod dates;
pub mod derive;
pub mod errors;
pub mod literals;
pub mod months;
pub mod ranges;
pub mod times;
pub mod weeks;

pub use crate::errors::{Error, Result};
pub use kalends_intervals as intervals;
