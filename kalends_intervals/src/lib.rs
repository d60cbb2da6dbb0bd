//! This crate provides the period algebra used by calendar types.
//!
//! Every period (a calendar month, an ISO week, a single date, a date range,
//! an explicit pair of timestamps,...) can be converted to a canonical
//! [`Interval`], which is left-closed and right-open:
//!
//!  |Interval|Constructor                      |Description
//!  |--------|---------------------------------|--------------
//!  | `[A,B)`|[`Interval::new_closed_open`]    |left-closed, right-open (canonical)
//!  | `[A,B]`|[`Interval::new_closed_closed`]  |left-closed, right-closed
//!  | `[A,A)`|[`Interval::empty_at`]           |empty
//!
//! The conversion is the [`Period`] trait.  The algebra in [`algebra`] and
//! the [`overlay()`] decomposition only ever work on the canonical form, so
//! any type implementing [`Period`] (including your own) can be mixed with
//! the others.
//!
//! Given two periods, we can compute the following:
//!
//! ```text
//!        [------ A ------)
//!               [----- B -------)
//!
//!        [------)                     Difference (A - B)
//!                        [------)     Difference (B - A)
//!               [--------)            Intersection (A & B)
//!        [----------------------)     Union (A | B)
//! ```
//!
//! When the two periods do not overlap:
//! ```text
//!      [---A---)   [----B----)
//!
//!      [-------)                  Difference (A - B)
//!                  [---------)    Difference (B - A)
//!                                 Intersection (A & B) is None
//!      [-------)   [---------)    Union (A | B) is both intervals
//! ```
//!
//! Finally, an overlay splits a set of possibly overlapping periods into
//! consecutive segments, each tagged with the periods active during it:
//! ```text
//!      [---A---)
//!          [---B---)
//!              [---C---)
//!
//!      [-A-)                      {A}
//!          [A,B)                  {A, B}
//!              [B,C)              {B, C}
//!                  [-C-)          {C}
//! ```

pub mod algebra;
mod errors;
mod intervals;
mod multi_intervals;
mod overlay;
mod periods;

pub use crate::errors::{Error, Result};
pub use crate::intervals::{BoundsKind, Interval, Timestamp};
pub use crate::multi_intervals::MultiInterval;
pub use crate::overlay::{overlay, Overlay};
pub use crate::periods::{midnight, Period};
