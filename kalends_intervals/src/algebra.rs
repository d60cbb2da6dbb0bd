//! Set-like operations on periods.
//!
//! All functions accept anything implementing [`Period`], and first convert
//! their arguments to canonical intervals.  Conversion errors are returned
//! unchanged to the caller; there is never a partial result.

use crate::errors::Result;
use crate::intervals::Interval;
use crate::multi_intervals::MultiInterval;
use crate::periods::Period;
use std::cmp::Ordering;

fn to_intervals<P: Period>(periods: &[P]) -> Result<Vec<Interval>> {
    periods.iter().map(Period::to_interval).collect()
}

/// Whether the two periods have at least one timestamp in common.
pub fn overlaps<A: Period, B: Period>(left: &A, right: &B) -> Result<bool> {
    Ok(left.to_interval()?.intersects(&right.to_interval()?))
}

/// Whether all timestamps of inner are also in outer.
pub fn contains<A: Period, B: Period>(outer: &A, inner: &B) -> Result<bool> {
    Ok(outer.to_interval()?.contains_interval(&inner.to_interval()?))
}

/// The parts of left that are not covered by right: zero, one or two
/// intervals, none of them empty.
pub fn difference<A: Period, B: Period>(
    left: &A,
    right: &B,
) -> Result<MultiInterval> {
    Ok(left.to_interval()?.difference(&right.to_interval()?))
}

/// Remove all of `minus` from each of `bases`.
/// Each base is narrowed or split by every element of `minus` in turn, and
/// the remaining pieces are returned in the order of `bases`.
pub fn difference_all<A: Period, B: Period>(
    bases: &[A],
    minus: &[B],
) -> Result<Vec<Interval>> {
    let minus = to_intervals(minus)?;
    let mut result = Vec::new();
    for base in bases {
        result.extend(subtract_all(base.to_interval()?, &minus));
    }
    Ok(result)
}

fn subtract_all(base: Interval, minus: &[Interval]) -> Vec<Interval> {
    let mut pieces = vec![base];
    for m in minus {
        if pieces.is_empty() {
            break;
        }
        pieces = pieces.iter().flat_map(|p| p.difference(m)).collect();
    }
    pieces
}

/// `left - (left - right)`, on canonical intervals
pub(crate) fn intersect_canonical(
    left: &Interval,
    right: &Interval,
) -> Option<Interval> {
    let outside: Vec<Interval> = left.difference(right).into_vec();
    match subtract_all(*left, &outside).as_slice() {
        [inside] if !inside.is_empty() => Some(*inside),
        _ => None,
    }
}

/// The span common to both periods, or None if they do not overlap.
/// This is derived from [`difference`], so that the two operations always
/// agree.
pub fn intersection<A: Period, B: Period>(
    left: &A,
    right: &B,
) -> Result<Option<Interval>> {
    Ok(intersect_canonical(&left.to_interval()?, &right.to_interval()?))
}

/// The span common to all periods.
/// Returns None as soon as two of them do not overlap, or when the list is
/// empty.  A single period returns its own interval.
pub fn intersection_all<P: Period>(periods: &[P]) -> Result<Option<Interval>> {
    let mut iter = periods.iter();
    let Some(first) = iter.next() else {
        return Ok(None);
    };
    let mut common = first.to_interval()?;
    for p in iter {
        match intersect_canonical(&common, &p.to_interval()?) {
            None => return Ok(None),
            Some(c) => common = c,
        }
    }
    Ok(Some(common))
}

/// A single interval if the two periods overlap or touch, or both
/// intervals otherwise.
pub fn union<A: Period, B: Period>(
    left: &A,
    right: &B,
) -> Result<MultiInterval> {
    Ok(left.to_interval()?.union(&right.to_interval()?))
}

/// Merge all periods into a sorted list of disjoint intervals.  Two
/// consecutive intervals in the result never touch.  Empty periods contain
/// no timestamp and are ignored.
pub fn union_all<P: Period>(periods: &[P]) -> Result<Vec<Interval>> {
    let mut intervals = to_intervals(periods)?;
    intervals.retain(|i| !i.is_empty());

    // All intervals are canonical, so this is the same order as
    // Interval::compare()
    intervals.sort_by_key(|i| (i.from(), i.until()));

    let mut result: Vec<Interval> = Vec::with_capacity(intervals.len());
    for intv in intervals {
        match result.last_mut() {
            Some(last) if intv.from() <= last.until() => {
                *last = last.convex_hull(&intv);
            }
            Some(_) | None => result.push(intv),
        }
    }
    log::trace!(
        "union of {} periods gave {} intervals",
        periods.len(),
        result.len()
    );
    Ok(result)
}

/// Compare the canonical intervals of two periods, by lower bound first
/// and upper bound second.
pub fn compare<A: Period, B: Period>(left: &A, right: &B) -> Result<Ordering> {
    left.to_interval()?.compare(&right.to_interval()?)
}

/// Whether left starts strictly before right
pub fn begins_before<A: Period, B: Period>(left: &A, right: &B) -> Result<bool> {
    left.to_interval()?.begins_before(&right.to_interval()?)
}

/// Whether left starts strictly after right
pub fn begins_after<A: Period, B: Period>(left: &A, right: &B) -> Result<bool> {
    left.to_interval()?.begins_after(&right.to_interval()?)
}

/// Whether left ends strictly before right
pub fn ends_before<A: Period, B: Period>(left: &A, right: &B) -> Result<bool> {
    left.to_interval()?.ends_before(&right.to_interval()?)
}

/// Whether left ends strictly after right
pub fn ends_after<A: Period, B: Period>(left: &A, right: &B) -> Result<bool> {
    left.to_interval()?.ends_after(&right.to_interval()?)
}
