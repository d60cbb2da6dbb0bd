use crate::errors::Result;
use crate::intervals::{Interval, Timestamp};
use crate::periods::Period;
use chrono::Duration;

/// A segment of an overlay: a span of time during which a fixed set of
/// the input periods is active.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay<P> {
    interval: Interval,
    elements: Vec<P>,
}

impl<P> Overlay<P> {
    pub fn new(interval: Interval, elements: Vec<P>) -> Self {
        Overlay { interval, elements }
    }

    /// The span covered by this segment (always canonical and non-empty
    /// when returned by [`overlay()`])
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// The input periods active during the whole segment, in the order
    /// they were discovered while sweeping.
    pub fn elements(&self) -> &[P] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<P> {
        self.elements
    }

    pub fn duration(&self) -> Duration {
        self.interval.duration()
    }
}

/// Segments can be used as periods themselves, for instance to compute
/// another overlay with them.
impl<P> Period for Overlay<P> {
    fn to_interval(&self) -> Result<Interval> {
        Ok(self.interval.canonical())
    }
}

/// At the same timestamp, periods that end are processed before periods
/// that start, so that two consecutive periods never overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    End,
    Start,
}

struct Event<'a, P> {
    at: Timestamp,
    kind: EventKind,
    index: usize,
    period: &'a P,
}

/// Split the periods into consecutive, non-overlapping segments.  Each
/// segment lists all the periods that cover it.
///
/// ```txt
///    [------ A ------)
///             [------ B ------)
///    [-- {A} -)
///             [{A,B})
///                    [- {B} --)
/// ```
///
/// Segments are returned in chronological order, and are never empty.
/// There is no segment for the times when no period is active.  Empty
/// periods contain no timestamp and therefore never appear in the output.
pub fn overlay<P: Period + Clone>(periods: &[P]) -> Result<Vec<Overlay<P>>> {
    let intervals = periods
        .iter()
        .map(Period::to_interval)
        .collect::<Result<Vec<_>>>()?;

    match (periods, intervals.as_slice()) {
        ([], _) => return Ok(Vec::new()),
        ([single], [intv]) => {
            return Ok(if intv.is_empty() {
                Vec::new()
            } else {
                vec![Overlay::new(*intv, vec![single.clone()])]
            });
        }
        _ => {}
    }

    let mut events = Vec::with_capacity(periods.len() * 2);
    for (index, (period, intv)) in periods.iter().zip(&intervals).enumerate() {
        if intv.is_empty() {
            continue;
        }
        events.push(Event {
            at: intv.from(),
            kind: EventKind::Start,
            index,
            period,
        });
        events.push(Event {
            at: intv.until(),
            kind: EventKind::End,
            index,
            period,
        });
    }

    // A stable sort, so that periods starting at the same time are
    // discovered in the order they were given.
    events.sort_by_key(|e| (e.at, e.kind));
    log::debug!(
        "overlay: {} periods, {} boundary events",
        periods.len(),
        events.len()
    );

    let mut result = Vec::new();
    let mut active: Vec<(usize, &P)> = Vec::new();
    let mut last_change: Option<Timestamp> = None;

    for event in &events {
        if let Some(since) = last_change {
            // Close the segment that just ended, unless nothing was active
            // or it would be empty (several events at the same time).
            if !active.is_empty() && since < event.at {
                log::trace!(
                    "overlay: segment [{}, {}) with {} elements",
                    since,
                    event.at,
                    active.len()
                );
                result.push(Overlay::new(
                    Interval::new_unchecked(since, event.at),
                    active.iter().map(|(_, p)| (*p).clone()).collect(),
                ));
            }
        }

        match event.kind {
            EventKind::Start => active.push((event.index, event.period)),
            EventKind::End => active.retain(|(idx, _)| *idx != event.index),
        }
        last_change = Some(event.at);
    }

    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::Error;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn days(from: u32, until: u32) -> Interval {
        Interval::new_closed_open(
            crate::midnight(date(from)),
            crate::midnight(date(until)),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(overlay::<Interval>(&[]).unwrap(), vec![]);
        assert_eq!(
            overlay(&[days(1, 4)]).unwrap(),
            vec![Overlay::new(days(1, 4), vec![days(1, 4)])]
        );
        assert_eq!(overlay(&[days(4, 4)]).unwrap(), vec![]);
    }

    #[test]
    fn test_three_overlapping() {
        let a = days(6, 8);
        let b = days(7, 9);
        let c = days(8, 10);
        assert_eq!(
            overlay(&[a, b, c]).unwrap(),
            vec![
                Overlay::new(days(6, 7), vec![a]),
                Overlay::new(days(7, 8), vec![a, b]),
                Overlay::new(days(8, 9), vec![b, c]),
                Overlay::new(days(9, 10), vec![c]),
            ]
        );

        // The order of the input doesn't change the segments
        let segments = overlay(&[c, a, b]).unwrap();
        assert_eq!(
            segments.iter().map(|s| *s.interval()).collect::<Vec<_>>(),
            vec![days(6, 7), days(7, 8), days(8, 9), days(9, 10)]
        );
        assert_eq!(segments[2].elements(), &[b, c]);
    }

    #[test]
    fn test_adjacent_dates() {
        let segments = overlay(&[date(1), date(2)]).unwrap();
        assert_eq!(
            segments,
            vec![
                Overlay::new(days(1, 2), vec![date(1)]),
                Overlay::new(days(2, 3), vec![date(2)]),
            ]
        );
    }

    #[test]
    fn test_gap() {
        let segments = overlay(&[days(1, 3), days(5, 6)]).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(*segments[0].interval(), days(1, 3));
        assert_eq!(*segments[1].interval(), days(5, 6));
    }

    #[test]
    fn test_same_bounds() {
        let a = days(1, 3);
        let segments = overlay(&[a, a, days(2, 3)]).unwrap();
        assert_eq!(
            segments,
            vec![
                Overlay::new(days(1, 2), vec![a, a]),
                Overlay::new(days(2, 3), vec![a, a, days(2, 3)]),
            ]
        );
    }

    #[test]
    fn test_nested() {
        let outer = days(1, 10);
        let inner = days(3, 4);
        let segments = overlay(&[outer, inner, days(6, 6)]).unwrap();
        assert_eq!(
            segments,
            vec![
                Overlay::new(days(1, 3), vec![outer]),
                Overlay::new(days(3, 4), vec![outer, inner]),
                Overlay::new(days(4, 10), vec![outer]),
            ]
        );
    }

    #[test]
    fn test_segments_are_periods() {
        let segments = overlay(&[days(1, 5), days(3, 8)]).unwrap();
        let again = overlay(&segments).unwrap();
        assert_eq!(again.len(), 3);
        assert_eq!(again[1].elements()[0].elements().len(), 2);
        assert_eq!(segments[0].to_interval().unwrap(), days(1, 3));
        assert_eq!(
            crate::algebra::union_all(&segments).unwrap(),
            vec![days(1, 8)]
        );
    }

    #[test]
    fn test_week_with_date() {
        // A week and one of its days
        let week = days(6, 13);
        let segments = overlay(&[week, days(8, 9)]).unwrap();
        let total: Duration =
            segments.iter().map(|s| s.duration()).fold(Duration::zero(), |a, b| a + b);
        assert_eq!(total, Duration::hours(168));
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_errors() {
        struct Broken;
        impl Period for Broken {
            fn to_interval(&self) -> Result<Interval> {
                Err(Error::UnsupportedStepSize { step: 2 })
            }
        }
        let periods: [&dyn Period; 2] = [&days(1, 2), &Broken];
        assert!(matches!(
            overlay(&periods),
            Err(Error::UnsupportedStepSize { step: 2 })
        ));
    }
}
