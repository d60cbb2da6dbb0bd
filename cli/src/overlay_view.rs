use crate::{
    formatters,
    global_settings::GlobalSettings,
    tables::{Column, Elide, Table},
};
use anyhow::{Context, Result};
use console::Term;
use itertools::Itertools;
use kalends_lib::{intervals::overlay, literals::PeriodLiteral};

struct Row {
    segment: String,
    duration: String,
    zoned: Option<String>,
    elements: String,
}

/// Split the periods into consecutive segments, and show which periods are
/// active during each of them.
pub fn overlay_view(periods: &[PeriodLiteral], globals: &GlobalSettings) -> Result<String> {
    let segments = overlay(periods).context("Cannot compute the overlay")?;
    log::debug!("{} periods split into {} segments", periods.len(), segments.len());

    let rows = segments
        .iter()
        .map(|s| {
            Ok(Row {
                segment: formatters::interval(s.interval()),
                duration: formatters::duration(s.duration()),
                zoned: formatters::zoned(s.interval(), globals)?,
                elements: s.elements().iter().join(", "),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut table = Table::new(&globals.table)
        .with_title("Overlay")
        .column(Column::new("Segment", |r: &Row| r.segment.clone()))
        .column(Column::new("Duration", |r: &Row| r.duration.clone()).right_aligned());
    if let Some(tz) = globals.timezone {
        table = table.column(Column::new(tz.name(), |r: &Row| {
            r.zoned.clone().unwrap_or_default()
        }));
    }
    table = table.column(
        Column::new("Periods", |r: &Row| r.elements.clone()).shrink(10, Elide::End),
    );
    table.add_rows(&rows);
    Ok(table.render(Term::stdout().size().1 as usize))
}
