use crate::{
    formatters,
    global_settings::GlobalSettings,
    tables::{Column, Table},
};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use console::Term;
use kalends_lib::{intervals::Period, literals::PeriodLiteral};

struct Row {
    index: usize,
    name: String,
    interval: String,
    duration: String,
}

impl Row {
    fn new<P: Period + std::fmt::Display>(index: usize, element: &P) -> Result<Self> {
        let intv = element.to_interval()?;
        Ok(Row {
            index,
            name: element.to_string(),
            interval: formatters::interval(&intv),
            duration: formatters::duration(intv.duration()),
        })
    }
}

fn element_rows<P, I>(elements: I) -> Result<Vec<Row>>
where
    P: Period + std::fmt::Display,
    I: IntoIterator<Item = P>,
{
    elements
        .into_iter()
        .enumerate()
        .map(|(idx, e)| Row::new(idx + 1, &e))
        .collect()
}

/// List the elements of a range literal, in the range's order.  A single
/// month or week is listed day by day.
pub fn range_view(literal: &PeriodLiteral, globals: &GlobalSettings) -> Result<String> {
    let rows = match literal {
        PeriodLiteral::Months(r) => element_rows(r)?,
        PeriodLiteral::Weeks(r) => element_rows(r)?,
        PeriodLiteral::Days(r) => element_rows(r.days())?,
        PeriodLiteral::Month(m) => element_rows(m.days())?,
        PeriodLiteral::Week(w) => element_rows(w.days())?,
        PeriodLiteral::Date(d) => element_rows::<NaiveDate, _>([*d])?,
        PeriodLiteral::Interval(_) => {
            bail!("Cannot enumerate {literal}, it is not made of calendar units")
        }
    };
    log::debug!("{literal} has {} elements", rows.len());

    let mut table = Table::new(&globals.table)
        .with_title(&literal.to_string())
        .column(Column::new("#", |r: &Row| r.index.to_string()).right_aligned())
        .column(Column::new("Element", |r: &Row| r.name.clone()))
        .column(Column::new("Interval", |r: &Row| r.interval.clone()))
        .column(Column::new("Duration", |r: &Row| r.duration.clone()).right_aligned());
    table.add_rows(&rows);
    Ok(table.render(Term::stdout().size().1 as usize))
}
