use crate::{
    formatters,
    global_settings::GlobalSettings,
    tables::{Column, Elide, Table},
};
use anyhow::{Context, Result};
use console::Term;
use kalends_lib::{intervals::Period, literals::PeriodLiteral, times::Lookback};

struct Row {
    name: String,
    interval: String,
    duration: String,
    zoned: Option<String>,
}

impl Row {
    fn new<P: Period>(name: String, period: &P, globals: &GlobalSettings) -> Result<Self> {
        let intv = period
            .to_interval()
            .with_context(|| format!("Cannot convert {name} to an interval"))?;
        Ok(Row {
            interval: formatters::interval(&intv),
            duration: formatters::duration(intv.duration()),
            zoned: formatters::zoned(&intv, globals)
                .with_context(|| format!("Cannot localize {name}"))?,
            name,
        })
    }
}

pub fn show_view(
    periods: &[PeriodLiteral],
    last: Option<Lookback>,
    globals: &GlobalSettings,
) -> Result<String> {
    let mut rows = periods
        .iter()
        .map(|p| Row::new(p.to_string(), p, globals))
        .collect::<Result<Vec<_>>>()?;
    if let Some(lookback) = last {
        let relative = lookback.anchored(globals.reftime)?;
        rows.push(Row::new(format!("last {lookback}"), &relative, globals)?);
    }

    let mut table = Table::new(&globals.table)
        .column(Column::new("Period", |r: &Row| r.name.clone()).shrink(7, Elide::Start))
        .column(Column::new("Interval", |r: &Row| r.interval.clone()))
        .column(Column::new("Duration", |r: &Row| r.duration.clone()).right_aligned());
    if let Some(tz) = globals.timezone {
        table = table.column(Column::new(tz.name(), |r: &Row| {
            r.zoned.clone().unwrap_or_default()
        }));
    }
    table.add_rows(&rows);
    Ok(table.render(Term::stdout().size().1 as usize))
}
