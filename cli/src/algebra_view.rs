use crate::{
    formatters,
    global_settings::GlobalSettings,
    tables::{Column, Table},
};
use anyhow::{Context, Result};
use console::Term;
use kalends_lib::{
    intervals::{algebra, Interval},
    literals::PeriodLiteral,
};

/// Which combination of periods to show
pub enum Operation<'a> {
    Union(&'a [PeriodLiteral]),
    Intersection(&'a [PeriodLiteral]),
    Difference {
        base: &'a PeriodLiteral,
        minus: &'a [PeriodLiteral],
    },
}

impl Operation<'_> {
    fn title(&self) -> &'static str {
        match self {
            Operation::Union(_) => "Union",
            Operation::Intersection(_) => "Intersection",
            Operation::Difference { .. } => "Difference",
        }
    }

    fn compute(&self) -> Result<Vec<Interval>> {
        match self {
            Operation::Union(periods) => {
                algebra::union_all(periods).context("Cannot compute the union")
            }
            Operation::Intersection(periods) => Ok(algebra::intersection_all(periods)
                .context("Cannot compute the intersection")?
                .into_iter()
                .collect()),
            Operation::Difference { base, minus } => {
                algebra::difference_all(std::slice::from_ref(*base), minus)
                    .context("Cannot compute the difference")
            }
        }
    }
}

struct Row {
    interval: String,
    duration: String,
    zoned: Option<String>,
}

pub fn algebra_view(op: Operation, globals: &GlobalSettings) -> Result<String> {
    let result = op.compute()?;
    if result.is_empty() {
        return Ok(format!("{}: empty\n", op.title()));
    }

    let total = result
        .iter()
        .fold(chrono::Duration::zero(), |acc, i| acc + i.duration());
    let rows = result
        .iter()
        .map(|intv| {
            Ok(Row {
                interval: formatters::interval(intv),
                duration: formatters::duration(intv.duration()),
                zoned: formatters::zoned(intv, globals)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut table = Table::new(&globals.table)
        .with_title(op.title())
        .column(Column::new("Interval", |r: &Row| r.interval.clone()))
        .column(Column::new("Duration", |r: &Row| r.duration.clone()).right_aligned());
    if let Some(tz) = globals.timezone {
        table = table.column(Column::new(tz.name(), |r: &Row| {
            r.zoned.clone().unwrap_or_default()
        }));
    }
    table.add_rows(&rows);
    if rows.len() > 1 {
        table.add_rule();
        table.add_row(&Row {
            interval: "total".to_string(),
            duration: formatters::duration(total),
            zoned: None,
        });
    }
    Ok(table.render(Term::stdout().size().1 as usize))
}
