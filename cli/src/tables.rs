//! Text tables sized to the terminal.  Columns are computed from each row
//! by a closure; the widest columns shrink (and are elided) when the
//! terminal is too narrow.

#[derive(Clone, Copy)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy)]
pub enum Sizing {
    /// Always as wide as its widest cell
    Natural,

    /// Gives up space when the table is too wide, down to `min` characters
    Shrink { min: usize },
}

/// Which end of a cell to drop when it does not fit
#[derive(Clone, Copy)]
pub enum Elide {
    Start,
    End,
}

pub struct Column<'a, R> {
    title: String,
    align: Align,
    sizing: Sizing,
    elide: Elide,
    cell: Box<dyn Fn(&R) -> String + 'a>,
}

impl<'a, R> Column<'a, R> {
    pub fn new(title: &str, cell: impl Fn(&R) -> String + 'a) -> Self {
        Self {
            title: title.to_string(),
            align: Align::Left,
            sizing: Sizing::Natural,
            elide: Elide::End,
            cell: Box::new(cell),
        }
    }

    pub fn right_aligned(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn shrink(mut self, min: usize, elide: Elide) -> Self {
        self.sizing = Sizing::Shrink { min };
        self.elide = elide;
        self
    }
}

#[derive(Clone)]
pub struct Settings {
    pub colsep: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            colsep: "│".to_string(),
        }
    }
}

enum Line {
    Rule,
    Cells(Vec<String>),
}

pub struct Table<'a, R> {
    title: Option<String>,
    columns: Vec<Column<'a, R>>,
    lines: Vec<Line>,
    settings: Settings,
}

impl<'a, R> Table<'a, R> {
    pub fn new(settings: &Settings) -> Self {
        Self {
            title: None,
            columns: Vec::new(),
            lines: Vec::new(),
            settings: settings.clone(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn column(mut self, column: Column<'a, R>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn add_row(&mut self, row: &R) {
        let cells = self.columns.iter().map(|c| (c.cell)(row)).collect();
        self.lines.push(Line::Cells(cells));
    }

    pub fn add_rows<'r>(&mut self, rows: impl IntoIterator<Item = &'r R>)
    where
        R: 'r,
    {
        for row in rows {
            self.add_row(row);
        }
    }

    pub fn add_rule(&mut self) {
        self.lines.push(Line::Rule);
    }

    fn has_headers(&self) -> bool {
        self.columns.iter().any(|c| !c.title.is_empty())
    }

    fn natural_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let title = if self.has_headers() {
                    width_of(&col.title)
                } else {
                    0
                };
                self.lines
                    .iter()
                    .filter_map(|line| match line {
                        Line::Rule => None,
                        Line::Cells(cells) => cells.get(idx).map(|c| width_of(c)),
                    })
                    .fold(title, usize::max)
            })
            .collect()
    }

    /// Render the table within `max_width` characters per line, if
    /// possible.
    pub fn render(&self, max_width: usize) -> String {
        let seps = self.columns.len().saturating_sub(1) * width_of(&self.settings.colsep);
        let sizing: Vec<Sizing> = self.columns.iter().map(|c| c.sizing).collect();
        let widths = fit_widths(&self.natural_widths(), &sizing, max_width.saturating_sub(seps));
        let total = widths.iter().sum::<usize>() + seps;

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(&format!("{:^total$}\n", title));
            out.push_str(&"═".repeat(total));
            out.push('\n');
        }
        if self.has_headers() {
            let titles: Vec<String> = self.columns.iter().map(|c| c.title.clone()).collect();
            self.push_cells(&mut out, &titles, &widths, Some(Align::Center));
            self.push_rule(&mut out, &widths);
        }
        for line in &self.lines {
            match line {
                Line::Rule => self.push_rule(&mut out, &widths),
                Line::Cells(cells) => self.push_cells(&mut out, cells, &widths, None),
            }
        }
        out
    }

    fn push_rule(&self, out: &mut String, widths: &[usize]) {
        let rules: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        out.push_str(&rules.join(&self.settings.colsep));
        out.push('\n');
    }

    fn push_cells(
        &self,
        out: &mut String,
        cells: &[String],
        widths: &[usize],
        align: Option<Align>,
    ) {
        let parts: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .zip(cells)
            .map(|((col, width), cell)| {
                pad(&elide(cell, *width, col.elide), *width, align.unwrap_or(col.align))
            })
            .collect();
        out.push_str(&parts.join(&self.settings.colsep));
        out.push('\n');
    }
}

fn width_of(s: &str) -> usize {
    s.chars().count()
}

/// Share `budget` characters between the columns.  Natural columns always
/// get their full width.  When this exceeds the budget, shrinkable columns
/// get their minimum plus an equal share of what is left.  If even that is
/// too large, lines will wrap on the terminal.
fn fit_widths(natural: &[usize], sizing: &[Sizing], budget: usize) -> Vec<usize> {
    if natural.iter().sum::<usize>() <= budget {
        return natural.to_vec();
    }
    let minimum = |w: usize, s: &Sizing| match s {
        Sizing::Natural => w,
        Sizing::Shrink { min } => w.min(*min),
    };
    let required: usize = natural.iter().zip(sizing).map(|(w, s)| minimum(*w, s)).sum();
    let shrinkable = sizing
        .iter()
        .filter(|s| matches!(s, Sizing::Shrink { .. }))
        .count();
    let share = budget.saturating_sub(required) / shrinkable.max(1);
    natural
        .iter()
        .zip(sizing)
        .map(|(w, s)| match s {
            Sizing::Natural => *w,
            Sizing::Shrink { .. } => (minimum(*w, s) + share).min(*w),
        })
        .collect()
}

/// Shorten a cell to `width` characters, marking the cut with an ellipsis
fn elide(cell: &str, width: usize, elide: Elide) -> String {
    let len = width_of(cell);
    if len <= width {
        return cell.to_string();
    }
    if width == 0 {
        return String::new();
    }
    match elide {
        Elide::End => {
            let kept: String = cell.chars().take(width - 1).collect();
            format!("{kept}…")
        }
        Elide::Start => {
            let kept: String = cell.chars().skip(len + 1 - width).collect();
            format!("…{kept}")
        }
    }
}

fn pad(value: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", value),
        Align::Center => format!("{:^width$}", value),
        Align::Right => format!("{:>width$}", value),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table(settings: &Settings) -> Table<'static, (&'static str, u32)> {
        let mut t = Table::new(settings)
            .column(Column::new("Name", |r: &(&str, u32)| r.0.to_string()).shrink(3, Elide::Start))
            .column(Column::new("N", |r: &(&str, u32)| r.1.to_string()).right_aligned());
        t.add_rows(&[("abcdefghijklmnopqrstuvwxyz", 1), ("abcdefghijklmn", 123)]);
        t
    }

    #[test]
    fn test_fit_widths() {
        let sizing = [Sizing::Shrink { min: 3 }, Sizing::Natural];
        assert_eq!(fit_widths(&[26, 9], &sizing, 40), vec![26, 9]);
        assert_eq!(fit_widths(&[26, 9], &sizing, 19), vec![10, 9]);
        assert_eq!(fit_widths(&[26, 9], &sizing, 12), vec![3, 9]);
        assert_eq!(fit_widths(&[26, 9], &sizing, 1), vec![3, 9]);
        assert_eq!(fit_widths(&[2, 9], &sizing, 1), vec![2, 9]);

        let two = [Sizing::Shrink { min: 2 }, Sizing::Shrink { min: 2 }];
        assert_eq!(fit_widths(&[10, 4], &two, 10), vec![5, 4]);
    }

    #[test]
    fn test_elide() {
        assert_eq!(elide("abcdef", 10, Elide::End), "abcdef");
        assert_eq!(elide("abcdef", 4, Elide::End), "abc…");
        assert_eq!(elide("abcdef", 4, Elide::Start), "…def");
        assert_eq!(elide("abcdef", 0, Elide::Start), "");
    }

    #[test]
    fn test_render() {
        let settings = Settings { colsep: "|".into() };
        let t = table(&settings);

        // We have plenty of space to display the columns
        assert_eq!(
            t.render(40),
            "           Name           | N \n\
             ──────────────────────────|───\n\
             abcdefghijklmnopqrstuvwxyz|  1\n\
             abcdefghijklmn            |123\n"
        );

        // But we can adapt to shorter widths
        assert_eq!(
            t.render(12),
            "  Name  | N \n\
             ────────|───\n\
             …tuvwxyz|  1\n\
             …hijklmn|123\n"
        );

        // until the screen is just too narrow
        assert_eq!(
            t.render(2),
            "…me| N \n\
             ───|───\n\
             …yz|  1\n\
             …mn|123\n"
        );
    }

    #[test]
    fn test_title_and_rule() {
        let mut t = Table::new(&Settings::default())
            .with_title("Sum")
            .column(Column::new("", |r: &u32| r.to_string()).right_aligned());
        t.add_rows(&[1, 20]);
        t.add_rule();
        t.add_row(&21);
        assert_eq!(t.render(80), "Sum\n══\n 1\n20\n──\n21\n");
    }
}
