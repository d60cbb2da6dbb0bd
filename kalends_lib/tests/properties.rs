use kalends_intervals::Period;
use kalends_lib::{
    literals::{parse_period, PeriodLiteral},
    months::CalendarMonth,
    ranges::{CalendarUnit, Range},
    weeks::IsoWeek,
};
use quickcheck::quickcheck;

/// Keep years well within what chrono supports, including negative ones
fn year(y: i32) -> i32 {
    y % 200_000
}

fn month(y: i32, m: u8) -> CalendarMonth {
    CalendarMonth::new(year(y), u32::from(m % 12) + 1).unwrap()
}

fn week(y: i32, w: u8) -> IsoWeek {
    let y = year(y);
    IsoWeek::new(y, u32::from(w) % IsoWeek::weeks_in_year(y) + 1).unwrap()
}

quickcheck! {
    fn month_display_parses_back(y: i32, m: u8) -> bool {
        let m = month(y, m);
        m.to_string().parse::<CalendarMonth>() == Ok(m)
    }

    fn week_display_parses_back(y: i32, w: u8) -> bool {
        let w = week(y, w);
        w.to_string().parse::<IsoWeek>() == Ok(w)
    }

    fn month_shift_then_diff(y: i32, m: u8, n: i32) -> bool {
        let m = month(y, m);
        let n = i64::from(n % 100_000);
        m.shift(n).map(|s| s.diff(&m)) == Ok(n)
    }

    fn week_shift_then_diff(y: i32, w: u8, n: i32) -> bool {
        let w = week(y, w);
        let n = i64::from(n % 100_000);
        w.shift(n).map(|s| s.diff(&w)) == Ok(n)
    }

    fn month_range_literal_round_trip(y: i32, m: u8, n: i16) -> bool {
        let first = month(y, m);
        let last = first.shift(i64::from(n)).unwrap();
        let range = Range::new(first, last);
        match parse_period(&range.to_string()) {
            Ok(PeriodLiteral::Months(parsed)) => {
                parsed == range && parsed.to_interval() == range.to_interval()
            }
            _ => false,
        }
    }
}
