use crate::global_settings::GlobalSettings;
use anyhow::Result;
use chrono::Duration;
use kalends_lib::{intervals::Interval, times::localize_interval};

/// Display a duration as days, hours, minutes and seconds, omitting the
/// zero components: `1d 2h`, `45m`, `0s`.
pub fn duration(d: Duration) -> String {
    let sign = if d < Duration::zero() { "-" } else { "" };
    let d = d.abs();
    let parts = [
        (d.num_days(), "d"),
        (d.num_hours() % 24, "h"),
        (d.num_minutes() % 60, "m"),
        (d.num_seconds() % 60, "s"),
    ];
    let text = parts
        .iter()
        .filter(|(count, _)| *count != 0)
        .map(|(count, unit)| format!("{count}{unit}"))
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        "0s".to_string()
    } else {
        format!("{sign}{text}")
    }
}

/// Wall-clock bounds of an interval
pub fn interval(intv: &Interval) -> String {
    intv.canonical().to_string()
}

/// The interval in the timezone from the settings, if any
pub fn zoned(intv: &Interval, globals: &GlobalSettings) -> Result<Option<String>> {
    match globals.timezone {
        None => Ok(None),
        Some(tz) => {
            let z = localize_interval(intv, tz, globals.disambiguation)?;
            Ok(Some(format!("{} ({})", z, duration(z.duration()))))
        }
    }
}

#[cfg(test)]
mod test {
    use super::duration;
    use chrono::Duration;

    #[test]
    fn test_duration() {
        assert_eq!(duration(Duration::zero()), "0s");
        assert_eq!(duration(Duration::hours(168)), "7d");
        assert_eq!(duration(Duration::hours(23)), "23h");
        assert_eq!(duration(Duration::minutes(90)), "1h 30m");
        assert_eq!(duration(Duration::seconds(-61)), "-1m 1s");
        assert_eq!(duration(Duration::milliseconds(500)), "0s");
    }
}
