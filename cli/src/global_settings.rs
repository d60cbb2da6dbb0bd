use chrono::Local;
use chrono_tz::Tz;
use clap::{arg, Arg, ArgMatches};
use kalends_lib::{
    intervals::Timestamp,
    times::{parse_timezone, Disambiguation},
};

pub struct GlobalSettings {
    // Show periods in this timezone, in addition to wall-clock times
    pub timezone: Option<Tz>,
    pub disambiguation: Disambiguation,

    pub table: crate::tables::Settings,

    // Reference time for all relative periods ("last 3 months").
    pub reftime: Timestamp,
}

impl GlobalSettings {
    /// Return the command line switches to configure the global settings
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(--timezone [ZONE] "Also show periods in this timezone, like Europe/Paris")
                .value_parser(parse_timezone)
                .global(true),
            arg!(--disambiguation [MODE] "How to resolve wall-clock times that happen twice")
                .value_parser(|s: &str| s.parse::<Disambiguation>())
                .default_value("strict")
                .global(true),
            arg!(--colsep [SEP] "Column separator in tables")
                .default_value("│")
                .global(true),
        ]
    }

    /// Create the settings from the command line arguments.
    pub fn new(args: &ArgMatches) -> Self {
        GlobalSettings {
            timezone: args.get_one::<Tz>("timezone").copied(),
            disambiguation: args
                .get_one::<Disambiguation>("disambiguation")
                .copied()
                .unwrap_or_default(),
            reftime: Local::now().naive_local(),
            table: crate::tables::Settings {
                colsep: args
                    .get_one::<String>("colsep")
                    .cloned()
                    .unwrap_or_else(|| "│".to_string()),
            },
        }
    }
}
