use crate::global_settings::GlobalSettings;
use clap::{arg, Arg, ArgMatches, Command};
use kalends_lib::{literals::parse_period, literals::PeriodLiteral, times::Lookback};

fn periods_arg() -> Arg {
    Arg::new("PERIOD")
        .help("A period literal, like 2024-07, 2024-W05, 2024-07-14 or 2024-01/2024-06")
        .num_args(1..)
        .required(true)
        .value_parser(parse_period)
}

pub(crate) fn build_cli() -> Command {
    Command::new("kalends")
        .version("0.1")
        .about("Combine and decompose calendar periods")
        .subcommand_required(true)
        .flatten_help(true) // show help for all subcommands
        .arg_required_else_help(true) // show full help if nothing given
        .args(GlobalSettings::cli())
        .subcommand(
            Command::new("show")
                .about("Show the interval covered by each period")
                .arg(periods_arg().required(false))
                .arg(
                    arg!(--last [LOOKBACK] "Also show the period ending now, like 3m, 10d or 1y")
                        .value_parser(|s: &str| s.parse::<Lookback>()),
                ),
        )
        .subcommand(
            Command::new("overlay")
                .about("Split periods into segments where the same periods are active")
                .arg(periods_arg()),
        )
        .subcommand(
            Command::new("union")
                .about("Merge overlapping or adjacent periods")
                .arg(periods_arg()),
        )
        .subcommand(
            Command::new("intersection")
                .about("Show the time shared by all periods")
                .arg(periods_arg()),
        )
        .subcommand(
            Command::new("difference")
                .about("Show the parts of a period not covered by others")
                .arg(
                    Arg::new("BASE")
                        .help("The period to subtract from")
                        .required(true)
                        .value_parser(parse_period),
                )
                .arg(
                    arg!(--minus <PERIOD> "Period to subtract")
                        .num_args(1..)
                        .value_parser(parse_period),
                ),
        )
        .subcommand(
            Command::new("range")
                .about("List the months, weeks or days of a period")
                .arg(
                    Arg::new("LITERAL")
                        .help("A range like 2024-01/2024-06, or a single month or week")
                        .required(true)
                        .value_parser(parse_period),
                ),
        )
        .subcommand(
            // Use    eval "$(kalends completions zsh)"
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .help("The shell to generate the completions for")
                        .required(true)
                        .value_parser(clap::builder::EnumValueParser::<
                            clap_complete_command::Shell,
                        >::new()),
                ),
        )
}

/// All period literals given for the argument, in command line order
pub(crate) fn periods(args: &ArgMatches, name: &str) -> Vec<PeriodLiteral> {
    args.get_many::<PeriodLiteral>(name)
        .map(|p| p.copied().collect())
        .unwrap_or_default()
}
