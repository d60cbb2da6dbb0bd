mod algebra_view;
mod args;
mod formatters;
mod global_settings;
mod overlay_view;
mod range_view;
mod show_view;
pub mod tables;

use crate::{
    algebra_view::{algebra_view, Operation},
    args::{build_cli, periods},
    global_settings::GlobalSettings,
    overlay_view::overlay_view,
    range_view::range_view,
    show_view::show_view,
};
use anyhow::{bail, Result};
use kalends_lib::{literals::PeriodLiteral, times::Lookback};

fn main() -> Result<()> {
    env_logger::init();

    let args = build_cli().get_matches();
    let globals = GlobalSettings::new(&args);

    let output = match args.subcommand() {
        Some(("completions", sub)) => {
            if let Some(shell) = sub.get_one::<clap_complete_command::Shell>("shell") {
                shell.generate(&mut build_cli(), &mut std::io::stdout());
            }
            return Ok(());
        }
        Some(("show", sub)) => show_view(
            &periods(sub, "PERIOD"),
            sub.get_one::<Lookback>("last").copied(),
            &globals,
        )?,
        Some(("overlay", sub)) => overlay_view(&periods(sub, "PERIOD"), &globals)?,
        Some(("union", sub)) => {
            algebra_view(Operation::Union(&periods(sub, "PERIOD")), &globals)?
        }
        Some(("intersection", sub)) => algebra_view(
            Operation::Intersection(&periods(sub, "PERIOD")),
            &globals,
        )?,
        Some(("difference", sub)) => {
            let Some(base) = sub.get_one::<PeriodLiteral>("BASE") else {
                bail!("Missing period to subtract from");
            };
            algebra_view(
                Operation::Difference {
                    base,
                    minus: &periods(sub, "minus"),
                },
                &globals,
            )?
        }
        Some(("range", sub)) => {
            let Some(literal) = sub.get_one::<PeriodLiteral>("LITERAL") else {
                bail!("Missing range literal");
            };
            range_view(literal, &globals)?
        }
        Some((cmd, _)) => bail!("Unknown command {cmd}"),
        None => bail!("No command given"),
    };
    print!("{}", output);
    Ok(())
}
