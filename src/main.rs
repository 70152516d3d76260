//! Binary entry point: parse arguments and dispatch.
//!
//! Everything of substance lives in the library; this file only maps a
//! [`CliAction`] onto the matching command or onto [`ClockApp`].

use anyhow::Result;

use clockhand::args::{CliAction, ParsedArgs};
use clockhand::commands::{self, simulate::SimulateOptions};
use clockhand::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use clockhand::{ClockApp, config, log_error_exit};

fn main() {
    let parsed_args = ParsedArgs::parse(std::env::args());

    match run(parsed_args.action) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log_error_exit!("{e:#}");
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run(action: CliAction) -> Result<i32> {
    match action {
        CliAction::ShowVersion => commands::help::display_version(),
        CliAction::ShowHelp => commands::help::display_help(),
        CliAction::ShowHelpDueToError => {
            commands::help::display_usage_error();
            return Ok(EXIT_FAILURE);
        }
        CliAction::HelpCommand { command } => {
            commands::help::run_help_command(command.as_deref())?
        }
        CliAction::Zones { filter } => commands::zones::run_zones_command(filter.as_deref())?,
        CliAction::Angles {
            config_dir,
            timezone,
            at,
        } => {
            config::set_config_dir(config_dir)?;
            commands::angles::run_angles_command(timezone.as_deref(), at.as_deref())?
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            timezone,
        } => {
            config::set_config_dir(config_dir)?;
            ClockApp::new(debug_enabled).with_timezone(timezone).run()?
        }
        CliAction::Simulate {
            debug_enabled,
            config_dir,
            timezone,
            start_time,
            end_time,
            multiplier,
            log_to_file,
        } => {
            config::set_config_dir(config_dir)?;
            commands::simulate::run_simulate_command(SimulateOptions {
                start_time,
                end_time,
                multiplier,
                timezone,
                log_to_file,
                debug_enabled,
            })?
        }
    }
    Ok(EXIT_SUCCESS)
}
