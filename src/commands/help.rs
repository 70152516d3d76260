//! Help and version output.
//!
//! `--help` prints the option overview, `help [COMMAND]` dispatches to the
//! command's own detailed help.

use anyhow::Result;

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: Option<&str>) {
    match command {
        Some("angles") | Some("a") => log_block_start!("Usage: clockhand angles [OPTIONS]"),
        Some("zones") | Some("z") => log_block_start!("Usage: clockhand zones [FILTER]"),
        Some("simulate") | Some("S") => {
            log_block_start!("Usage: clockhand simulate <START> <END> [MULTIPLIER] [OPTIONS]")
        }
        _ => log_block_start!("Usage: clockhand [OPTIONS] [COMMAND]"),
    }
}

/// Usage hint after a parse failure.
pub fn display_usage_error() {
    log_version!();
    show_command_usage(None);
    log_indented!("Run 'clockhand --help' for more information.");
    log_end!();
}

/// Run the help command (dispatcher)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("angles") | Some("a") => super::angles::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some("simulate") | Some("S") => super::simulate::display_help(),
        Some("zones") | Some("z") => super::zones::display_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

pub fn display_version() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// `clockhand --help`
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage: clockhand [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <DIR>     Use DIR instead of ~/.config/clockhand");
    log_indented!("-t, --timezone <ZONE>  Start in ZONE (\"local\" or an IANA name)");
    log_indented!("-d, --debug            Show debug output");
    log_indented!("-h, --help             Print this help");
    log_indented!("-V, --version          Print version");
    display_commands();
    log_block_start!("Keys:");
    log_indented!("q, Esc, Ctrl+C  Quit");
    log_indented!("d               Toggle dark mode");
    log_indented!("z               Next timezone");
    log_indented!("s               Toggle tick sound");
    log_block_start!("Signals:");
    log_indented!("SIGUSR1  Toggle dark mode");
    log_indented!("SIGUSR2  Reload clockhand.toml");
    log_end!();
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    display_commands();
    log_pipe!();
    log_info!("Use 'clockhand help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'clockhand --help' to see all options and general usage.");
    log_end!();
}

fn display_commands() {
    log_block_start!("Commands:");
    log_indented!("(none)                      Run the clock");
    log_indented!("angles, a                   Print hand angles once");
    log_indented!("zones, z [FILTER]           List timezone names");
    log_indented!("simulate, S <START> <END>   Run with simulated time");
    log_indented!("help, h [COMMAND]           Show detailed help for a command");
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: clockhand help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("clockhand help");
    log_indented!("clockhand help simulate");
    log_end!();
}
