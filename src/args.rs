//! Command-line argument parsing.
//!
//! Arguments are scanned once: flags may appear anywhere, the first bare word
//! selects a subcommand and any further bare words are its positional
//! arguments. Anything unrecognised turns into [`CliAction::ShowHelpDueToError`].

use crate::constants::{DEFAULT_SIMULATION_MULTIPLIER, MINIMUM_SIMULATION_MULTIPLIER};

/// What the process should do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the interactive clock
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        timezone: Option<String>,
    },
    /// Print angles and the digital readout once
    Angles {
        config_dir: Option<String>,
        timezone: Option<String>,
        at: Option<String>,
    },
    /// List timezone names
    Zones { filter: Option<String> },
    /// Run the clock against an accelerated simulated time source
    Simulate {
        debug_enabled: bool,
        config_dir: Option<String>,
        timezone: Option<String>,
        start_time: String,
        end_time: String,
        multiplier: f64,
        log_to_file: bool,
    },
    /// Detailed help for one command, or the command overview
    HelpCommand { command: Option<String> },
    ShowHelp,
    ShowVersion,
    ShowHelpDueToError,
}

pub struct ParsedArgs {
    pub action: CliAction,
}

#[derive(Default)]
struct Flags {
    debug_enabled: bool,
    config_dir: Option<String>,
    timezone: Option<String>,
    at: Option<String>,
    log_to_file: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    /// Parse arguments, including the program name in position 0.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let action = Self::parse_action(args).unwrap_or(CliAction::ShowHelpDueToError);
        ParsedArgs { action }
    }

    fn parse_action<I, S>(args: I) -> Option<CliAction>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut flags = Flags::default();
        let mut positional: Vec<String> = Vec::new();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" | "-d" => flags.debug_enabled = true,
                "--log" | "-l" => flags.log_to_file = true,
                "--help" | "-h" => flags.help = true,
                "--version" | "-V" | "-v" => flags.version = true,
                "--config" | "-c" => flags.config_dir = Some(iter.next()?),
                "--timezone" | "-t" => flags.timezone = Some(iter.next()?),
                "--at" => flags.at = Some(iter.next()?),
                other if other.starts_with('-') && other.len() > 1 => {
                    log_warning_standalone!("Unknown argument: {}", other);
                    return None;
                }
                _ => positional.push(arg),
            }
        }

        if flags.version {
            return Some(CliAction::ShowVersion);
        }
        if flags.help && positional.is_empty() {
            return Some(CliAction::ShowHelp);
        }

        let mut positional = positional.into_iter();
        let Some(command) = positional.next() else {
            return Some(CliAction::Run {
                debug_enabled: flags.debug_enabled,
                config_dir: flags.config_dir,
                timezone: flags.timezone,
            });
        };
        let rest: Vec<String> = positional.collect();

        if flags.help {
            return Some(CliAction::HelpCommand {
                command: Some(command),
            });
        }

        match command.as_str() {
            "angles" | "a" if rest.is_empty() => Some(CliAction::Angles {
                config_dir: flags.config_dir,
                timezone: flags.timezone,
                at: flags.at,
            }),
            "zones" | "z" if rest.len() <= 1 => Some(CliAction::Zones {
                filter: rest.into_iter().next(),
            }),
            "simulate" | "S" => {
                let (start_time, end_time, multiplier) = parse_simulate_args(&rest)?;
                Some(CliAction::Simulate {
                    debug_enabled: flags.debug_enabled,
                    config_dir: flags.config_dir,
                    timezone: flags.timezone,
                    start_time,
                    end_time,
                    multiplier,
                    log_to_file: flags.log_to_file,
                })
            }
            "help" | "h" if rest.len() <= 1 => Some(CliAction::HelpCommand {
                command: rest.into_iter().next(),
            }),
            unknown => {
                log_warning_standalone!("Unknown or malformed command: {}", unknown);
                None
            }
        }
    }
}

/// `<start> <end> [multiplier]`, where a multiplier of 0 means fast-forward.
fn parse_simulate_args(rest: &[String]) -> Option<(String, String, f64)> {
    match rest {
        [start, end] => Some((start.clone(), end.clone(), DEFAULT_SIMULATION_MULTIPLIER)),
        [start, end, multiplier] => {
            let multiplier = multiplier
                .parse::<f64>()
                .ok()
                .filter(|m| m.is_finite() && (*m == 0.0 || *m >= MINIMUM_SIMULATION_MULTIPLIER));
            if multiplier.is_none() {
                log_warning_standalone!(
                    "Multiplier must be 0 (fast-forward) or at least {}",
                    MINIMUM_SIMULATION_MULTIPLIER
                );
            }
            Some((start.clone(), end.clone(), multiplier?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["clockhand"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_no_args_runs() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None,
                timezone: None
            }
        );
    }

    #[test]
    fn test_run_with_flags() {
        assert_eq!(
            parse(&["--debug", "--timezone", "Asia/Tokyo", "-c", "/tmp/cfg"]),
            CliAction::Run {
                debug_enabled: true,
                config_dir: Some("/tmp/cfg".into()),
                timezone: Some("Asia/Tokyo".into())
            }
        );
    }

    #[test]
    fn test_flag_missing_value() {
        assert_eq!(parse(&["--timezone"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
        assert_eq!(parse(&["angles", "--version"]), CliAction::ShowVersion);
        assert_eq!(
            parse(&["zones", "--help"]),
            CliAction::HelpCommand {
                command: Some("zones".into())
            }
        );
        assert_eq!(
            parse(&["help", "simulate"]),
            CliAction::HelpCommand {
                command: Some("simulate".into())
            }
        );
    }

    #[test]
    fn test_angles_command() {
        assert_eq!(
            parse(&["angles", "-t", "UTC", "--at", "2025-01-01 03:00:00"]),
            CliAction::Angles {
                config_dir: None,
                timezone: Some("UTC".into()),
                at: Some("2025-01-01 03:00:00".into())
            }
        );
    }

    #[test]
    fn test_zones_command() {
        assert_eq!(
            parse(&["zones", "europe"]),
            CliAction::Zones {
                filter: Some("europe".into())
            }
        );
        assert_eq!(parse(&["z"]), CliAction::Zones { filter: None });
        assert_eq!(parse(&["zones", "a", "b"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_simulate_command() {
        assert_eq!(
            parse(&[
                "simulate",
                "2025-01-01 10:00:00",
                "2025-01-01 12:00:00",
                "0",
                "--log"
            ]),
            CliAction::Simulate {
                debug_enabled: false,
                config_dir: None,
                timezone: None,
                start_time: "2025-01-01 10:00:00".into(),
                end_time: "2025-01-01 12:00:00".into(),
                multiplier: 0.0,
                log_to_file: true,
            }
        );
    }

    #[test]
    fn test_simulate_defaults_and_errors() {
        match parse(&["S", "2025-01-01 10:00:00", "2025-01-01 11:00:00"]) {
            CliAction::Simulate { multiplier, .. } => {
                assert_eq!(multiplier, DEFAULT_SIMULATION_MULTIPLIER)
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            parse(&["simulate", "2025-01-01 10:00:00"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["simulate", "a", "b", "-5"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["simulate", "a", "b", "1e-300"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(parse(&["simulate", "a", "b", "inf"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_unknown_input() {
        assert_eq!(parse(&["--frobnicate"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["dance"]), CliAction::ShowHelpDueToError);
    }
}
