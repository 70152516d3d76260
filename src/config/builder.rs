//! Writing the commented default `clockhand.toml`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Write a default config file at `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", path.display());
    Ok(())
}

/// Default file contents, settings aligned with their comments.
pub fn default_config_content() -> String {
    let zones = DEFAULT_ZONES
        .iter()
        .map(|z| format!("\"{z}\""))
        .collect::<Vec<_>>()
        .join(", ");

    ConfigBuilder::default()
        .section("Zone")
        .setting(
            "timezone",
            &format!("\"{DEFAULT_TIMEZONE}\""),
            "Zone shown at startup: \"local\" or an IANA name (see 'clockhand zones')",
        )
        .setting("zones", &format!("[{zones}]"), "Zones cycled with the 'z' key")
        .section("Appearance")
        .setting("dark_mode", &DEFAULT_DARK_MODE.to_string(), "Start in dark mode")
        .setting(
            "hour12",
            &DEFAULT_HOUR12.to_string(),
            "12-hour digital readout with AM/PM",
        )
        .setting(
            "face_size",
            &DEFAULT_FACE_SIZE.to_string(),
            &format!("Reference face size for numeral placement ({MINIMUM_FACE_SIZE}-{MAXIMUM_FACE_SIZE})"),
        )
        .setting(
            "angle_convention",
            &format!("\"{DEFAULT_ANGLE_CONVENTION}\""),
            "Hand zero-reference: \"twelve_at_top\", \"zero_at_right\", \"zero_at_left\"",
        )
        .section("Timing")
        .setting(
            "update_interval_ms",
            &DEFAULT_UPDATE_INTERVAL_MS.to_string(),
            &format!(
                "Refresh cadence ({MINIMUM_UPDATE_INTERVAL_MS}-{MAXIMUM_UPDATE_INTERVAL_MS}) milliseconds"
            ),
        )
        .setting(
            "tick_sound",
            &DEFAULT_TICK_SOUND.to_string(),
            "Ring the terminal bell on every second",
        )
        .build()
}

enum Entry {
    Section(String),
    Setting { line: String, comment: String },
}

#[derive(Default)]
struct ConfigBuilder {
    entries: Vec<Entry>,
}

impl ConfigBuilder {
    fn section(mut self, title: &str) -> Self {
        self.entries.push(Entry::Section(format!("#[{title}]")));
        self
    }

    fn setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let width = self
            .entries
            .iter()
            .filter_map(|e| match e {
                Entry::Setting { line, .. } => Some(line.chars().count()),
                Entry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Section(title) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                Entry::Setting { line, comment } => {
                    let padding = " ".repeat(width - line.chars().count());
                    lines.push(format!("{line}{padding}{comment}"));
                }
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}
