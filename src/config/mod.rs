//! Configuration for clockhand.
//!
//! Settings live in `clockhand.toml` under `$XDG_CONFIG_HOME/clockhand/` (or the
//! directory passed with `--config`). A commented default file is written the
//! first time the clock runs.
//!
//! ```toml
//! timezone = "local"           # Zone shown at startup: "local" or an IANA name
//! zones = ["local", "UTC"]     # Zones cycled with the 'z' key
//! dark_mode = false            # Start in dark mode
//! tick_sound = true            # Ring the terminal bell on every second
//! update_interval_ms = 100     # Refresh cadence (10-1000) milliseconds
//! angle_convention = "twelve_at_top" # "twelve_at_top", "zero_at_right", "zero_at_left"
//! face_size = 380              # Reference face size for numeral placement (120-2000)
//! hour12 = true                # 12-hour digital readout with AM/PM
//! ```
//!
//! Every field is optional; accessors fall back to the defaults in
//! [`crate::constants`]. Values are validated on load and a bad file is
//! rejected with a message naming the offending field.

pub mod builder;
pub mod loading;
pub mod validation;


use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use crate::clock::AngleConvention;
use crate::constants::*;

pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path, set_config_dir};

/// Parsed `clockhand.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub timezone: Option<String>,
    pub zones: Option<Vec<String>>,
    pub dark_mode: Option<bool>,
    pub tick_sound: Option<bool>,
    pub update_interval_ms: Option<u64>,
    pub angle_convention: Option<String>,
    pub face_size: Option<u32>,
    pub hour12: Option<bool>,
}

impl Config {
    /// Load from the configured location, creating a default file if needed.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    /// Replace the startup zone with a `--timezone` value, rejecting unknown names.
    pub fn override_timezone(&mut self, zone: &str) -> Result<()> {
        crate::clock::ZoneId::parse(zone).map_err(|e| {
            anyhow::anyhow!("--timezone: {e}. Run 'clockhand zones' to list valid names")
        })?;
        self.timezone = Some(zone.trim().to_string());
        Ok(())
    }

    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
    }

    /// Zones to cycle through. The startup zone is always part of the list.
    pub fn zones(&self) -> Vec<String> {
        let mut zones: Vec<String> = match &self.zones {
            Some(list) if !list.is_empty() => list.clone(),
            _ => DEFAULT_ZONES.iter().map(|z| z.to_string()).collect(),
        };
        let current = self.timezone();
        if !zones.iter().any(|z| z.eq_ignore_ascii_case(current)) {
            zones.insert(0, current.to_string());
        }
        zones
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.unwrap_or(DEFAULT_DARK_MODE)
    }

    pub fn tick_sound(&self) -> bool {
        self.tick_sound.unwrap_or(DEFAULT_TICK_SOUND)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms.unwrap_or(DEFAULT_UPDATE_INTERVAL_MS))
    }

    /// Unknown spellings are rejected by validation, so this only falls back
    /// for configs built in code.
    pub fn angle_convention(&self) -> AngleConvention {
        self.angle_convention
            .as_deref()
            .and_then(AngleConvention::parse)
            .unwrap_or_default()
    }

    pub fn face_size(&self) -> u32 {
        self.face_size.unwrap_or(DEFAULT_FACE_SIZE)
    }

    pub fn hour12(&self) -> bool {
        self.hour12.unwrap_or(DEFAULT_HOUR12)
    }

    /// Print the effective settings.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Timezone: {}", self.timezone());
        log_indented!("Zones: {}", self.zones().join(", "));
        log_indented!("Dark mode: {}", if self.dark_mode() { "on" } else { "off" });
        log_indented!("Tick sound: {}", if self.tick_sound() { "on" } else { "off" });
        log_indented!("Update interval: {}ms", self.update_interval().as_millis());
        log_indented!("Angle convention: {}", self.angle_convention().as_str());
        log_indented!("Face size: {}", self.face_size());
        log_indented!(
            "Digital format: {}",
            if self.hour12() { "12-hour" } else { "24-hour" }
        );
    }
}
