//! The clock widget: per-instance state plus the per-sample update.
//!
//! A [`ClockWidget`] owns everything that persists between samples: the
//! previous seconds value, the theme, the selected zone and the sound sink.
//! It is moved into the periodic task, so nothing else ever touches it; other
//! threads talk to it through [`WidgetCommand`]s.

use chrono::{DateTime, Utc};

use crate::clock::zone::{format_digital, local_fields};
use crate::clock::{
    AngleConvention, ChronoZoneResolver, HandAngles, TickDetector, TimeSample, ZoneId,
    ZoneResolver, compute_angles,
};
use crate::config::Config;
use crate::sound::{SilentSink, TerminalBell, TickSink, ToneSpec};
use crate::theme::Theme;

/// Shown in the digital readout when the selected zone cannot be resolved
pub const INVALID_TIMEZONE_TEXT: &str = "invalid timezone";

/// Requests delivered to the widget from input and signal handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    ToggleTheme,
    CycleZone,
    ToggleSound,
    Reconfigure(Config),
}

/// Everything the renderer needs for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFrame {
    pub sample: TimeSample,
    pub angles: HandAngles,
    pub convention: AngleConvention,
    pub digital: String,
    /// False when the selected zone failed and local time is shown instead
    pub zone_valid: bool,
    pub zone_label: String,
    pub ticked: bool,
    pub theme: Theme,
    pub sound_enabled: bool,
}

pub struct ClockWidget {
    zones: Vec<String>,
    zone_index: usize,
    convention: AngleConvention,
    hour12: bool,
    theme: Theme,
    ticks: TickDetector,
    resolver: Box<dyn ZoneResolver>,
    sink: Box<dyn TickSink>,
    sound_enabled: bool,
    tone: ToneSpec,
    warned_zone: Option<String>,
    debug_enabled: bool,
}

impl ClockWidget {
    /// Widget with the production resolver and the terminal bell.
    pub fn from_config(config: &Config, debug_enabled: bool) -> Self {
        Self::with_parts(
            config,
            Box::new(ChronoZoneResolver),
            Box::new(TerminalBell),
            debug_enabled,
        )
    }

    /// Widget with explicit resolver and sink, used by tests and previews.
    pub fn with_parts(
        config: &Config,
        resolver: Box<dyn ZoneResolver>,
        sink: Box<dyn TickSink>,
        debug_enabled: bool,
    ) -> Self {
        let mut widget = Self {
            zones: Vec::new(),
            zone_index: 0,
            convention: AngleConvention::default(),
            hour12: true,
            theme: Theme::default(),
            ticks: TickDetector::new(),
            resolver,
            sink,
            sound_enabled: false,
            tone: ToneSpec::default(),
            warned_zone: None,
            debug_enabled,
        };
        widget.apply_config(config);
        widget
    }

    /// Take settings from a (re)loaded config. Tick history is kept.
    pub fn apply_config(&mut self, config: &Config) {
        self.zones = config.zones();
        let startup = config.timezone();
        self.zone_index = self
            .zones
            .iter()
            .position(|z| z.eq_ignore_ascii_case(startup))
            .unwrap_or(0);
        self.convention = config.angle_convention();
        self.hour12 = config.hour12();
        self.theme = Theme::from_dark_flag(config.dark_mode());
        self.sound_enabled = config.tick_sound();
        self.warned_zone = None;
    }

    pub fn handle(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::ToggleTheme => self.toggle_theme(),
            WidgetCommand::CycleZone => self.cycle_zone(),
            WidgetCommand::ToggleSound => self.sound_enabled = !self.sound_enabled,
            WidgetCommand::Reconfigure(config) => self.apply_config(&config),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Move to the next configured zone, wrapping around.
    pub fn cycle_zone(&mut self) {
        if !self.zones.is_empty() {
            self.zone_index = (self.zone_index + 1) % self.zones.len();
        }
    }

    /// Identifier of the zone currently selected.
    pub fn zone(&self) -> &str {
        self.zones
            .get(self.zone_index)
            .map(String::as_str)
            .unwrap_or(crate::constants::LOCAL_ZONE_SENTINEL)
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Drop sound entirely, e.g. when stdout is not a terminal.
    pub fn mute(&mut self) {
        self.sink = Box::new(SilentSink);
    }

    /// Sample `instant`, detect a tick, play it, and compute the frame.
    pub fn update(&mut self, instant: DateTime<Utc>) -> ClockFrame {
        let zone_id = self.zone().to_string();
        let (sample, zone_valid) = match self.resolver.resolve_time_in_zone(instant, &zone_id) {
            Ok(sample) => {
                self.warned_zone = None;
                (sample, true)
            }
            Err(e) => {
                if self.warned_zone.as_deref() != Some(zone_id.as_str()) {
                    log_pipe!();
                    log_warning!("{e}, showing local time instead");
                    self.warned_zone = Some(zone_id.clone());
                }
                (local_fields(instant), false)
            }
        };

        let ticked = self.ticks.detect(sample.seconds);
        if ticked && self.sound_enabled {
            // Best-effort: a missing sound device never interrupts the clock
            if let Err(e) = self.sink.play(&self.tone)
                && self.debug_enabled
            {
                log_debug!("Skipped tick sound: {e}");
            }
        }

        let digital = if zone_valid {
            format_digital(instant, &sample.zone, self.hour12)
        } else {
            INVALID_TIMEZONE_TEXT.to_string()
        };

        let zone_label = if zone_valid {
            sample.zone.label()
        } else {
            zone_id
        };

        ClockFrame {
            angles: compute_angles(&sample, self.convention),
            sample,
            convention: self.convention,
            digital,
            zone_valid,
            zone_label,
            ticked,
            theme: self.theme,
            sound_enabled: self.sound_enabled,
        }
    }

    /// Zone the logger should stamp simulated times with.
    pub fn display_tz(&self) -> Option<chrono_tz::Tz> {
        match ZoneId::parse(self.zone()) {
            Ok(ZoneId::Named(tz)) => Some(tz),
            _ => None,
        }
    }
}
