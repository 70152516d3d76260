//! Application-wide constants and defaults.
//!
//! Grouped by concern. Values that users can change live in the config
//! defaults section; the rest are fixed properties of the clock.

// # Sampling

/// Default refresh cadence of the periodic clock task
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;
pub const MINIMUM_UPDATE_INTERVAL_MS: u64 = 10;
pub const MAXIMUM_UPDATE_INTERVAL_MS: u64 = 1000;

/// Identifier meaning "the host's local zone"
pub const LOCAL_ZONE_SENTINEL: &str = "local";

// # Dial geometry

pub const MARKER_COUNT: u32 = 60;
pub const MAJOR_MARKER_EVERY: u32 = 5;

/// Face size assumed when the surface reports no dimensions
pub const DEFAULT_FACE_SIZE: u32 = 380;
pub const MINIMUM_FACE_SIZE: u32 = 120;
pub const MAXIMUM_FACE_SIZE: u32 = 2000;
pub const MINIMUM_NUMERAL_RADIUS: u32 = 120;
pub const NUMERAL_RADIUS_INSET: u32 = 60;

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT_RATIO: f64 = 2.0;

/// Hand lengths as a fraction of the dial radius
pub const HOUR_HAND_LENGTH: f64 = 0.5;
pub const MINUTE_HAND_LENGTH: f64 = 0.75;
pub const SECOND_HAND_LENGTH: f64 = 0.9;

// # Tick sound

pub const TICK_FREQUENCY_HZ: f64 = 800.0;
pub const TICK_START_GAIN: f64 = 0.1;
pub const TICK_END_GAIN: f64 = 0.001;
pub const TICK_DURATION_MS: u64 = 50;

// # Config defaults

pub const DEFAULT_TIMEZONE: &str = LOCAL_ZONE_SENTINEL;
pub const DEFAULT_ZONES: &[&str] = &[
    LOCAL_ZONE_SENTINEL,
    "UTC",
    "America/New_York",
    "Europe/London",
    "Asia/Tokyo",
];
pub const DEFAULT_DARK_MODE: bool = false;
pub const DEFAULT_TICK_SOUND: bool = true;
pub const DEFAULT_HOUR12: bool = true;
pub const DEFAULT_ANGLE_CONVENTION: &str = "twelve_at_top";

pub const CONFIG_FILE_NAME: &str = "clockhand.toml";
pub const CONFIG_DIR_NAME: &str = "clockhand";

// # Simulation

/// Default time acceleration for `simulate` (simulated seconds per real second)
pub const DEFAULT_SIMULATION_MULTIPLIER: f64 = 60.0;
/// Slowest accepted simulation speed; 0 (fast-forward) is allowed separately
pub const MINIMUM_SIMULATION_MULTIPLIER: f64 = 0.01;

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
