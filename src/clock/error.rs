//! Domain errors raised by zone sampling and tick playback.

use thiserror::Error;

/// Errors produced at the clock's I/O boundaries.
///
/// Angle arithmetic itself is total and never produces one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The zone identifier is not known to the time-formatting facility.
    #[error("unsupported timezone '{0}'")]
    UnsupportedTimezone(String),

    /// A formatted time string could not be read back into hour/minute/second fields.
    #[error("could not read time fields from '{formatted}' in zone {zone}")]
    Format { zone: String, formatted: String },

    /// The sound facility is missing or refused to play.
    #[error("tick sound unavailable: {0}")]
    ResourceUnavailable(String),
}
