//! Hand angle computation and tick detection.
//!
//! This is the logical core of the clock. A [`TimeSample`] is a single reading of
//! hour, minute and second fields in some zone; [`compute_angles`] turns it into
//! rotation angles for the three hands, and [`TickDetector`] reports when the
//! seconds field has moved on since the previous sample.
//!
//! Nothing in here depends on a particular time library: zone resolution lives
//! behind [`zone::ZoneResolver`], and the angle functions only see integers.

pub mod error;
pub mod face;
pub mod zone;

pub use error::ClockError;
pub use zone::{ChronoZoneResolver, ZoneId, ZoneResolver};

/// One reading of a wall clock, produced fresh on every sampling tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSample {
    /// Hour of day, 0-23
    pub hours: u32,
    /// Minute of hour, 0-59
    pub minutes: u32,
    /// Second of minute, 0-59
    pub seconds: u32,
    /// Zone the fields were read in
    pub zone: ZoneId,
}

impl TimeSample {
    /// Build a sample, wrapping out-of-range fields into their cycles.
    ///
    /// Leap seconds reported as 60 fold back onto 59 so the second hand never
    /// jumps past the 12.
    pub fn new(hours: u32, minutes: u32, seconds: u32, zone: ZoneId) -> Self {
        Self {
            hours: hours % 24,
            minutes: minutes % 60,
            seconds: seconds.min(59),
            zone,
        }
    }

    /// Sample in the local zone, mostly for tests and previews.
    pub fn local(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self::new(hours, minutes, seconds, ZoneId::Local)
    }
}

/// Rotation for each hand, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour_deg: f64,
    pub minute_deg: f64,
    pub second_deg: f64,
}

/// Zero-reference for the rotation surface.
///
/// The renderer draws hands with 0 degrees at 12 o'clock. Surfaces whose zero
/// points along the x-axis need the -90 (or, with a mirrored setup, +90) shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleConvention {
    /// 0 degrees at 12 o'clock, growing clockwise.
    #[default]
    TwelveAtTop,
    /// 0 degrees at 3 o'clock.
    ZeroAtRight,
    /// 0 degrees at 9 o'clock.
    ZeroAtLeft,
}

impl AngleConvention {
    /// Constant added to every hand angle.
    pub fn offset_deg(self) -> f64 {
        match self {
            AngleConvention::TwelveAtTop => 0.0,
            AngleConvention::ZeroAtRight => -90.0,
            AngleConvention::ZeroAtLeft => 90.0,
        }
    }

    /// Parse the config spelling of a convention.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "twelve_at_top" => Some(AngleConvention::TwelveAtTop),
            "zero_at_right" => Some(AngleConvention::ZeroAtRight),
            "zero_at_left" => Some(AngleConvention::ZeroAtLeft),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AngleConvention::TwelveAtTop => "twelve_at_top",
            AngleConvention::ZeroAtRight => "zero_at_right",
            AngleConvention::ZeroAtLeft => "zero_at_left",
        }
    }
}

/// Compute hand rotation angles for a sample.
///
/// The minute hand creeps with the seconds and the hour hand creeps with both
/// minutes and seconds, so all three hands move continuously.
pub fn compute_angles(sample: &TimeSample, convention: AngleConvention) -> HandAngles {
    let h = f64::from(sample.hours % 12);
    let m = f64::from(sample.minutes);
    let s = f64::from(sample.seconds);
    let offset = convention.offset_deg();

    HandAngles {
        second_deg: (s / 60.0) * 360.0 + offset,
        minute_deg: (m / 60.0) * 360.0 + (s / 60.0) * 6.0 + offset,
        hour_deg: (h / 12.0) * 360.0 + (m / 60.0) * 30.0 + (s / 3600.0) * 30.0 + offset,
    }
}

/// Remembers the last observed seconds value and reports changes.
#[derive(Debug, Clone, Default)]
pub struct TickDetector {
    previous: Option<u32>,
}

impl TickDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `seconds` differs from the previous sample.
    ///
    /// The first call never ticks. The stored value is replaced on every call.
    pub fn detect(&mut self, seconds: u32) -> bool {
        let ticked = matches!(self.previous, Some(prev) if prev != seconds);
        self.previous = Some(seconds);
        ticked
    }

    /// Last seconds value seen, if any.
    pub fn previous(&self) -> Option<u32> {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_three_oclock_angles() {
        let angles = compute_angles(&TimeSample::local(3, 0, 0), AngleConvention::TwelveAtTop);
        assert!(approx(angles.hour_deg, 90.0));
        assert!(approx(angles.minute_deg, 0.0));
        assert!(approx(angles.second_deg, 0.0));
    }

    #[test]
    fn test_half_past_midnight_and_noon() {
        for hour in [0, 12] {
            let angles =
                compute_angles(&TimeSample::local(hour, 30, 0), AngleConvention::TwelveAtTop);
            assert!(approx(angles.hour_deg, 15.0), "hour {hour}: {angles:?}");
            assert!(approx(angles.minute_deg, 180.0));
        }
    }

    #[test]
    fn test_afternoon_hours_fold_onto_dial() {
        let morning = compute_angles(&TimeSample::local(4, 10, 20), AngleConvention::TwelveAtTop);
        let afternoon =
            compute_angles(&TimeSample::local(16, 10, 20), AngleConvention::TwelveAtTop);
        assert_eq!(morning, afternoon);
    }

    #[test]
    fn test_conventions_shift_every_hand_equally() {
        let sample = TimeSample::local(7, 42, 13);
        let top = compute_angles(&sample, AngleConvention::TwelveAtTop);
        let right = compute_angles(&sample, AngleConvention::ZeroAtRight);
        let left = compute_angles(&sample, AngleConvention::ZeroAtLeft);

        assert!(approx(right.hour_deg, top.hour_deg - 90.0));
        assert!(approx(right.minute_deg, top.minute_deg - 90.0));
        assert!(approx(right.second_deg, top.second_deg - 90.0));
        assert!(approx(left.hour_deg, top.hour_deg + 90.0));
        assert!(approx(left.second_deg, top.second_deg + 90.0));
    }

    #[test]
    fn test_minute_hand_creeps_with_seconds() {
        let angles = compute_angles(&TimeSample::local(0, 15, 30), AngleConvention::TwelveAtTop);
        assert!(approx(angles.minute_deg, 93.0));
        assert!(approx(angles.second_deg, 180.0));
    }

    #[test]
    fn test_hour_hand_creeps_with_seconds() {
        let angles = compute_angles(&TimeSample::local(1, 0, 36), AngleConvention::TwelveAtTop);
        assert!(approx(angles.hour_deg, 30.3));
    }

    #[test]
    fn test_sample_wraps_out_of_range_fields() {
        let sample = TimeSample::local(25, 61, 60);
        assert_eq!(sample.hours, 1);
        assert_eq!(sample.minutes, 1);
        assert_eq!(sample.seconds, 59);
    }

    #[test]
    fn test_tick_detector_first_call_never_ticks() {
        let mut detector = TickDetector::new();
        assert!(!detector.detect(42));
        assert_eq!(detector.previous(), Some(42));
    }

    #[test]
    fn test_tick_detector_sequence() {
        let mut detector = TickDetector::new();
        let fired: Vec<bool> = [5, 5, 6, 6, 6, 7, 0]
            .into_iter()
            .map(|s| detector.detect(s))
            .collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, true]);
    }

    #[test]
    fn test_convention_parse_round_trip() {
        for convention in [
            AngleConvention::TwelveAtTop,
            AngleConvention::ZeroAtRight,
            AngleConvention::ZeroAtLeft,
        ] {
            assert_eq!(AngleConvention::parse(convention.as_str()), Some(convention));
        }
        assert_eq!(AngleConvention::parse("sideways"), None);
    }
}
