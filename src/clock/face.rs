//! Dial geometry: minute markers and hour numerals.

use crate::constants::{
    DEFAULT_FACE_SIZE, MARKER_COUNT, MAJOR_MARKER_EVERY, MINIMUM_NUMERAL_RADIUS,
    NUMERAL_RADIUS_INSET,
};

/// A tick mark on the dial rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub index: u32,
    /// Rotation from 12 o'clock, clockwise
    pub angle_deg: f64,
    /// Hour positions are drawn heavier
    pub major: bool,
}

/// An hour numeral placed around the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeral {
    pub value: u32,
    /// Rotation from the x-axis (3 o'clock), clockwise
    pub angle_deg: f64,
    pub radius: f64,
}

/// The 60 minute markers, every fifth one major.
pub fn markers() -> Vec<Marker> {
    (0..MARKER_COUNT)
        .map(|i| Marker {
            index: i,
            angle_deg: f64::from(i) * 6.0,
            major: i % MAJOR_MARKER_EVERY == 0,
        })
        .collect()
}

/// Radius for numerals on a face of the given pixel dimensions.
///
/// A zero dimension means "unknown" and falls back to the default face size.
pub fn numeral_radius(width: u32, height: u32) -> f64 {
    let w = if width == 0 { DEFAULT_FACE_SIZE } else { width };
    let h = if height == 0 { DEFAULT_FACE_SIZE } else { height };
    let size = w.min(h);
    let inset = (size / 2).saturating_sub(NUMERAL_RADIUS_INSET);
    f64::from(inset.max(MINIMUM_NUMERAL_RADIUS))
}

/// Numerals 1 through 12, with 12 at the top.
pub fn numerals(width: u32, height: u32) -> Vec<Numeral> {
    let radius = numeral_radius(width, height);
    (1..=12)
        .map(|i| Numeral {
            value: i,
            angle_deg: (f64::from(i) / 12.0) * 360.0 - 90.0,
            radius,
        })
        .collect()
}
