//! Tick sound synthesis and playback sinks.
//!
//! The tick is a short sine blip whose gain decays exponentially. Playback is
//! best-effort: a sink that cannot play reports `ResourceUnavailable` and the
//! caller simply moves on.

use std::io::Write;

use crate::clock::ClockError;
use crate::constants::{
    TICK_DURATION_MS, TICK_END_GAIN, TICK_FREQUENCY_HZ, TICK_START_GAIN,
};

/// Parameters of the synthesized tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f64,
    pub start_gain: f64,
    pub end_gain: f64,
    pub duration_ms: u64,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: TICK_FREQUENCY_HZ,
            start_gain: TICK_START_GAIN,
            end_gain: TICK_END_GAIN,
            duration_ms: TICK_DURATION_MS,
        }
    }
}

impl ToneSpec {
    /// Gain at time `t` seconds into the tone (exponential ramp).
    pub fn gain_at(&self, t: f64) -> f64 {
        let duration = self.duration_ms as f64 / 1000.0;
        if duration <= 0.0 {
            return self.end_gain;
        }
        let progress = (t / duration).clamp(0.0, 1.0);
        self.start_gain * (self.end_gain / self.start_gain).powf(progress)
    }

    /// Render the tone as mono PCM samples in [-1, 1].
    pub fn synthesize(&self, sample_rate: u32) -> Vec<f32> {
        let count = (u64::from(sample_rate) * self.duration_ms / 1000) as usize;
        let rate = f64::from(sample_rate);
        (0..count)
            .map(|n| {
                let t = n as f64 / rate;
                let phase = 2.0 * std::f64::consts::PI * self.frequency_hz * t;
                (phase.sin() * self.gain_at(t)) as f32
            })
            .collect()
    }
}

/// Somewhere a tick can be played.
#[cfg_attr(any(test, feature = "testing-support"), mockall::automock)]
pub trait TickSink: Send {
    fn play(&mut self, tone: &ToneSpec) -> Result<(), ClockError>;
}

/// Rings the terminal bell, the only sound a bare terminal offers.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TickSink for TerminalBell {
    fn play(&mut self, _tone: &ToneSpec) -> Result<(), ClockError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|e| ClockError::ResourceUnavailable(e.to_string()))
    }
}

/// Used when sound is switched off.
#[derive(Debug, Default)]
pub struct SilentSink;

impl TickSink for SilentSink {
    fn play(&mut self, _tone: &ToneSpec) -> Result<(), ClockError> {
        Err(ClockError::ResourceUnavailable("tick sound disabled".to_string()))
    }
}
