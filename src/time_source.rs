//! Where "now" comes from.
//!
//! The clock normally reads the system clock, but `clockhand simulate` swaps in
//! a [`SimulatedTimeSource`] that runs faster than real time so hand movement,
//! zone changes and tick timing can be watched across hours in seconds.
//!
//! The active source is process-global and set once at startup.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use crate::constants::{DEFAULT_SIMULATION_MULTIPLIER, MINIMUM_SIMULATION_MULTIPLIER};

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Abstraction over the current instant and waiting.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Wait for `duration` of this source's time
    fn sleep(&self, duration: StdDuration);

    fn is_simulated(&self) -> bool;

    /// Simulated sources stop at their end time; real time never ends
    fn is_ended(&self) -> bool {
        false
    }
}

/// The system clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Accelerated clock running from `start` to `end`.
///
/// A multiplier of 60 means one simulated minute per real second. A multiplier
/// of 0 fast-forwards: every sleep jumps time forward immediately.
pub struct SimulatedTimeSource {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    multiplier: f64,
    elapsed: Mutex<StdDuration>,
}

impl SimulatedTimeSource {
    /// A negative or non-finite multiplier falls back to the default; a
    /// positive one below the minimum is raised to it.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, multiplier: f64) -> Self {
        let multiplier = if multiplier < 0.0 || !multiplier.is_finite() {
            DEFAULT_SIMULATION_MULTIPLIER
        } else if multiplier > 0.0 {
            multiplier.max(MINIMUM_SIMULATION_MULTIPLIER)
        } else {
            multiplier
        };
        Self {
            start,
            end,
            multiplier,
            elapsed: Mutex::new(StdDuration::ZERO),
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    fn elapsed(&self) -> StdDuration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn current(&self) -> DateTime<Utc> {
        let elapsed = ChronoDuration::from_std(self.elapsed()).unwrap_or(ChronoDuration::MAX);
        self.start
            .checked_add_signed(elapsed)
            .map_or(self.end, |t| t.min(self.end))
    }

    /// Simulated time left before the end, zero once reached.
    fn remaining(&self) -> StdDuration {
        (self.end - self.current()).to_std().unwrap_or(StdDuration::ZERO)
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.current()
    }

    fn sleep(&self, duration: StdDuration) {
        let step = duration.min(self.remaining());
        if step.is_zero() {
            return;
        }

        if self.multiplier == 0.0 {
            // Yield briefly so the render thread and logger keep up
            std::thread::sleep(StdDuration::from_millis(1));
        } else {
            let wait = StdDuration::try_from_secs_f64(step.as_secs_f64() / self.multiplier)
                .unwrap_or(step);
            std::thread::sleep(wait);
        }

        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += step;
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        self.current() >= self.end
    }
}

/// Install the global time source. Later calls are ignored.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Whether a source has been installed (without installing the default)
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

pub fn now() -> DateTime<Utc> {
    source().now()
}

pub fn sleep(duration: StdDuration) {
    source().sleep(duration)
}

pub fn is_simulated() -> bool {
    source().is_simulated()
}

pub fn simulation_ended() -> bool {
    source().is_ended()
}

/// Parse `YYYY-MM-DD HH:MM:SS` as a local wall-clock time.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}

/// Parse `YYYY-MM-DD HH:MM:SS` as a wall-clock time in `tz`.
pub fn parse_datetime_in_tz(s: &str, tz: chrono_tz::Tz) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    tz.from_local_datetime(&naive)
        .single()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous or invalid time in timezone {tz}"))
}
