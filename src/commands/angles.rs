//! `clockhand angles`: print one sample without starting the clock.
//!
//! Useful for scripting and for checking a timezone before adding it to the
//! config. `--at` pins the instant, read as wall-clock time in the selected
//! zone.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::clock::ZoneId;
use crate::clock::zone::ChronoZoneResolver;
use crate::config::Config;
use crate::sound::SilentSink;
use crate::time_source;
use crate::widget::{ClockFrame, ClockWidget};

pub fn run_angles_command(timezone: Option<&str>, at: Option<&str>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(zone) = timezone {
        config.override_timezone(zone)?;
    }

    let instant = resolve_instant(&config, at)?;
    let mut widget = ClockWidget::with_parts(
        &config,
        Box::new(ChronoZoneResolver),
        Box::new(SilentSink),
        false,
    );
    let frame = widget.update(instant);

    log_version!();
    log_frame_details(&frame);
    log_end!();
    Ok(())
}

/// `--at` in the configured zone, or the current time.
fn resolve_instant(config: &Config, at: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(at) = at else {
        return Ok(time_source::now());
    };
    let parsed = match ZoneId::parse(config.timezone()) {
        Ok(ZoneId::Named(tz)) => time_source::parse_datetime_in_tz(at, tz),
        _ => time_source::parse_datetime(at),
    };
    parsed.map_err(|e| anyhow::anyhow!("--at: {e}"))
}

fn log_frame_details(frame: &ClockFrame) {
    log_block_start!("Zone: {}", frame.zone_label);
    if !frame.zone_valid {
        log_indented!("(falling back to local time)");
    }
    log_indented!("Digital: {}", frame.digital);
    log_indented!(
        "Fields: {:02}:{:02}:{:02}",
        frame.sample.hours,
        frame.sample.minutes,
        frame.sample.seconds
    );
    log_block_start!("Hand angles ({}):", frame.convention.as_str());
    log_indented!("Hour:   {:>8.3}°", frame.angles.hour_deg);
    log_indented!("Minute: {:>8.3}°", frame.angles.minute_deg);
    log_indented!("Second: {:>8.3}°", frame.angles.second_deg);
    log_block_start!("Theme: {}", frame.theme.css_class());
}

/// Display detailed help for the angles command
pub fn display_help() {
    log_version!();
    log_block_start!("angles - Print hand angles for a single instant");
    log_block_start!("Usage: clockhand angles [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-t, --timezone <ZONE>  Zone to sample instead of the configured one");
    log_indented!("--at <TIME>            Instant as \"YYYY-MM-DD HH:MM:SS\" in that zone");
    log_indented!("-c, --config <DIR>     Read clockhand.toml from DIR");
    log_block_start!("Examples:");
    log_indented!("clockhand angles");
    log_indented!("clockhand angles -t Asia/Kolkata --at \"2025-01-01 03:30:00\"");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_at_is_read_in_configured_zone() {
        let config = Config {
            timezone: Some("Asia/Tokyo".into()),
            ..Config::default()
        };
        let instant = resolve_instant(&config, Some("2025-01-01 09:00:00")).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_bad_at_reports_flag() {
        let config = Config::default();
        let err = resolve_instant(&config, Some("noon")).unwrap_err();
        assert!(format!("{err}").starts_with("--at:"));
    }
}
