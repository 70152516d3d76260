//! `clockhand simulate`: run the clock against accelerated time.
//!
//! A simulated time source replaces the wall clock before anything else reads
//! it, then the normal clock runs on top of it. The clock stops by itself once
//! simulated time reaches the end.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;

use crate::ClockApp;
use crate::clock::ZoneId;
use crate::logger::Log;
use crate::time_source::{self, SimulatedTimeSource};

/// What `clockhand simulate` was asked to do.
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub start_time: String,
    pub end_time: String,
    /// Simulated seconds per real second, 0 for fast-forward
    pub multiplier: f64,
    pub timezone: Option<String>,
    pub log_to_file: bool,
    pub debug_enabled: bool,
}

pub fn run_simulate_command(options: SimulateOptions) -> Result<()> {
    let zone = match options.timezone.as_deref() {
        Some(name) => ZoneId::parse(name).map_err(|e| anyhow::anyhow!("--timezone: {e}"))?,
        None => ZoneId::Local,
    };

    let start = parse_in_zone(&options.start_time, zone)
        .map_err(|e| anyhow::anyhow!("Invalid start time: {e}"))?;
    let end = parse_in_zone(&options.end_time, zone)
        .map_err(|e| anyhow::anyhow!("Invalid end time: {e}"))?;
    if end <= start {
        anyhow::bail!("End time must be after start time");
    }

    // Redirect before the first line so the file has the whole run
    let _log_guard = if options.log_to_file {
        let file_name = format!(
            "clockhand-simulation-{}.log",
            Local::now().format("%Y%m%d-%H%M%S")
        );
        let guard = Log::start_file_logging(file_name.clone())?;
        log_warning_standalone!("Writing simulation output to {}", file_name);
        Some(guard)
    } else {
        None
    };

    let source = SimulatedTimeSource::new(start, end, options.multiplier);
    let multiplier = source.multiplier();
    time_source::init_time_source(Arc::new(source));
    if let ZoneId::Named(tz) = zone {
        Log::set_display_zone(Some(tz));
    }

    log_version!();
    log_block_start!("Simulation Mode");
    log_decorated!(
        "Simulating from {} to {} ({})",
        options.start_time.trim(),
        options.end_time.trim(),
        zone
    );

    let duration = end.signed_duration_since(start);
    log_indented!(
        "Total simulated time: {} hours {} minutes {} seconds",
        duration.num_hours(),
        duration.num_minutes() % 60,
        duration.num_seconds() % 60
    );
    if multiplier == 0.0 {
        log_indented!("Time acceleration: fast-forward");
    } else {
        log_indented!(
            "Time acceleration: {}x (will complete in ~{:.1} seconds)",
            multiplier,
            duration.num_seconds() as f64 / multiplier
        );
    }
    if options.debug_enabled {
        log_pipe!();
        log_debug!("Simulated time source initialized");
    }

    ClockApp::new(options.debug_enabled)
        .with_timezone(options.timezone)
        .without_headers()
        .run()
}

fn parse_in_zone(text: &str, zone: ZoneId) -> Result<DateTime<Utc>, String> {
    match zone {
        ZoneId::Local => time_source::parse_datetime(text),
        ZoneId::Named(tz) => time_source::parse_datetime_in_tz(text, tz),
    }
}

/// Display detailed help for the simulate command
pub fn display_help() {
    log_version!();
    log_block_start!("simulate - Run the clock with simulated time");
    log_block_start!("Usage: clockhand simulate <START> <END> [MULTIPLIER] [OPTIONS]");
    log_block_start!("Arguments:");
    log_indented!("<START>       Start time, \"YYYY-MM-DD HH:MM:SS\"");
    log_indented!("<END>         End time, same format, after START");
    log_indented!("[MULTIPLIER]  Simulated seconds per real second (default 60, 0 = fast-forward)");
    log_block_start!("Options:");
    log_indented!("-t, --timezone <ZONE>  Read START and END in ZONE and display it");
    log_indented!("-l, --log              Write output to clockhand-simulation-<date>.log");
    log_indented!("-d, --debug            Show debug output");
    log_block_start!("Examples:");
    log_indented!("# Watch midnight roll over in Tokyo at 60x");
    log_indented!("clockhand simulate \"2025-01-01 23:59:00\" \"2025-01-02 00:01:00\" -t Asia/Tokyo");
    log_pipe!();
    log_indented!("# Run an hour as fast as possible, logging to a file");
    log_indented!("clockhand simulate \"2025-01-01 10:00:00\" \"2025-01-01 11:00:00\" 0 --log");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_in_named_zone() {
        let tz = ZoneId::parse("Asia/Kolkata").unwrap();
        let instant = parse_in_zone("2025-01-01 05:30:00", tz).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = run_simulate_command(SimulateOptions {
            start_time: "2025-01-01 12:00:00".into(),
            end_time: "2025-01-01 11:00:00".into(),
            multiplier: 0.0,
            timezone: Some("UTC".into()),
            log_to_file: false,
            debug_enabled: false,
        })
        .unwrap_err();
        assert!(format!("{err}").contains("End time must be after start time"));
    }

    #[test]
    fn test_bad_timezone_rejected() {
        let err = run_simulate_command(SimulateOptions {
            start_time: "2025-01-01 10:00:00".into(),
            end_time: "2025-01-01 11:00:00".into(),
            multiplier: 0.0,
            timezone: Some("Nowhere/Special".into()),
            log_to_file: false,
            debug_enabled: false,
        })
        .unwrap_err();
        assert!(format!("{err}").contains("unsupported timezone"));
    }
}
