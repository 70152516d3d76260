//! `clockhand zones [FILTER]`: list timezone names the clock understands.

use anyhow::Result;

use crate::clock::zone::available_zones;
use crate::constants::LOCAL_ZONE_SENTINEL;

pub fn run_zones_command(filter: Option<&str>) -> Result<()> {
    let zones = available_zones(filter);

    log_version!();
    match filter {
        Some(f) => log_block_start!("Timezones matching '{}':", f),
        None => {
            log_block_start!("Available timezones:");
            log_indented!("{LOCAL_ZONE_SENTINEL}  (host local time)");
        }
    }

    if zones.is_empty() {
        log_pipe!();
        log_warning!("No timezone names contain '{}'", filter.unwrap_or_default());
    }
    for zone in &zones {
        log_indented!("{zone}");
    }

    log_pipe!();
    log_info!("{} zone(s) listed", zones.len());
    log_end!();
    Ok(())
}

/// Display detailed help for the zones command
pub fn display_help() {
    log_version!();
    log_block_start!("zones - List timezone names");
    log_block_start!("Usage: clockhand zones [FILTER]");
    log_block_start!("Arguments:");
    log_indented!("[FILTER]  Case-insensitive substring to match, e.g. 'europe'");
    log_block_start!("Description:");
    log_indented!("Names printed here are valid for --timezone and the");
    log_indented!("'timezone' and 'zones' config fields. Use \"local\" for host time.");
    log_end!();
}
