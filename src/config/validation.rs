//! Range and format checks for a loaded [`Config`].

use anyhow::Result;

use super::Config;
use crate::clock::{AngleConvention, ZoneId};
use crate::constants::*;

/// Reject values the clock cannot run with.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(zone) = &config.timezone {
        validate_zone(zone, "timezone")?;
    }

    if let Some(zones) = &config.zones {
        for zone in zones {
            validate_zone(zone, "zones")?;
        }
    }

    if let Some(interval) = config.update_interval_ms
        && !(MINIMUM_UPDATE_INTERVAL_MS..=MAXIMUM_UPDATE_INTERVAL_MS).contains(&interval)
    {
        anyhow::bail!(
            "update_interval_ms ({}) must be between {} and {} milliseconds",
            interval,
            MINIMUM_UPDATE_INTERVAL_MS,
            MAXIMUM_UPDATE_INTERVAL_MS
        );
    }

    if let Some(convention) = &config.angle_convention
        && AngleConvention::parse(convention).is_none()
    {
        anyhow::bail!(
            "angle_convention '{}' must be one of: twelve_at_top, zero_at_right, zero_at_left",
            convention
        );
    }

    if let Some(size) = config.face_size
        && !(MINIMUM_FACE_SIZE..=MAXIMUM_FACE_SIZE).contains(&size)
    {
        anyhow::bail!(
            "face_size ({}) must be between {} and {}",
            size,
            MINIMUM_FACE_SIZE,
            MAXIMUM_FACE_SIZE
        );
    }

    Ok(())
}

fn validate_zone(zone: &str, field: &str) -> Result<()> {
    ZoneId::parse(zone).map_err(|e| {
        anyhow::anyhow!("{field}: {e}. Run 'clockhand zones' to list valid names")
    })?;
    Ok(())
}
