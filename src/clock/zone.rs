//! Timezone-aware sampling.
//!
//! A zone is either the host's local time or a named IANA zone. Named zones are
//! sampled by formatting the instant in that zone and reading the numeric
//! fields back out of the formatted text, so the angle logic only ever sees
//! plain hour/minute/second values.

use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use super::{ClockError, TimeSample};
use crate::constants::LOCAL_ZONE_SENTINEL;

/// A zone the clock can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneId {
    /// The host's local wall clock.
    Local,
    /// A named IANA zone such as `Europe/Paris`.
    Named(Tz),
}

impl ZoneId {
    /// Parse a zone identifier. `"local"` (any case) selects the host zone.
    pub fn parse(id: &str) -> Result<Self, ClockError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ClockError::UnsupportedTimezone(id.to_string()));
        }
        if trimmed.eq_ignore_ascii_case(LOCAL_ZONE_SENTINEL) {
            return Ok(ZoneId::Local);
        }
        Tz::from_str(trimmed)
            .map(ZoneId::Named)
            .map_err(|_| ClockError::UnsupportedTimezone(trimmed.to_string()))
    }

    /// Display label: the IANA name, or `local`.
    pub fn label(&self) -> String {
        match self {
            ZoneId::Local => LOCAL_ZONE_SENTINEL.to_string(),
            ZoneId::Named(tz) => tz.name().to_string(),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Turns an instant plus a zone identifier into a [`TimeSample`].
#[cfg_attr(any(test, feature = "testing-support"), mockall::automock)]
pub trait ZoneResolver: Send {
    fn resolve_time_in_zone(
        &self,
        instant: DateTime<Utc>,
        zone_id: &str,
    ) -> Result<TimeSample, ClockError>;
}

/// Production resolver backed by chrono and the bundled tz database.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoZoneResolver;

impl ZoneResolver for ChronoZoneResolver {
    fn resolve_time_in_zone(
        &self,
        instant: DateTime<Utc>,
        zone_id: &str,
    ) -> Result<TimeSample, ClockError> {
        match ZoneId::parse(zone_id)? {
            ZoneId::Local => Ok(local_fields(instant)),
            zone @ ZoneId::Named(tz) => sample_by_formatting(instant, &tz, zone),
        }
    }
}

/// Read wall-clock fields directly from the host zone.
pub fn local_fields(instant: DateTime<Utc>) -> TimeSample {
    let local = instant.with_timezone(&Local);
    TimeSample::new(local.hour(), local.minute(), local.second(), ZoneId::Local)
}

/// Format `instant` in `tz` as 24-hour `HH:MM:SS` and parse the fields back.
pub fn sample_by_formatting<Z: TimeZone>(
    instant: DateTime<Utc>,
    tz: &Z,
    zone: ZoneId,
) -> Result<TimeSample, ClockError>
where
    Z::Offset: fmt::Display,
{
    let formatted = instant.with_timezone(tz).format("%H:%M:%S").to_string();
    parse_time_fields(&formatted)
        .map(|(h, m, s)| TimeSample::new(h, m, s, zone))
        .ok_or_else(|| ClockError::Format {
            zone: zone.label(),
            formatted,
        })
}

/// Parse `HH:MM:SS` into numeric fields, rejecting anything out of range.
fn parse_time_fields(formatted: &str) -> Option<(u32, u32, u32)> {
    let mut parts = formatted.split(':').map(|p| p.trim().parse::<u32>());
    let hours = parts.next()?.ok()?;
    let minutes = parts.next()?.ok()?;
    let seconds = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    // Some formatters report midnight as 24
    let hours = if hours == 24 { 0 } else { hours };
    (hours < 24 && minutes < 60 && seconds <= 60).then_some((hours, minutes, seconds))
}

/// Digital readout for an instant in a zone.
///
/// With `hour12` the medium time style `h:MM:SS AM` is used, otherwise `HH:MM:SS`.
pub fn format_digital(instant: DateTime<Utc>, zone: &ZoneId, hour12: bool) -> String {
    let pattern = if hour12 { "%-I:%M:%S %p" } else { "%H:%M:%S" };
    match zone {
        ZoneId::Local => instant.with_timezone(&Local).format(pattern).to_string(),
        ZoneId::Named(tz) => instant.with_timezone(tz).format(pattern).to_string(),
    }
}

/// All zone names in the bundled database, optionally filtered (case-insensitive).
pub fn available_zones(filter: Option<&str>) -> Vec<&'static str> {
    let needle = filter.map(|f| f.to_ascii_lowercase());
    chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .filter(|name| match &needle {
            Some(n) => name.to_ascii_lowercase().contains(n),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, s).unwrap()
    }

    #[test]
    fn test_parse_local_sentinel() {
        assert_eq!(ZoneId::parse("local").unwrap(), ZoneId::Local);
        assert_eq!(ZoneId::parse("LOCAL").unwrap(), ZoneId::Local);
    }

    #[test]
    fn test_parse_named_zone() {
        assert_eq!(
            ZoneId::parse("Asia/Tokyo").unwrap(),
            ZoneId::Named(chrono_tz::Asia::Tokyo)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert_eq!(
            ZoneId::parse("Mars/Olympus_Mons"),
            Err(ClockError::UnsupportedTimezone("Mars/Olympus_Mons".into()))
        );
        assert!(matches!(
            ZoneId::parse("  "),
            Err(ClockError::UnsupportedTimezone(_))
        ));
    }

    #[test]
    fn test_named_zone_sampling() {
        let resolver = ChronoZoneResolver;
        // Tokyo is UTC+9 with no DST
        let sample = resolver
            .resolve_time_in_zone(instant(20, 5, 9), "Asia/Tokyo")
            .unwrap();
        assert_eq!((sample.hours, sample.minutes, sample.seconds), (5, 5, 9));
        assert_eq!(sample.zone, ZoneId::Named(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn test_half_hour_offset_zone() {
        let sample = ChronoZoneResolver
            .resolve_time_in_zone(instant(0, 0, 0), "Asia/Kolkata")
            .unwrap();
        assert_eq!((sample.hours, sample.minutes), (5, 30));
    }

    #[test]
    fn test_unsupported_zone_is_reported() {
        let err = ChronoZoneResolver
            .resolve_time_in_zone(instant(0, 0, 0), "Nowhere/Atlantis")
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported timezone 'Nowhere/Atlantis'");
    }

    #[test]
    fn test_local_round_trip_matches_direct_fields() {
        let now = Utc::now();
        let direct = local_fields(now);
        let formatted = sample_by_formatting(now, &Local, ZoneId::Local).unwrap();
        assert_eq!(direct, formatted);
    }

    #[test]
    fn test_parse_time_fields() {
        assert_eq!(parse_time_fields("07:08:09"), Some((7, 8, 9)));
        assert_eq!(parse_time_fields("24:00:00"), Some((0, 0, 0)));
        assert_eq!(parse_time_fields("7:8"), None);
        assert_eq!(parse_time_fields("07:61:00"), None);
        assert_eq!(parse_time_fields("07:08:09:10"), None);
        assert_eq!(parse_time_fields("aa:bb:cc"), None);
    }

    #[test]
    fn test_format_digital_named_zone() {
        let zone = ZoneId::Named(chrono_tz::Tz::UTC);
        assert_eq!(format_digital(instant(15, 4, 5), &zone, true), "3:04:05 PM");
        assert_eq!(format_digital(instant(15, 4, 5), &zone, false), "15:04:05");
        assert_eq!(format_digital(instant(0, 0, 7), &zone, true), "12:00:07 AM");
    }

    #[test]
    fn test_available_zones_filter() {
        let zones = available_zones(Some("tokyo"));
        assert_eq!(zones, vec!["Asia/Tokyo"]);
        assert!(available_zones(None).len() > 300);
    }
}
