use chrono::{TimeZone, Utc};
use clockhand::clock::zone::local_fields;
use clockhand::clock::{
    AngleConvention, ChronoZoneResolver, TickDetector, TimeSample, ZoneResolver, compute_angles,
};
use proptest::prelude::*;

fn convention_strategy() -> impl Strategy<Value = AngleConvention> {
    prop_oneof![
        Just(AngleConvention::TwelveAtTop),
        Just(AngleConvention::ZeroAtRight),
        Just(AngleConvention::ZeroAtLeft),
    ]
}

/// Property tests for the angle formulas
#[cfg(test)]
mod angle_tests {
    use super::*;

    proptest! {
        /// Angles stay inside one turn (plus the convention offset)
        #[test]
        fn test_angles_bounded(
            h in 0u32..24,
            m in 0u32..60,
            s in 0u32..60,
            convention in convention_strategy()
        ) {
            let angles = compute_angles(&TimeSample::local(h, m, s), convention);
            let offset = convention.offset_deg();
            for deg in [angles.hour_deg, angles.minute_deg, angles.second_deg] {
                prop_assert!(deg.is_finite());
                prop_assert!(deg >= offset && deg < 360.0 + offset);
            }
        }

        /// The hour hand reads the same in the morning and the evening
        #[test]
        fn test_hour_hand_folds_at_twelve(h in 0u32..12, m in 0u32..60, s in 0u32..60) {
            let am = compute_angles(&TimeSample::local(h, m, s), AngleConvention::TwelveAtTop);
            let pm = compute_angles(&TimeSample::local(h + 12, m, s), AngleConvention::TwelveAtTop);
            prop_assert_eq!(am, pm);
        }

        /// One second advances the second hand by 6°, the minute hand by 0.1°
        /// and the hour hand by 1/120°, except across a wrap
        #[test]
        fn test_one_second_step(h in 0u32..24, m in 0u32..60, s in 0u32..59) {
            let before = compute_angles(&TimeSample::local(h, m, s), AngleConvention::TwelveAtTop);
            let after = compute_angles(&TimeSample::local(h, m, s + 1), AngleConvention::TwelveAtTop);
            prop_assert!((after.second_deg - before.second_deg - 6.0).abs() < 1e-9);
            prop_assert!((after.minute_deg - before.minute_deg - 0.1).abs() < 1e-9);
            prop_assert!((after.hour_deg - before.hour_deg - 1.0 / 120.0).abs() < 1e-9);
        }

        /// Conventions only shift every hand by the same constant
        #[test]
        fn test_convention_is_pure_offset(
            h in 0u32..24,
            m in 0u32..60,
            s in 0u32..60,
            convention in convention_strategy()
        ) {
            let sample = TimeSample::local(h, m, s);
            let base = compute_angles(&sample, AngleConvention::TwelveAtTop);
            let shifted = compute_angles(&sample, convention);
            let offset = convention.offset_deg();
            prop_assert!((shifted.hour_deg - base.hour_deg - offset).abs() < 1e-9);
            prop_assert!((shifted.minute_deg - base.minute_deg - offset).abs() < 1e-9);
            prop_assert!((shifted.second_deg - base.second_deg - offset).abs() < 1e-9);
        }
    }
}

/// Property tests for tick detection
#[cfg(test)]
mod tick_tests {
    use super::*;

    proptest! {
        /// Number of ticks equals the number of adjacent pairs that differ
        #[test]
        fn test_tick_count_matches_changes(seconds in prop::collection::vec(0u32..60, 1..200)) {
            let mut detector = TickDetector::new();
            let ticks = seconds.iter().filter(|s| detector.detect(**s)).count();
            let changes = seconds.windows(2).filter(|w| w[0] != w[1]).count();
            prop_assert_eq!(ticks, changes);
            prop_assert_eq!(detector.previous(), seconds.last().copied());
        }

        /// Repeating the same value never ticks
        #[test]
        fn test_repeats_never_tick(s in 0u32..60, repeats in 1usize..20) {
            let mut detector = TickDetector::new();
            prop_assert!(!detector.detect(s));
            for _ in 0..repeats {
                prop_assert!(!detector.detect(s));
            }
        }
    }
}

/// Property tests for zone sampling
#[cfg(test)]
mod zone_tests {
    use super::*;

    fn instant_strategy() -> impl Strategy<Value = i64> {
        // 2000-01-01 .. 2040-01-01
        946_684_800i64..2_208_988_800i64
    }

    proptest! {
        /// UTC sampling agrees with the instant's own fields
        #[test]
        fn test_utc_matches_instant(ts in instant_strategy()) {
            let instant = Utc.timestamp_opt(ts, 0).unwrap();
            let sample = ChronoZoneResolver.resolve_time_in_zone(instant, "UTC").unwrap();
            let expected = instant.format("%H:%M:%S").to_string();
            prop_assert_eq!(
                format!("{:02}:{:02}:{:02}", sample.hours, sample.minutes, sample.seconds),
                expected
            );
        }

        /// Named zones always produce in-range fields
        #[test]
        fn test_named_zone_fields_in_range(
            ts in instant_strategy(),
            zone in prop::sample::select(vec![
                "America/New_York",
                "Europe/London",
                "Asia/Kolkata",
                "Asia/Kathmandu",
                "Australia/Lord_Howe",
                "Pacific/Chatham",
            ])
        ) {
            let instant = Utc.timestamp_opt(ts, 0).unwrap();
            let sample = ChronoZoneResolver.resolve_time_in_zone(instant, zone).unwrap();
            prop_assert!(sample.hours < 24);
            prop_assert!(sample.minutes < 60);
            prop_assert!(sample.seconds < 60);
            // Zone offsets are whole minutes, so seconds never change
            prop_assert_eq!(sample.seconds, instant.format("%S").to_string().parse::<u32>().unwrap());
        }

        /// "local" goes through the host clock
        #[test]
        fn test_local_matches_local_fields(ts in instant_strategy()) {
            let instant = Utc.timestamp_opt(ts, 0).unwrap();
            let sample = ChronoZoneResolver.resolve_time_in_zone(instant, "local").unwrap();
            prop_assert_eq!(sample, local_fields(instant));
        }
    }
}
