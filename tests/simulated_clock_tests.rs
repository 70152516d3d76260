//! Drives a widget from the ticker under a fast-forward simulated clock.
//!
//! The time source is process-global, so this file holds a single test.

use chrono::{TimeZone, Utc};
use clockhand::clock::ChronoZoneResolver;
use clockhand::config::Config;
use clockhand::sound::MockTickSink;
use clockhand::ticker::{TickControl, Ticker};
use clockhand::time_source::{self, SimulatedTimeSource};
use clockhand::widget::ClockWidget;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

#[test]
fn test_five_simulated_seconds_tick_five_times() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 23, 59, 58).unwrap();
    let end = start + chrono::Duration::seconds(5);
    time_source::init_time_source(Arc::new(SimulatedTimeSource::new(start, end, 0.0)));
    clockhand::logger::Log::set_enabled(false);

    let played = Arc::new(AtomicUsize::new(0));
    let played_in_sink = Arc::clone(&played);
    let mut sink = MockTickSink::new();
    sink.expect_play().returning(move |_| {
        played_in_sink.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let config = Config {
        timezone: Some("UTC".into()),
        update_interval_ms: Some(100),
        hour12: Some(false),
        ..Config::default()
    };
    let mut widget = ClockWidget::with_parts(
        &config,
        Box::new(ChronoZoneResolver),
        Box::new(sink),
        false,
    );

    let (tx, rx) = channel();
    let mut handle = Ticker::new(config.update_interval())
        .named("simulated-clock-test")
        .start(move || {
            let frame = widget.update(time_source::now());
            let _ = tx.send((frame.ticked, frame.digital));
            if time_source::simulation_ended() {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        })
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while handle.is_running() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(!handle.is_running(), "ticker did not stop at the end of the simulation");
    handle.stop();

    let frames: Vec<(bool, String)> = rx.try_iter().collect();
    assert_eq!(frames.len(), 51);
    assert_eq!(handle.invocations(), 51);
    assert_eq!(frames.iter().filter(|(ticked, _)| *ticked).count(), 5);
    assert_eq!(played.load(Ordering::SeqCst), 5);

    // Crossed midnight on the way
    assert_eq!(frames.first().unwrap().1, "23:59:58");
    assert_eq!(frames.last().unwrap().1, "00:00:03");
}
