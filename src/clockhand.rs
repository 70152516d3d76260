//! Application runner for the interactive clock.
//!
//! `ClockApp` acquires resources in order (signal handlers, configuration,
//! terminal), starts the periodic clock task and then sits in the input loop
//! until a quit key, a shutdown signal, or the end of a simulation.
//!
//! ```no_run
//! use clockhand::ClockApp;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Normal startup
//! ClockApp::new(false).run()?;
//!
//! // Simulation: the caller prints its own header
//! ClockApp::new(false)
//!     .with_timezone(Some("Asia/Tokyo".to_string()))
//!     .without_headers()
//!     .run()?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::sync::atomic::Ordering;
use std::sync::mpsc::{Sender, channel};
use std::time::Duration;

use crate::config::Config;
use crate::logger::Log;
use crate::render;
use crate::signals::{SignalMessage, SignalState, setup_signal_handler};
use crate::terminal::{KeyAction, TerminalGuard, poll_key};
use crate::ticker::{TickControl, Ticker, TickerHandle};
use crate::time_source;
use crate::widget::{ClockFrame, ClockWidget, WidgetCommand};

/// How long the input loop waits for a key before checking signals again
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ClockApp {
    debug_enabled: bool,
    timezone: Option<String>,
    show_headers: bool,
}

impl ClockApp {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            timezone: None,
            show_headers: true,
        }
    }

    /// Start in this zone regardless of the config file.
    pub fn with_timezone(mut self, timezone: Option<String>) -> Self {
        self.timezone = timezone;
        self
    }

    /// Skip the version header (the caller already printed one)
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();
            if self.debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled");
            }
        }

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        let config = self.load_config()?;
        config.log_config();

        let mut widget = ClockWidget::from_config(&config, self.debug_enabled);
        Log::set_display_zone(widget.display_tz());

        let terminal = TerminalGuard::new().context("failed to initialize terminal features")?;
        let interactive = terminal.is_active();
        if !interactive {
            widget.mute();
            log_block_start!("No terminal detected, printing one line per second");
        }

        // Keep the dial clean unless output is going to a file
        let console_mute = ConsoleMute::engage(interactive && !Log::is_file_logging());

        let (command_tx, command_rx) = channel::<WidgetCommand>();
        let mut face_size = config.face_size();
        let mut ticker = Ticker::new(config.update_interval()).start(move || {
            while let Ok(command) = command_rx.try_recv() {
                if let WidgetCommand::Reconfigure(new_config) = &command {
                    face_size = new_config.face_size();
                }
                widget.handle(command);
                Log::set_display_zone(widget.display_tz());
            }

            let frame = widget.update(time_source::now());
            if interactive {
                present(&frame, face_size);
            } else if frame.ticked {
                log_frame(&frame);
            }

            if time_source::simulation_ended() {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        })?;

        let result = self.input_loop(&signal_state, &command_tx, &ticker, interactive);

        ticker.stop();
        drop(terminal);
        drop(console_mute);

        result?;
        if ticker.panicked() {
            anyhow::bail!("clock task stopped unexpectedly");
        }
        if time_source::simulation_ended() {
            log_block_start!("Simulation complete");
        }
        log_block_start!("Clock stopped after {} refreshes", ticker.invocations());
        log_end!();
        Ok(())
    }

    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(zone) = &self.timezone {
            config.override_timezone(zone)?;
        }
        Ok(config)
    }

    fn input_loop(
        &self,
        signal_state: &SignalState,
        commands: &Sender<WidgetCommand>,
        ticker: &TickerHandle,
        interactive: bool,
    ) -> Result<()> {
        while signal_state.running.load(Ordering::SeqCst) && ticker.is_running() {
            while let Ok(message) = signal_state.signal_receiver.try_recv() {
                match signal_command(message, || self.load_config()) {
                    SignalOutcome::Shutdown => return Ok(()),
                    SignalOutcome::Send(command) => {
                        let _ = commands.send(command);
                    }
                    SignalOutcome::Ignore => {}
                }
            }

            if !interactive {
                std::thread::sleep(INPUT_POLL_INTERVAL);
                continue;
            }

            let command = match poll_key(INPUT_POLL_INTERVAL)? {
                Some(KeyAction::Quit) => return Ok(()),
                Some(KeyAction::ToggleTheme) => WidgetCommand::ToggleTheme,
                Some(KeyAction::CycleZone) => WidgetCommand::CycleZone,
                Some(KeyAction::ToggleSound) => WidgetCommand::ToggleSound,
                None => continue,
            };
            let _ = commands.send(command);
        }
        Ok(())
    }
}

/// What the input loop does with one signal.
#[derive(Debug, PartialEq)]
enum SignalOutcome {
    Shutdown,
    Send(WidgetCommand),
    /// Nothing to forward, e.g. a reload that failed validation
    Ignore,
}

/// Turn a signal into a widget command. `reload` is only called for `Reload`.
fn signal_command<F>(message: SignalMessage, reload: F) -> SignalOutcome
where
    F: FnOnce() -> Result<Config>,
{
    match message {
        SignalMessage::Shutdown => SignalOutcome::Shutdown,
        SignalMessage::ToggleTheme => SignalOutcome::Send(WidgetCommand::ToggleTheme),
        SignalMessage::Reload => match reload() {
            Ok(config) => {
                log_block_start!("Configuration reloaded");
                SignalOutcome::Send(WidgetCommand::Reconfigure(config))
            }
            Err(e) => {
                log_pipe!();
                log_warning!("Keeping current settings: {e:#}");
                SignalOutcome::Ignore
            }
        },
    }
}

/// Console logging switched off for as long as it lives.
struct ConsoleMute {
    engaged: bool,
}

impl ConsoleMute {
    fn engage(engaged: bool) -> Self {
        if engaged {
            Log::set_enabled(false);
        }
        Self { engaged }
    }
}

impl Drop for ConsoleMute {
    fn drop(&mut self) {
        if self.engaged {
            Log::set_enabled(true);
        }
    }
}

/// Draw one frame to the terminal. Failures skip the frame.
fn present(frame: &ClockFrame, face_size: u32) {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let canvas = render::rasterize(frame, width, height, face_size);
    let mut out = std::io::stdout().lock();
    if let Err(e) = render::draw(&mut out, &canvas, frame.theme) {
        log_pipe!();
        log_error!("Failed to draw clock: {e}");
    }
}

/// Headless rendition of a frame.
fn log_frame(frame: &ClockFrame) {
    log_decorated!(
        "{} ({}) hour {:.2}° minute {:.2}° second {:.2}°",
        frame.digital,
        frame.zone_label,
        frame.angles.hour_deg,
        frame.angles.minute_deg,
        frame.angles.second_deg
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_signal_toggles_theme() {
        let outcome = signal_command(SignalMessage::ToggleTheme, || {
            panic!("toggle must not reload the config")
        });
        assert_eq!(outcome, SignalOutcome::Send(WidgetCommand::ToggleTheme));
    }

    #[test]
    fn test_shutdown_signal() {
        assert_eq!(
            signal_command(SignalMessage::Shutdown, || Ok(Config::default())),
            SignalOutcome::Shutdown
        );
    }

    #[test]
    fn test_reload_signal_forwards_new_config() {
        let config = Config {
            dark_mode: Some(true),
            ..Config::default()
        };
        let expected = config.clone();
        let outcome = signal_command(SignalMessage::Reload, move || Ok(config));
        assert_eq!(outcome, SignalOutcome::Send(WidgetCommand::Reconfigure(expected)));
    }

    #[test]
    fn test_failed_reload_keeps_current_settings() {
        let outcome = signal_command(SignalMessage::Reload, || {
            Err(anyhow::anyhow!("update_interval_ms (5) must be between 10 and 1000"))
        });
        assert_eq!(outcome, SignalOutcome::Ignore);
    }

    #[test]
    fn test_console_mute_restores_logging() {
        {
            let _mute = ConsoleMute::engage(true);
            assert!(!Log::is_enabled());
        }
        assert!(Log::is_enabled());

        let _noop = ConsoleMute::engage(false);
        assert!(Log::is_enabled());
    }
}
