//! Unix signal handling.
//!
//! A background thread turns signals into [`SignalMessage`]s on a channel the
//! main loop drains:
//!
//! - `SIGINT`, `SIGTERM`, `SIGHUP`: shut down
//! - `SIGUSR1`: toggle dark mode
//! - `SIGUSR2`: reload the configuration file

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR1, SIGUSR2},
    iterator::Signals,
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc::{Receiver, channel},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalMessage {
    Shutdown,
    ToggleTheme,
    Reload,
}

/// State shared between the signal thread and the main loop.
pub struct SignalState {
    /// Cleared when a shutdown signal arrives
    pub running: Arc<AtomicBool>,
    pub signal_receiver: Receiver<SignalMessage>,
}

/// Map a raw signal number to the message it produces.
pub fn message_for(signal: i32) -> Option<SignalMessage> {
    match signal {
        SIGUSR1 => Some(SignalMessage::ToggleTheme),
        SIGUSR2 => Some(SignalMessage::Reload),
        SIGINT | SIGTERM | SIGHUP => Some(SignalMessage::Shutdown),
        _ => None,
    }
}

/// Install handlers and start the signal thread.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR1, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = channel();

    let running_clone = Arc::clone(&running);

    std::thread::Builder::new()
        .name("clockhand-signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                let Some(message) = message_for(sig) else {
                    continue;
                };

                if debug_enabled {
                    log_pipe!();
                    log_debug!("Received signal {sig}: {message:?}");
                }

                if message == SignalMessage::Shutdown {
                    running_clone.store(false, Ordering::SeqCst);
                }

                // Receiver gone means the main loop has exited
                if signal_sender.send(message).is_err() {
                    break;
                }
            }
        })
        .context("failed to spawn signal thread")?;

    Ok(SignalState {
        running,
        signal_receiver,
    })
}
