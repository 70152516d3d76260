//! Fixed-cadence periodic task with an explicit stop handle.
//!
//! The callback runs once immediately and then after every interval on a
//! dedicated thread. Waiting goes through the global time source, so a
//! simulated clock speeds the cadence up along with everything else.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};

/// What the callback wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// Builder for a periodic task.
pub struct Ticker {
    interval: Duration,
    name: String,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            name: "clockhand-ticker".to_string(),
        }
    }

    /// Thread name, shown in debuggers and panic messages.
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Spawn the task. The callback owns whatever state it captures.
    pub fn start<F>(self, mut callback: F) -> Result<TickerHandle>
    where
        F: FnMut() -> TickControl + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let invocations = Arc::new(AtomicU64::new(0));

        let thread_running = Arc::clone(&running);
        let thread_invocations = Arc::clone(&invocations);
        let interval = self.interval;

        let handle = std::thread::Builder::new()
            .name(self.name)
            .spawn(move || {
                // Clears the flag on return and on unwind
                let _running = RunningFlag(Arc::clone(&thread_running));
                while thread_running.load(Ordering::SeqCst) {
                    let control = callback();
                    thread_invocations.fetch_add(1, Ordering::SeqCst);
                    if control == TickControl::Stop {
                        break;
                    }
                    crate::time_source::sleep(interval);
                }
            })
            .context("Failed to spawn ticker thread")?;

        Ok(TickerHandle {
            running,
            invocations,
            handle: Some(handle),
            panicked: false,
        })
    }
}

struct RunningFlag(Arc<AtomicBool>);

impl Drop for RunningFlag {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owner of a running periodic task. Dropping it stops the task.
pub struct TickerHandle {
    running: Arc<AtomicBool>,
    invocations: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
    panicked: bool,
}

impl TickerHandle {
    /// False once stopped, or once the callback asked to stop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of completed callback invocations.
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Halt future invocations and wait for the current one to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take()
            && let Err(panic) = handle.join()
        {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log_pipe!();
            log_error!("Clock task panicked: {reason}");
            self.panicked = true;
        }
    }

    /// True once `stop` has joined a worker that panicked.
    pub fn panicked(&self) -> bool {
        self.panicked
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
