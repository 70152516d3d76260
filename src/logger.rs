//! Structured console logging with box-drawing output.
//!
//! Every line goes through [`emit`], which checks the global enable switch,
//! adds a simulated-time prefix when running under `clockhand simulate`, and
//! routes the text either to stdout or to the `--log` file writer thread.
//!
//! ## Conventions
//!
//! - `log_version!` opens the output with `┏ clockhand vX.Y.Z ━━╸`.
//! - `log_block_start!` starts a new block: an empty `┃` line, then `┣ message`.
//! - `log_decorated!` continues a block with `┣ message`.
//! - `log_indented!` nests detail under the previous line: `┃   message`.
//! - `log_pipe!` inserts a bare `┃`, used before a levelled message that
//!   starts its own block.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!`
//!   print a coloured `[LEVEL]` tag after `┣`.
//! - `log_error_exit!` closes the output with `┗[ERROR] message`.
//! - `log_end!` prints the final `╹`.
//!
//! While the full-screen clock is drawn the console logger is switched off with
//! [`Log::set_enabled`], so nothing scribbles over the dial.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};
use std::sync::{Mutex, OnceLock};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

// Zone used for simulated-time prefixes, follows the displayed zone
static DISPLAY_ZONE: Mutex<Option<chrono_tz::Tz>> = Mutex::new(None);

// Set when --log routes output to a file
static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Kind of log line, which decides its decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Version,
    Pipe,
    End,
    BlockStart,
    Decorated,
    Indented,
    Info,
    Warning,
    WarningStandalone,
    Error,
    ErrorExit,
    Debug,
}

/// Logging facade.
pub struct Log;

impl Log {
    /// Turn console output on or off.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Zone used for simulated timestamps; `None` means local time.
    pub fn set_display_zone(tz: Option<chrono_tz::Tz>) {
        *DISPLAY_ZONE.lock().unwrap_or_else(|e| e.into_inner()) = tz;
    }

    fn display_zone() -> Option<chrono_tz::Tz> {
        *DISPLAY_ZONE.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True once `--log` has redirected output to a file.
    pub fn is_file_logging() -> bool {
        LOG_CHANNEL.get().is_some()
    }

    /// Route all further output to `file_path` until the guard drops.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();
        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;
            while let Ok(LogMessage::Formatted(text)) = rx.recv() {
                file.write_all(text.as_bytes())?;
            }
            file.flush()?;
            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// `[HH:MM:SS] ` from the simulated clock, empty outside simulation.
    pub fn timestamp_prefix() -> String {
        // Don't initialize the time source just to find out
        if !(crate::time_source::is_initialized() && crate::time_source::is_simulated()) {
            return String::new();
        }
        let now = crate::time_source::now();
        match Self::display_zone() {
            Some(tz) => format!("[{}] ", now.with_timezone(&tz).format("%H:%M:%S")),
            None => format!("[{}] ", now.with_timezone(&chrono::Local).format("%H:%M:%S")),
        }
    }
}

/// Flushes and joins the file writer on drop.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Decorate `message` for `kind`, each physical line prefixed with `prefix`.
pub fn render(kind: Line, prefix: &str, message: &str) -> String {
    match kind {
        Line::Version => format!(
            "{prefix}┏ clockhand v{} ━━╸\n",
            env!("CARGO_PKG_VERSION")
        ),
        Line::Pipe => format!("{prefix}┃\n"),
        Line::End => format!("{prefix}╹\n"),
        Line::BlockStart => format!("{prefix}┃\n{prefix}┣ {message}\n"),
        Line::Decorated => format!("{prefix}┣ {message}\n"),
        Line::Indented => format!("{prefix}┃   {message}\n"),
        Line::Info => format!("{prefix}┣[\x1b[32mINFO\x1b[0m] {message}\n"),
        Line::Warning => format!("{prefix}┣[\x1b[33mWARNING\x1b[0m] {message}\n"),
        Line::WarningStandalone => format!("{prefix}[\x1b[33mWARNING\x1b[0m] {message}\n"),
        Line::Error => format!("{prefix}┣[\x1b[31mERROR\x1b[0m] {message}\n"),
        Line::ErrorExit => format!("{prefix}┃\n{prefix}┗[\x1b[31mERROR\x1b[0m] {message}\n"),
        Line::Debug => format!("{prefix}┣[\x1b[32mDEBUG\x1b[0m] {message}\n"),
    }
}

/// Build and write one log line if logging is enabled.
///
/// The message closure only runs when the line will actually be written.
pub fn emit<F: FnOnce() -> String>(kind: Line, message: F) {
    if !Log::is_enabled() {
        return;
    }
    let prefix = Log::timestamp_prefix();
    write_output(&render(kind, &prefix, &message()));
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            // Skip through the terminating 'm'
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

/// Start a new block of related output.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::BlockStart, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::BlockStart, || format!("{}", $expr))
    };
}

/// Continue the current block.
#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::Decorated, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::Decorated, || format!("{}", $expr))
    };
}

/// Nested detail line.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::Indented, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::Indented, || format!("{}", $expr))
    };
}

#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::emit($crate::logger::Line::Pipe, String::new)
    };
}

#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::emit($crate::logger::Line::Version, String::new)
    };
}

#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::emit($crate::logger::Line::End, String::new)
    };
}

#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::Info, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::Info, || format!("{}", $expr))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::Warning, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::Warning, || format!("{}", $expr))
    };
}

/// Warning outside the box-drawing flow (e.g. argument errors before the header).
#[macro_export]
macro_rules! log_warning_standalone {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::WarningStandalone, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::WarningStandalone, || format!("{}", $expr))
    };
}

#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::Error, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::Error, || format!("{}", $expr))
    };
}

/// Error that terminates the output flow.
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::ErrorExit, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::ErrorExit, || format!("{}", $expr))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Line::Debug, || format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::logger::emit($crate::logger::Line::Debug, || format!("{}", $expr))
    };
}
