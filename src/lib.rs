//! # Clockhand Library
//!
//! Internal library for the clockhand binary.
//!
//! This library exists to enable testing of the clock internals and to keep
//! CLI dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `ClockApp` runs the interactive clock with resource management
//! - **Core Logic**: `clock` turns instants into hand angles and detects second ticks
//! - **Widget**: `widget` holds per-instance state and produces one frame per sample
//! - **Scheduling**: `ticker` drives the widget at a fixed cadence on its own thread
//! - **Presentation**: `render`, `theme`, `sound` and `terminal` for the dial, colors,
//!   tick sound and keyboard
//! - **Configuration**: `config` module for TOML-based settings with reload on SIGUSR2
//! - **Commands**: `commands` module for CLI subcommands (angles, zones, simulate, help)
//! - **Infrastructure**: Signal handling, logging, and a swappable time source

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod render;
pub mod signals;
pub mod sound;
pub mod terminal;
pub mod theme;
pub mod ticker;
pub mod time_source;
pub mod widget;

// Internal modules
mod clockhand;

// Re-export for binary
pub use clockhand::ClockApp;
