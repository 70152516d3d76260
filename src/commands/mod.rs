//! One-shot command handlers.
//!
//! Each subcommand lives in its own module. The interactive clock itself is
//! started through [`crate::ClockApp`].

pub mod angles;
pub mod help;
pub mod simulate;
pub mod zones;
