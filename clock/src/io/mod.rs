//! I/O helpers for the clock commands.

pub mod clock;
pub mod config;
pub mod git;
pub mod process;
