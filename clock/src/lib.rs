//! Live digital clock.
//!
//! The crate samples the local wall clock once per tick and renders it into a
//! single display region, optionally next to a description of the latest
//! commit. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (time formatting, probe
//!   classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (system clock, config files,
//!   process execution). Isolated behind traits so tests can substitute them.
//!
//! [`ticker`] combines both into one sample per tick, and [`display`] drives
//! the repeating render loop for the terminal.

pub mod core;
pub mod display;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod ticker;
