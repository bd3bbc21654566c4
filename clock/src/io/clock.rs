//! Clock port for obtaining the current local time.

use chrono::{Local, NaiveDateTime};

/// Provides the current local wall-clock time.
///
/// Abstracting time access lets tests substitute a fixed or stepping clock.
pub trait Clock: Send + Sync {
    /// Current local date and time (no zone attached).
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the host's system time in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
