//! Test-only clocks and commit sources.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::core::commit::CommitInfo;
use crate::io::clock::Clock;
use crate::io::git::CommitSource;

/// A fixed date at the given time of day.
pub fn datetime(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid datetime")
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Clock that advances by one second after every read.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<NaiveDateTime>,
}

impl SteppingClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let mut next = self.next.lock().expect("clock lock");
        let current = *next;
        *next = current + Duration::seconds(1);
        current
    }
}

/// Shared invocation counter handed out by [`CountingSource`].
#[derive(Debug, Clone, Default)]
pub struct CallCount(Arc<AtomicUsize>);

impl CallCount {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Commit source returning a constant line and counting invocations.
#[derive(Debug)]
pub struct CountingSource {
    line: String,
    calls: CallCount,
}

impl CountingSource {
    pub fn new(line: &str) -> Self {
        Self {
            line: line.to_string(),
            calls: CallCount::default(),
        }
    }

    pub fn calls(&self) -> CallCount {
        self.calls.clone()
    }
}

impl CommitSource for CountingSource {
    fn describe(&self) -> CommitInfo {
        self.calls.0.fetch_add(1, Ordering::SeqCst);
        CommitInfo::from(Ok(self.line.clone()))
    }
}
