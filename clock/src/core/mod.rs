//! Deterministic, pure logic shared by the clock binaries.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod commit;
pub mod time_format;
pub mod types;
