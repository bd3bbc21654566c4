//! Stable exit codes for clock CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid config or other errors.
pub const INVALID: i32 = 1;
/// `clock commit` could not describe the latest commit.
pub const PROBE_FAILED: i32 = 2;
