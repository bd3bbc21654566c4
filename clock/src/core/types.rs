//! Shared value types produced on every tick.

use serde::Serialize;

use crate::core::commit::CommitInfo;

/// One sample of the display loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    /// Local wall-clock time as `HH:MM:SS`.
    pub time: String,
    /// Latest commit description, when the probe is enabled.
    pub commit: Option<CommitInfo>,
}
