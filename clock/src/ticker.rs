//! Sampling of the clock and commit probe into [`Tick`]s.
//!
//! One-time setup (the commit probe under [`RefreshPolicy::Once`]) happens in
//! [`Ticker::new`]; [`Ticker::tick`] only does per-tick work.

use tracing::{debug, info};

use crate::core::commit::CommitInfo;
use crate::core::time_format::format_time;
use crate::core::types::Tick;
use crate::io::clock::Clock;
use crate::io::config::RefreshPolicy;
use crate::io::git::CommitSource;

enum CommitSlot {
    Disabled,
    Cached(CommitInfo),
    Live(Box<dyn CommitSource>),
}

/// Produces one [`Tick`] per call from a clock and an optional commit source.
pub struct Ticker {
    clock: Box<dyn Clock>,
    commit: CommitSlot,
}

impl Ticker {
    /// Build a ticker. With [`RefreshPolicy::Once`] the probe runs here, exactly once.
    pub fn new(
        clock: Box<dyn Clock>,
        source: Option<Box<dyn CommitSource>>,
        refresh: RefreshPolicy,
    ) -> Self {
        let commit = match (source, refresh) {
            (None, _) => CommitSlot::Disabled,
            (Some(source), RefreshPolicy::Once) => {
                let info = source.describe();
                info!(commit = %info, "commit info cached");
                CommitSlot::Cached(info)
            }
            (Some(source), RefreshPolicy::EveryTick) => CommitSlot::Live(source),
        };
        Self { clock, commit }
    }

    /// Build a ticker that only reports the time.
    pub fn time_only(clock: Box<dyn Clock>) -> Self {
        Self::new(clock, None, RefreshPolicy::Once)
    }

    pub fn tick(&self) -> Tick {
        let time = format_time(&self.clock.now());
        let commit = match &self.commit {
            CommitSlot::Disabled => None,
            CommitSlot::Cached(info) => Some(info.clone()),
            CommitSlot::Live(source) => Some(source.describe()),
        };
        debug!(time = %time, "tick");
        Tick { time, commit }
    }
}
