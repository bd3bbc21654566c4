//! Git adapter for the commit probe.
//!
//! A small, explicit wrapper around a single `git log` subprocess call. All
//! failures are classified into [`ProbeError`] and never propagated further.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::core::commit::{CommitInfo, LOG_ARGS, ProbeError, classify_output};
use crate::io::config::CommitConfig;
use crate::io::process::{CommandRequest, Spawner, SystemSpawner};

/// Anything that can describe the latest commit for display.
pub trait CommitSource: Send + Sync {
    fn describe(&self) -> CommitInfo;
}

/// Runs `<program> log -1 --pretty=format:%h - %s` and reports the result.
#[derive(Debug, Clone)]
pub struct CommitProbe<S = SystemSpawner> {
    spawner: S,
    program: String,
    workdir: Option<PathBuf>,
    timeout: Duration,
    output_limit_bytes: usize,
}

impl CommitProbe<SystemSpawner> {
    pub fn new(config: &CommitConfig, workdir: Option<PathBuf>) -> Self {
        Self::with_spawner(SystemSpawner, config, workdir)
    }
}

impl<S: Spawner> CommitProbe<S> {
    pub fn with_spawner(spawner: S, config: &CommitConfig, workdir: Option<PathBuf>) -> Self {
        Self {
            spawner,
            program: config.program.clone(),
            workdir,
            timeout: Duration::from_secs(config.timeout_secs),
            output_limit_bytes: config.output_limit_bytes,
        }
    }

    fn request(&self) -> CommandRequest {
        CommandRequest {
            program: self.program.clone(),
            args: LOG_ARGS.iter().map(|arg| (*arg).to_string()).collect(),
            workdir: self.workdir.clone(),
            timeout: self.timeout,
            output_limit_bytes: self.output_limit_bytes,
        }
    }

    /// Return the `"<short-hash> - <subject>"` line of the latest commit.
    #[instrument(skip_all, fields(program = %self.program))]
    pub fn last_commit(&self) -> Result<String, ProbeError> {
        // A missing working directory also makes spawn fail with NotFound.
        if let Some(dir) = &self.workdir
            && !dir.is_dir()
        {
            warn!(workdir = %dir.display(), "repository directory missing");
            return Err(ProbeError::Unexpected {
                message: format!("repository directory {} does not exist", dir.display()),
            });
        }

        let output = match self.spawner.output(&self.request()) {
            Ok(output) => output,
            Err(err) => {
                let not_found = err
                    .chain()
                    .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
                    .any(|io_err| io_err.kind() == ErrorKind::NotFound);
                if not_found {
                    warn!("vcs tool not found");
                    return Err(ProbeError::ToolNotFound);
                }
                warn!(error = %err, "vcs tool invocation failed");
                return Err(ProbeError::Unexpected {
                    message: format!("{err:#}"),
                });
            }
        };

        if output.timed_out {
            warn!(timeout_secs = self.timeout.as_secs(), "vcs tool timed out");
            return Err(ProbeError::Unexpected {
                message: format!(
                    "{} log timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                ),
            });
        }

        let result = classify_output(output.success(), &output.stdout, &output.stderr);
        match &result {
            Ok(line) => debug!(commit = %line, "latest commit"),
            Err(err) => debug!(error = %err, exit_code = ?output.exit_code, "vcs tool failed"),
        }
        result
    }
}

impl<S: Spawner> CommitSource for CommitProbe<S> {
    fn describe(&self) -> CommitInfo {
        CommitInfo::from(self.last_commit())
    }
}
