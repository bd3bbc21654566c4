//! Helpers for running child processes with timeouts and bounded output.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// A command to spawn, described without touching the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; `None` inherits the caller's.
    pub workdir: Option<PathBuf>,
    pub timeout: Duration,
    /// Bytes of stdout/stderr kept in memory; the rest is drained and dropped.
    pub output_limit_bytes: usize,
}

/// Captured child process output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub stdout_truncated: usize,
    pub stderr_truncated: usize,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Spawns commands. Tests substitute scripted implementations.
pub trait Spawner: Send + Sync {
    fn output(&self, request: &CommandRequest) -> Result<CommandOutput>;
}

/// Spawner that runs real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn output(&self, request: &CommandRequest) -> Result<CommandOutput> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);
        if let Some(dir) = &request.workdir {
            cmd.current_dir(dir);
        }
        run_command_with_timeout(cmd, request.timeout, request.output_limit_bytes)
    }
}

/// Run a command with a timeout and capture stdout/stderr without risking pipe deadlocks.
///
/// Output is read concurrently while the child runs. `output_limit_bytes` bounds the amount of
/// stdout/stderr stored in memory (bytes beyond this are discarded while still draining the pipe).
#[instrument(skip_all, fields(timeout_secs = timeout.as_secs(), output_limit_bytes))]
pub fn run_command_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    output_limit_bytes: usize,
) -> Result<CommandOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || read_stream_limited(stdout, output_limit_bytes));
    let stderr_handle = thread::spawn(move || read_stream_limited(stderr, output_limit_bytes));

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => status,
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            timed_out = true;
            child.kill().context("kill command")?;
            child.wait().context("wait command after kill")?
        }
    };

    let (stdout, stdout_truncated) = join_output(stdout_handle).context("join stdout")?;
    let (stderr, stderr_truncated) = join_output(stderr_handle).context("join stderr")?;

    if stdout_truncated > 0 || stderr_truncated > 0 {
        warn!(stdout_truncated, stderr_truncated, "output truncated");
    }

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(CommandOutput {
        exit_code: status.code(),
        stdout,
        stderr,
        stdout_truncated,
        stderr_truncated,
        timed_out,
    })
}

fn join_output(handle: thread::JoinHandle<Result<(Vec<u8>, usize)>>) -> Result<(Vec<u8>, usize)> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn read_stream_limited<R: Read>(mut reader: R, limit: usize) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut truncated = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        if remaining > 0 {
            let keep = n.min(remaining);
            buf.extend_from_slice(&chunk[..keep]);
            truncated += n.saturating_sub(keep);
        } else {
            truncated += n;
        }
    }

    Ok((buf, truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limited_read_keeps_prefix_and_counts_rest() {
        let (kept, truncated) = read_stream_limited(&b"abcdefgh"[..], 3).expect("read");
        assert_eq!(kept, b"abc");
        assert_eq!(truncated, 5);
    }

    #[test]
    fn limited_read_under_limit_is_untouched() {
        let (kept, truncated) = read_stream_limited(&b"abc"[..], 16).expect("read");
        assert_eq!(kept, b"abc");
        assert_eq!(truncated, 0);
    }

    #[test]
    fn timed_out_output_is_not_success() {
        let out = CommandOutput {
            exit_code: Some(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
            stdout_truncated: 0,
            stderr_truncated: 0,
            timed_out: true,
        };
        assert!(!out.success());
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let err = SystemSpawner
            .output(&CommandRequest {
                program: "clock-test-no-such-program".to_string(),
                args: Vec::new(),
                workdir: None,
                timeout: Duration::from_secs(5),
                output_limit_bytes: 1024,
            })
            .unwrap_err();
        let io_err = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<std::io::Error>())
            .expect("io error in chain");
        assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
    }
}
