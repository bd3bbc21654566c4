//! Commit metadata reporting.
//!
//! The probe never fails outward: every outcome is turned into a
//! display-ready [`CommitInfo`]. Classification of a finished command lives
//! here so it can be exercised without spawning anything.

use serde::Serialize;
use thiserror::Error;

/// Arguments passed to the VCS tool to describe the latest commit.
pub const LOG_ARGS: [&str; 3] = ["log", "-1", "--pretty=format:%h - %s"];

/// Failure classes of the commit probe.
///
/// The `Display` output of each variant is the exact text shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The executable could not be located on the search path.
    #[error("Error: Git is not installed or not found in PATH.")]
    ToolNotFound,

    /// The tool ran and exited unsuccessfully (e.g. outside a repository).
    #[error("Error getting commit info: {stderr}")]
    CommandFailed { stderr: String },

    /// Anything else that went wrong while invoking the tool.
    #[error("An unexpected error occurred: {message}")]
    Unexpected { message: String },
}

/// One-line description of the most recent commit, or a probe error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommitInfo(String);

impl CommitInfo {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Result<String, ProbeError>> for CommitInfo {
    fn from(result: Result<String, ProbeError>) -> Self {
        match result {
            Ok(line) => Self(line),
            Err(err) => Self(err.to_string()),
        }
    }
}

impl std::fmt::Display for CommitInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classify the captured output of a finished `log` invocation.
pub fn classify_output(success: bool, stdout: &[u8], stderr: &[u8]) -> Result<String, ProbeError> {
    if !success {
        return Err(ProbeError::CommandFailed {
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(stdout).trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_strips_trailing_whitespace() {
        let line = classify_output(true, b"abc1234 - Fix bug\n", b"").expect("success");
        assert_eq!(line, "abc1234 - Fix bug");
    }

    #[test]
    fn failure_embeds_trimmed_stderr() {
        let err = classify_output(false, b"", b"fatal: not a git repository\n").unwrap_err();
        assert_eq!(
            err,
            ProbeError::CommandFailed {
                stderr: "fatal: not a git repository".to_string()
            }
        );
        let info = CommitInfo::from(Err(err));
        assert!(info.as_str().starts_with("Error getting commit info: "));
        assert!(info.as_str().ends_with("fatal: not a git repository"));
    }

    #[test]
    fn missing_tool_message_is_fixed() {
        let info = CommitInfo::from(Err(ProbeError::ToolNotFound));
        assert_eq!(
            info.as_str(),
            "Error: Git is not installed or not found in PATH."
        );
    }

    #[test]
    fn unexpected_failure_embeds_description() {
        let info = CommitInfo::from(Err(ProbeError::Unexpected {
            message: "permission denied".to_string(),
        }));
        assert_eq!(
            info.as_str(),
            "An unexpected error occurred: permission denied"
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let info = CommitInfo::from(Ok("abc1234 - Fix bug".to_string()));
        assert_eq!(
            serde_json::to_string(&info).expect("json"),
            "\"abc1234 - Fix bug\""
        );
    }
}
