//! Commit probe against a real `git` binary.
//!
//! Each test returns early when `git` is not installed.

use std::path::Path;
use std::process::Command;

use clock::core::commit::ProbeError;
use clock::io::config::CommitConfig;
use clock::io::git::{CommitProbe, CommitSource};

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=Clock Test", "-c", "user.email=clock@example.com"])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("spawn git");
    assert!(status.success(), "git {args:?} failed");
}

#[test]
fn reports_latest_commit_of_repository() {
    if !git_available() {
        return;
    }
    let temp = tempfile::tempdir().expect("tempdir");
    git(temp.path(), &["init", "-q"]);
    std::fs::write(temp.path().join("a.txt"), "a").expect("write");
    git(temp.path(), &["add", "a.txt"]);
    git(temp.path(), &["commit", "-q", "-m", "First commit"]);
    std::fs::write(temp.path().join("b.txt"), "b").expect("write");
    git(temp.path(), &["add", "b.txt"]);
    git(temp.path(), &["commit", "-q", "-m", "Fix bug"]);

    let probe = CommitProbe::new(&CommitConfig::default(), Some(temp.path().to_path_buf()));
    let line = probe.last_commit().expect("commit line");
    let (hash, subject) = line.split_once(" - ").expect("hash and subject");
    assert!(hash.len() >= 7 && hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(subject, "Fix bug");
    assert_eq!(probe.describe().as_str(), line);
}

#[test]
fn outside_repository_reports_command_failure() {
    if !git_available() {
        return;
    }
    let temp = tempfile::tempdir().expect("tempdir");
    let probe = CommitProbe::new(&CommitConfig::default(), Some(temp.path().to_path_buf()));
    match probe.last_commit() {
        Err(ProbeError::CommandFailed { stderr }) => {
            assert!(!stderr.is_empty());
            assert_eq!(stderr, stderr.trim());
        }
        // The temp dir may itself live inside a checkout.
        Ok(_) => {}
        Err(other) => panic!("unexpected probe error: {other:?}"),
    }
}

#[test]
fn missing_executable_is_tool_not_found() {
    let config = CommitConfig {
        program: "clock-test-no-such-vcs".to_string(),
        ..CommitConfig::default()
    };
    let probe = CommitProbe::new(&config, None);
    assert_eq!(probe.last_commit(), Err(ProbeError::ToolNotFound));
}

#[test]
fn missing_repository_directory_is_unexpected_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("typo");
    let probe = CommitProbe::new(&CommitConfig::default(), Some(missing.clone()));
    let info = probe.describe();
    assert_ne!(
        info.as_str(),
        "Error: Git is not installed or not found in PATH."
    );
    assert_eq!(
        info.as_str(),
        format!(
            "An unexpected error occurred: repository directory {} does not exist",
            missing.display()
        )
    );
}
