//! Git utilities for Cortex.
//!
//! Every query runs `git` as a subprocess bounded by a timeout, so a hung
//! repository (network filesystems, huge worktrees, credential prompts)
//! cannot stall the caller.

use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Default timeout for git operations.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors from running a git subprocess.
#[derive(Debug, Error)]
pub enum GitError {
    /// `git` could not be started (not installed, cwd missing, ...).
    #[error("failed to spawn git: {0}")]
    Spawn(#[source] std::io::Error),
    /// The process was started but waiting on it failed.
    #[error("failed to wait for git: {0}")]
    Wait(#[source] std::io::Error),
    /// The command did not finish in time and was killed.
    #[error("git {command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Run `git <args>` in `cwd`, killing it once `timeout` elapses.
fn run_git(args: &[&str], cwd: &Path, timeout: Duration) -> Result<Output> {
    let mut child = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(GitError::Spawn)?;

    let start = Instant::now();
    loop {
        match child.try_wait().map_err(GitError::Wait)? {
            Some(_) => return child.wait_with_output().map_err(GitError::Wait),
            None if start.elapsed() > timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(GitError::Timeout {
                    command: args.join(" "),
                    timeout,
                });
            }
            None => std::thread::sleep(POLL_INTERVAL),
        }
    }
}

/// Get the name of the checked-out branch.
///
/// Returns `Ok(None)` outside a repository and on a detached HEAD. An
/// unborn branch (fresh `git init`) still reports its name.
pub fn current_branch(cwd: &Path, timeout: Duration) -> Result<Option<String>> {
    let output = run_git(&["branch", "--show-current"], cwd, timeout)?;
    if !output.status.success() {
        return Ok(None);
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!branch.is_empty()).then_some(branch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_current_branch_outside_repo() {
        let dir = TempDir::new().unwrap();
        let result = current_branch(dir.path(), DEFAULT_GIT_TIMEOUT);
        assert!(!matches!(result, Ok(Some(_))));
    }

    #[test]
    fn test_current_branch_of_fresh_repo() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        if !git(dir.path(), &["init", "-q"])
            || !git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/topic-branch"])
        {
            return;
        }

        let branch = current_branch(dir.path(), DEFAULT_GIT_TIMEOUT).unwrap();
        assert_eq!(branch.as_deref(), Some("topic-branch"));
    }

    #[test]
    fn test_missing_cwd_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = current_branch(&missing, DEFAULT_GIT_TIMEOUT);
        assert!(matches!(result, Err(GitError::Spawn(_))));
    }

    #[test]
    fn test_timeout_error_message() {
        let err = GitError::Timeout {
            command: "branch --show-current".to_string(),
            timeout: Duration::from_secs(2),
        };
        assert_eq!(
            err.to_string(),
            "git branch --show-current timed out after 2s"
        );
    }
}
