//! Environment lookups consumed by the composer.
//!
//! Lookups are best-effort: they report failures through
//! [`EnvironmentError`], and the composer turns any failure into "no
//! fragment" via [`best_effort`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::debug;

use cortex_utils_git::GitError;

/// Failure of an environment lookup.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("git: {0}")]
    Git(#[from] GitError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of time, version-control and filesystem facts.
pub trait Environment {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Local>;

    /// Checked-out branch, `Ok(None)` outside a repository.
    fn git_branch(&self) -> Result<Option<String>, EnvironmentError>;

    /// Whether `relative` exists below the working directory.
    fn path_exists(&self, relative: &str) -> Result<bool, EnvironmentError>;
}

/// Collapse a lookup result to an optional value, logging failures.
pub fn best_effort<T>(lookup: &str, result: Result<Option<T>, EnvironmentError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(error) => {
            debug!(lookup, %error, "environment lookup failed; skipping");
            None
        }
    }
}

/// The real process environment.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    working_dir: PathBuf,
    git_timeout: Duration,
}

impl SystemEnvironment {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            git_timeout: cortex_utils_git::DEFAULT_GIT_TIMEOUT,
        }
    }

    pub fn with_git_timeout(mut self, timeout: Duration) -> Self {
        self.git_timeout = timeout;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl Environment for SystemEnvironment {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn git_branch(&self) -> Result<Option<String>, EnvironmentError> {
        Ok(cortex_utils_git::current_branch(
            &self.working_dir,
            self.git_timeout,
        )?)
    }

    fn path_exists(&self, relative: &str) -> Result<bool, EnvironmentError> {
        Ok(self.working_dir.join(relative).try_exists()?)
    }
}

/// A frozen environment for tests and embedders.
///
/// Time, branch and marker files are fixed up front, so composing the same
/// prompt twice yields byte-identical output.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    now: DateTime<Local>,
    branch: Option<String>,
    files: HashSet<String>,
    fail_lookups: bool,
}

impl StaticEnvironment {
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            now,
            branch: None,
            files: HashSet::new(),
            fail_lookups: false,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_file(mut self, relative: impl Into<String>) -> Self {
        self.files.insert(relative.into());
        self
    }

    /// Make every fallible lookup return an error.
    pub fn failing(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    fn lookup_failure() -> EnvironmentError {
        EnvironmentError::Io(std::io::Error::other("lookup disabled"))
    }
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self::at(Local::now())
    }
}

impl Environment for StaticEnvironment {
    fn now(&self) -> DateTime<Local> {
        self.now
    }

    fn git_branch(&self) -> Result<Option<String>, EnvironmentError> {
        if self.fail_lookups {
            return Err(Self::lookup_failure());
        }
        Ok(self.branch.clone())
    }

    fn path_exists(&self, relative: &str) -> Result<bool, EnvironmentError> {
        if self.fail_lookups {
            return Err(Self::lookup_failure());
        }
        Ok(self.files.contains(relative))
    }
}
