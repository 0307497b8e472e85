//! Prompt flag configuration loading and management.
//!
//! Resolution order, later wins:
//!
//! 1. built-in defaults
//! 2. the TOML config file (explicit path, or `~/.claude/prompt-flags.toml`
//!    when present)
//! 3. `CORTEX_PROMPT_FLAGS_*` environment variables
//!
//! Command-line flags are applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{PromptFlagsError, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CORTEX_PROMPT_FLAGS_CONFIG";
/// Overrides `logging.dir`.
pub const LOG_DIR_ENV: &str = "CORTEX_PROMPT_FLAGS_LOG_DIR";
/// `0`, `false`, `off` or `no` disables the session log.
pub const LOGGING_ENV: &str = "CORTEX_PROMPT_FLAGS_LOGGING";
/// Overrides `context.git_timeout_secs`.
pub const GIT_TIMEOUT_ENV: &str = "CORTEX_PROMPT_FLAGS_GIT_TIMEOUT_SECS";

const DEFAULT_CONFIG_FILE: &str = "prompt-flags.toml";
const DEFAULT_LOG_FILE: &str = "prompt_hooks.jsonl";

/// Directory holding the default config file and logs (`~/.claude`).
pub fn claude_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".claude"))
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptFlagsConfig {
    pub logging: LoggingConfig,
    pub context: ContextConfig,
}

/// Session log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether invocations are appended to the session log.
    pub enabled: bool,
    /// Log directory. Defaults to `~/.claude/logs`.
    pub dir: Option<PathBuf>,
    /// Log file name inside `dir`.
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Full path of the log file, `None` when no home directory is known.
    pub fn log_path(&self) -> Option<PathBuf> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => claude_home()?.join("logs"),
        };
        Some(dir.join(&self.file_name))
    }
}

/// What the composer adds besides flag fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Prepend `[Current Date: ...]`.
    pub include_date: bool,
    /// Add `[Git Branch: ...]` when inside a repository.
    pub include_git_branch: bool,
    /// Auto-apply engineering standards to substantial work.
    pub auto_standards: bool,
    pub git_timeout_secs: u64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            include_date: true,
            include_git_branch: true,
            auto_standards: true,
            git_timeout_secs: 5,
        }
    }
}

impl ContextConfig {
    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl PromptFlagsConfig {
    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PromptFlagsError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            PromptFlagsError::ConfigParse { source, .. } => PromptFlagsError::ConfigParse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Default config file location (`~/.claude/prompt-flags.toml`).
    pub fn default_path() -> Option<PathBuf> {
        claude_home().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Resolve the effective configuration from the process environment.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit, Self::default_path(), |key| std::env::var(key).ok())
    }

    /// [`resolve`](Self::resolve) with injectable default path and variables.
    pub fn resolve_with(
        explicit: Option<&Path>,
        default_path: Option<PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| var(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));

        let mut config = match (explicit, default_path) {
            (Some(path), _) => Self::load_from_file(&path)?,
            (None, Some(path)) if path.is_file() => Self::load_from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env_overrides(var);
        Ok(config)
    }

    /// Apply `CORTEX_PROMPT_FLAGS_*` overrides. Unparsable values are ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(LOG_DIR_ENV).filter(|v| !v.is_empty()) {
            self.logging.dir = Some(PathBuf::from(dir));
        }

        if let Some(enabled) = var(LOGGING_ENV).as_deref().and_then(parse_bool) {
            self.logging.enabled = enabled;
        }

        if let Some(secs) = var(GIT_TIMEOUT_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.context.git_timeout_secs = secs;
        }
    }
}
