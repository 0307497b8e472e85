//! Append-only session log (JSONL).
//!
//! Each hook invocation appends exactly one line. Concurrent hook processes
//! share the file, so every entry is serialized into a single buffer and
//! written with one `write_all` on a file opened in append mode.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::composer::{Composition, format_date};
use crate::config::LoggingConfig;
use crate::{PromptFlagsError, Result};

/// One logged invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub formatted_date: String,
    pub session_id: String,
    pub original_prompt: String,
    pub flags: Vec<String>,
    pub clean_prompt: String,
    pub applied_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub help_request: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto_applied_standards: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injected_context: Option<String>,
}

impl SessionLogEntry {
    pub fn from_composition(composition: &Composition, session_id: &str) -> Self {
        Self {
            timestamp: composition.timestamp.to_rfc3339(),
            formatted_date: format_date(&composition.timestamp),
            session_id: session_id.to_string(),
            original_prompt: composition.original_prompt.clone(),
            flags: composition.flags.clone(),
            clean_prompt: composition.clean_prompt.clone(),
            applied_flags: composition.applied_flags.clone(),
            help_request: composition.help_requested,
            auto_applied_standards: composition.auto_applied_standards,
            injected_context: composition.context(),
        }
    }

    /// The entry as one newline-terminated JSON line.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Writes [`SessionLogEntry`] lines to the configured log file.
#[derive(Debug, Clone, Default)]
pub struct SessionLogger {
    config: LoggingConfig,
}

impl SessionLogger {
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.config.log_path()
    }

    /// Append one entry, creating the log directory if needed.
    ///
    /// A disabled logger writes nothing and succeeds.
    pub fn try_append(&self, entry: &SessionLogEntry) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }
        let path = self.log_path().ok_or(PromptFlagsError::NoLogLocation)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let line = entry.to_line()?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;

        debug!(path = %path.display(), session_id = %entry.session_id, "Session entry appended");
        Ok(())
    }

    /// Best-effort [`try_append`](Self::try_append): failures are reported
    /// at `debug` and otherwise ignored.
    pub fn append(&self, entry: &SessionLogEntry) {
        if let Err(error) = self.try_append(entry) {
            debug!(%error, "failed to write session log entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::ContextComposer;
    use crate::config::ContextConfig;
    use crate::environment::StaticEnvironment;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn composition(prompt: &str) -> Composition {
        let now = Local.with_ymd_and_hms(2025, 8, 4, 9, 30, 0).unwrap();
        ContextComposer::new(StaticEnvironment::at(now), ContextConfig::default()).compose(prompt)
    }

    fn logger_in(dir: &std::path::Path) -> SessionLogger {
        SessionLogger::new(LoggingConfig {
            dir: Some(dir.to_path_buf()),
            ..LoggingConfig::default()
        })
    }

    fn read_lines(path: &std::path::Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_entry_from_composition() {
        let entry = SessionLogEntry::from_composition(&composition("fix the bug -u"), "s-1");
        assert_eq!(entry.formatted_date, "August 4, 2025");
        assert_eq!(entry.session_id, "s-1");
        assert_eq!(entry.original_prompt, "fix the bug -u");
        assert_eq!(entry.clean_prompt, "fix the bug");
        assert_eq!(entry.flags, vec!["u"]);
        assert_eq!(entry.applied_flags, vec!["u"]);
        assert!(entry.auto_applied_standards);
        assert!(!entry.help_request);
        assert!(entry.injected_context.unwrap().starts_with("[Current Date: August 4, 2025]"));
        assert!(entry.timestamp.starts_with("2025-08-04T09:30:00"));
    }

    #[test]
    fn test_false_markers_are_omitted() {
        let mut entry = SessionLogEntry::from_composition(&composition("hello"), "s-2");
        entry.injected_context = None;
        let value: serde_json::Value = serde_json::from_str(&entry.to_line().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("help_request"));
        assert!(!object.contains_key("auto_applied_standards"));
        assert!(!object.contains_key("injected_context"));
        assert_eq!(object["session_id"], "s-2");
        assert_eq!(object["flags"], serde_json::json!([]));
    }

    #[test]
    fn test_help_marker_is_written() {
        let entry = SessionLogEntry::from_composition(&composition("-hhelp"), "s-3");
        let line = entry.to_line().unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains(r#""help_request":true"#));
    }

    #[test]
    fn test_help_only_prompt_logs_parsed_clean_prompt() {
        let entry = SessionLogEntry::from_composition(&composition("  -hh "), "s-4");
        assert_eq!(entry.clean_prompt, "");
        assert_eq!(entry.flags, vec!["hh"]);
        assert!(entry.help_request);
        assert!(!entry.auto_applied_standards);
    }

    #[test]
    fn test_append_creates_directory_and_appends() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let logger = logger_in(&dir);

        let first = SessionLogEntry::from_composition(&composition("one -t"), "a");
        let second = SessionLogEntry::from_composition(&composition("two"), "b");
        logger.try_append(&first).unwrap();
        logger.try_append(&second).unwrap();

        let lines = read_lines(&dir.join("prompt_hooks.jsonl"));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["session_id"], "a");
        assert_eq!(lines[1]["original_prompt"], "two");

        let decoded: SessionLogEntry = serde_json::from_value(lines[0].clone()).unwrap();
        assert_eq!(decoded, first);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let logger = SessionLogger::new(LoggingConfig {
            enabled: false,
            dir: Some(tmp.path().to_path_buf()),
            ..LoggingConfig::default()
        });
        assert!(!logger.is_enabled());

        logger
            .try_append(&SessionLogEntry::from_composition(&composition("x"), "a"))
            .unwrap();
        assert!(!tmp.path().join("prompt_hooks.jsonl").exists());
    }

    #[test]
    fn test_unwritable_location_is_swallowed() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let logger = logger_in(&blocker.join("logs"));
        let entry = SessionLogEntry::from_composition(&composition("x"), "a");

        assert!(logger.try_append(&entry).is_err());
        logger.append(&entry);
    }
}
