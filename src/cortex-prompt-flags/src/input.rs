//! Hook input decoding.
//!
//! The host writes one JSON object to stdin. Decoding is lenient: missing or
//! `null` fields take defaults, invalid UTF-8 is replaced, and an unparsable
//! payload is treated as an empty input instead of failing the hook.

use serde::Deserialize;
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::warn;

/// Session id used when the host does not send one.
pub const UNKNOWN_SESSION: &str = "unknown";

#[derive(Debug, Default, Deserialize)]
struct RawHookInput {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    cwd: Option<PathBuf>,
    #[serde(default)]
    hook_event_name: Option<String>,
    #[serde(default)]
    transcript_path: Option<PathBuf>,
}

/// The structured object a `UserPromptSubmit` hook receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInput {
    pub prompt: String,
    pub session_id: String,
    /// Working directory of the host session, when reported.
    pub cwd: Option<PathBuf>,
    pub hook_event_name: Option<String>,
    pub transcript_path: Option<PathBuf>,
}

impl Default for HookInput {
    fn default() -> Self {
        RawHookInput::default().into()
    }
}

impl From<RawHookInput> for HookInput {
    fn from(raw: RawHookInput) -> Self {
        Self {
            prompt: raw.prompt.unwrap_or_default(),
            session_id: raw
                .session_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| UNKNOWN_SESSION.to_string()),
            cwd: raw.cwd,
            hook_event_name: raw.hook_event_name,
            transcript_path: raw.transcript_path,
        }
    }
}

impl HookInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Strict decoding.
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        let raw: RawHookInput = serde_json::from_str(raw)?;
        Ok(raw.into())
    }

    /// Lenient decoding: blank or malformed input yields the default input.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            warn!("empty hook input; treating prompt as empty");
            return Self::default();
        }
        match Self::from_json(raw) {
            Ok(input) => input,
            Err(error) => {
                warn!(%error, "malformed hook input; treating prompt as empty");
                Self::default()
            }
        }
    }

    /// Lenient decoding of raw stdin bytes.
    pub fn parse_bytes(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        if let Cow::Owned(_) = text {
            warn!("hook input is not valid UTF-8; invalid bytes replaced");
        }
        Self::parse(&text)
    }

    /// Reported working directory if it is an existing directory.
    pub fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref().filter(|dir| dir.is_dir())
    }
}
