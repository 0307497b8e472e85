//! Prompt flag processing for Cortex prompt hooks.
//!
//! A `UserPromptSubmit` hook receives the user's prompt before the assistant
//! does. This crate strips trailing flags such as `-u` or `-test` from that
//! prompt and composes the instruction text those flags stand for:
//!
//! - [`parser`] - extracts the trailing flag run
//! - [`registry`] - maps flag aliases to [`FlagEffect`]s
//! - [`classifier`] - decides whether engineering standards are auto-applied
//! - [`composer`] - orders date, branch, defaults and flag fragments
//! - [`session_log`] - appends one JSON line per invocation
//! - [`hook`] - runs the whole pipeline for one hook input
//!
//! # Example
//!
//! ```rust
//! use cortex_prompt_flags::{ContextComposer, ContextConfig, FlagEffect, StaticEnvironment};
//!
//! let composer = ContextComposer::new(StaticEnvironment::default(), ContextConfig::default());
//! let composition = composer.compose("add a retry policy -u -test");
//!
//! assert_eq!(composition.clean_prompt, "add a retry policy");
//! assert!(composition.has_effect(FlagEffect::UltraThink));
//! assert!(composition.auto_applied_standards);
//! ```

pub mod classifier;
pub mod composer;
pub mod config;
pub mod environment;
pub mod help;
pub mod hook;
pub mod input;
pub mod parser;
pub mod project;
pub mod prompts;
pub mod registry;
pub mod session_log;

pub use classifier::{is_simple_query, should_apply_defaults};
pub use composer::{Composition, ContextComposer, ContextFragment, FragmentSource};
pub use config::{ContextConfig, LoggingConfig, PromptFlagsConfig};
pub use environment::{Environment, EnvironmentError, StaticEnvironment, SystemEnvironment};
pub use hook::{HookRunner, run_hook};
pub use input::HookInput;
pub use parser::{ParsedPrompt, parse_flags};
pub use registry::{FlagCategory, FlagEffect, FlagRegistry};
pub use session_log::{SessionLogEntry, SessionLogger};

use std::path::PathBuf;
use thiserror::Error;

fn config_location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum PromptFlagsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("Invalid configuration{}: {source}", config_location(.path))]
    ConfigParse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },
    #[error("Log location unavailable: no home directory")]
    NoLogLocation,
}

impl From<toml::de::Error> for PromptFlagsError {
    fn from(source: toml::de::Error) -> Self {
        PromptFlagsError::ConfigParse { path: None, source }
    }
}

pub type Result<T> = std::result::Result<T, PromptFlagsError>;
