//! Context composition.
//!
//! The composer turns a raw prompt into an ordered list of fragments:
//!
//! 1. current date, then git branch (when available)
//! 2. engineering standards, when auto-applied
//! 3. one fragment per recognized flag, in the order the flags were typed
//!
//! Fragment order is part of the output contract: the host reads the
//! context top to bottom. Engineering standards appear at most once, however
//! they were requested; every other recognized flag contributes its own
//! fragment, repeats included.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::classifier::should_apply_defaults;
use crate::config::ContextConfig;
use crate::environment::{Environment, best_effort};
use crate::parser::parse_flags;
use crate::prompts::HELP_REQUEST_PROMPT;
use crate::registry::{FlagEffect, FlagRegistry};

/// Where a fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSource {
    Date,
    GitBranch,
    /// Engineering standards injected without an explicit flag.
    AutoStandards,
    Flag(FlagEffect),
}

impl FragmentSource {
    fn effect(&self) -> Option<FlagEffect> {
        match self {
            Self::AutoStandards => Some(FlagEffect::EngineeringStandards),
            Self::Flag(effect) => Some(*effect),
            Self::Date | Self::GitBranch => None,
        }
    }
}

/// A non-empty block of context text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFragment {
    pub source: FragmentSource,
    pub text: String,
}

impl ContextFragment {
    /// Build a fragment, or `None` when the text is blank.
    pub fn new(source: FragmentSource, text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            source,
            text: text.to_string(),
        })
    }

    /// `[Current Date: August 4, 2025]`
    pub fn date(now: &DateTime<Local>) -> Self {
        Self {
            source: FragmentSource::Date,
            text: format!("[Current Date: {}]", format_date(now)),
        }
    }

    /// `[Git Branch: main]`
    pub fn git_branch(branch: &str) -> Option<Self> {
        let branch = branch.trim();
        if branch.is_empty() {
            return None;
        }
        Some(Self {
            source: FragmentSource::GitBranch,
            text: format!("[Git Branch: {branch}]"),
        })
    }
}

/// Long-form date, e.g. `August 4, 2025`.
pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%B %-d, %Y").to_string()
}

/// Result of composing one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub timestamp: DateTime<Local>,
    pub original_prompt: String,
    /// Prompt without flags, as parsed.
    pub clean_prompt: String,
    /// The clean prompt, or a help request stand-in when the prompt held
    /// only a help flag.
    pub effective_prompt: String,
    /// Parsed flags as typed.
    pub flags: Vec<String>,
    /// Recognized flags whose effect was applied, as typed.
    pub applied_flags: Vec<String>,
    pub help_requested: bool,
    pub auto_applied_standards: bool,
    pub fragments: Vec<ContextFragment>,
}

impl Composition {
    /// Fragments joined by newlines, `None` when nothing was produced.
    pub fn context(&self) -> Option<String> {
        if self.fragments.is_empty() {
            return None;
        }
        Some(
            self.fragments
                .iter()
                .map(|fragment| fragment.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    pub fn has_effect(&self, effect: FlagEffect) -> bool {
        self.fragments
            .iter()
            .any(|fragment| fragment.source.effect() == Some(effect))
    }

    /// Append a fragment. Engineering standards are kept to one copy.
    fn push(&mut self, fragment: Option<ContextFragment>) {
        let Some(fragment) = fragment else {
            return;
        };
        let standards = FlagEffect::EngineeringStandards;
        if fragment.source.effect() == Some(standards) && self.has_effect(standards) {
            debug!("engineering standards already applied; skipping duplicate");
            return;
        }
        self.fragments.push(fragment);
    }
}

/// Builds the context block for a prompt.
pub struct ContextComposer<'a, E: Environment> {
    registry: &'a FlagRegistry,
    environment: E,
    config: ContextConfig,
}

impl<E: Environment> ContextComposer<'static, E> {
    /// Composer over the built-in registry.
    pub fn new(environment: E, config: ContextConfig) -> Self {
        Self::with_registry(FlagRegistry::builtin(), environment, config)
    }
}

impl<'a, E: Environment> ContextComposer<'a, E> {
    pub fn with_registry(registry: &'a FlagRegistry, environment: E, config: ContextConfig) -> Self {
        Self {
            registry,
            environment,
            config,
        }
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn compose(&self, prompt: &str) -> Composition {
        let parsed = parse_flags(prompt);
        let resolved: Vec<(&String, Option<FlagEffect>)> = parsed
            .flags
            .iter()
            .map(|flag| (flag, self.registry.lookup(flag)))
            .collect();
        let help_requested = resolved
            .iter()
            .any(|(_, effect)| effect.is_some_and(|e| e.is_help()));

        let effective_prompt = if help_requested && parsed.clean_prompt.is_empty() {
            HELP_REQUEST_PROMPT.to_string()
        } else {
            parsed.clean_prompt.clone()
        };

        let mut composition = Composition {
            timestamp: self.environment.now(),
            original_prompt: prompt.to_string(),
            clean_prompt: parsed.clean_prompt.clone(),
            effective_prompt,
            flags: parsed.flags.clone(),
            applied_flags: Vec::new(),
            help_requested,
            auto_applied_standards: false,
            fragments: Vec::new(),
        };

        if self.config.include_date {
            let date = ContextFragment::date(&composition.timestamp);
            composition.push(Some(date));
        }
        if self.config.include_git_branch {
            let branch = best_effort("git branch", self.environment.git_branch());
            composition.push(branch.as_deref().and_then(ContextFragment::git_branch));
        }

        if !help_requested
            && self.config.auto_standards
            && should_apply_defaults(&composition.effective_prompt, &parsed.flags, self.registry)
        {
            let standards = FlagEffect::EngineeringStandards.render(&self.environment);
            composition.push(
                standards.and_then(|text| ContextFragment::new(FragmentSource::AutoStandards, text)),
            );
            composition.auto_applied_standards = true;
        }

        for (flag, effect) in resolved {
            let Some(effect) = effect else {
                debug!(flag = %flag, "ignoring unknown flag");
                continue;
            };
            if help_requested && !effect.is_help() {
                debug!(flag = %flag, "flag suppressed by help request");
                continue;
            }
            composition.applied_flags.push(flag.clone());
            let text = effect.render(&self.environment);
            composition.push(
                text.and_then(|text| ContextFragment::new(FragmentSource::Flag(effect), text)),
            );
        }

        composition
    }
}
