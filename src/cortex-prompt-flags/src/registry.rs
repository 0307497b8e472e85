//! Flag registry.
//!
//! Every distinct effect a flag can select is one [`FlagEffect`] variant.
//! Flag names map onto effects through a separate alias table owned by
//! [`FlagRegistry`], so several spellings (`-u`, `-ultrathink`) share one
//! effect without duplicating its text.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::environment::Environment;
use crate::{help, project, prompts};

/// Grouping used when listing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagCategory {
    Thinking,
    Quality,
    Development,
    Compression,
    Other,
}

impl FlagCategory {
    /// Categories in listing order.
    pub const ALL: [FlagCategory; 5] = [
        FlagCategory::Thinking,
        FlagCategory::Quality,
        FlagCategory::Development,
        FlagCategory::Compression,
        FlagCategory::Other,
    ];

    /// Heading shown in the help listing.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Thinking => "THINKING MODES",
            Self::Quality => "QUALITY & STANDARDS",
            Self::Development => "DEVELOPMENT MODES",
            Self::Compression => "COMPRESSION MODES",
            Self::Other => "OTHER OPTIONS",
        }
    }
}

impl std::fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// An effect selected by one or more flag aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagEffect {
    /// Maximum reasoning effort.
    UltraThink,
    /// Elevated reasoning effort.
    ThinkHard,
    /// Step-by-step reasoning.
    Think,
    /// Production quality, no shortcuts. Also the auto-applied default.
    EngineeringStandards,
    CleanCode,
    Plan,
    Verbose,
    Security,
    Testing,
    Documentation,
    Performance,
    Review,
    Refactor,
    Debug,
    ApiDesign,
    NoGuess,
    /// Reports ecosystems detected from marker files in the working directory.
    ProjectContext,
    Compression,
    UltraCompression,
    /// Help listing. Suppresses defaults and every other flag.
    Help,
}

impl FlagEffect {
    /// All effects in registry order.
    pub const ALL: [FlagEffect; 20] = [
        FlagEffect::UltraThink,
        FlagEffect::ThinkHard,
        FlagEffect::Think,
        FlagEffect::EngineeringStandards,
        FlagEffect::CleanCode,
        FlagEffect::Plan,
        FlagEffect::Verbose,
        FlagEffect::Security,
        FlagEffect::Testing,
        FlagEffect::Documentation,
        FlagEffect::Performance,
        FlagEffect::Review,
        FlagEffect::Refactor,
        FlagEffect::Debug,
        FlagEffect::ApiDesign,
        FlagEffect::NoGuess,
        FlagEffect::ProjectContext,
        FlagEffect::Compression,
        FlagEffect::UltraCompression,
        FlagEffect::Help,
    ];

    /// Flag names selecting this effect, shortest first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::UltraThink => &["u", "ultrathink"],
            Self::ThinkHard => &["th", "think_hard"],
            Self::Think => &["t", "think"],
            Self::EngineeringStandards => &["e", "eng", "standards"],
            Self::CleanCode => &["clean"],
            Self::Plan => &["p", "plan"],
            Self::Verbose => &["v", "verbose"],
            Self::Security => &["s", "sec", "security"],
            Self::Testing => &["test"],
            Self::Documentation => &["doc"],
            Self::Performance => &["perf"],
            Self::Review => &["review"],
            Self::Refactor => &["refactor"],
            Self::Debug => &["debug"],
            Self::ApiDesign => &["api"],
            Self::NoGuess => &["ng", "no_guess"],
            Self::ProjectContext => &["ctx", "context"],
            Self::Compression => &["c", "compress"],
            Self::UltraCompression => &["uc", "ultracompressed"],
            Self::Help => &["hh", "hhelp"],
        }
    }

    /// Canonical (longest) flag name.
    pub fn name(&self) -> &'static str {
        self.aliases().last().copied().unwrap_or_default()
    }

    pub fn category(&self) -> FlagCategory {
        match self {
            Self::UltraThink | Self::ThinkHard | Self::Think => FlagCategory::Thinking,
            Self::EngineeringStandards | Self::CleanCode => FlagCategory::Quality,
            Self::Plan
            | Self::Verbose
            | Self::Security
            | Self::Testing
            | Self::Documentation
            | Self::Performance
            | Self::Review
            | Self::Refactor
            | Self::Debug
            | Self::ApiDesign => FlagCategory::Development,
            Self::Compression | Self::UltraCompression => FlagCategory::Compression,
            Self::NoGuess | Self::ProjectContext | Self::Help => FlagCategory::Other,
        }
    }

    /// One-line description for listings.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::UltraThink => "Maximum thinking budget for complex problems",
            Self::ThinkHard => "Enhanced thinking for challenging tasks",
            Self::Think => "Step-by-step thinking for standard problems",
            Self::EngineeringStandards => {
                "Apply engineering standards (no shortcuts, production-ready)"
            }
            Self::CleanCode => "Follow clean code principles (SOLID, DRY, meaningful names)",
            Self::Plan => "Create detailed plan before implementation",
            Self::Verbose => "Include verbose explanations and detailed comments",
            Self::Security => "Focus on security best practices",
            Self::Testing => "Include comprehensive unit tests",
            Self::Documentation => "Provide detailed documentation with examples",
            Self::Performance => "Optimize for performance with benchmarks",
            Self::Review => "Critical code review mode",
            Self::Refactor => "Refactor for clarity and maintainability",
            Self::Debug => "Systematic debugging approach",
            Self::ApiDesign => "API design best practices",
            Self::NoGuess => "Never guess; ask for clarification instead",
            Self::ProjectContext => "Include project context (package managers, tools)",
            Self::Compression => "Enable token compression with abbreviations and symbols",
            Self::UltraCompression => "Maximum compression mode (30-50% token reduction)",
            Self::Help => "Show this help message",
        }
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help)
    }

    pub fn is_engineering_standards(&self) -> bool {
        matches!(self, Self::EngineeringStandards)
    }

    /// Static instruction text, `None` for effects rendered from live state.
    pub fn instructions(&self) -> Option<&'static str> {
        let text = match self {
            Self::UltraThink => prompts::ULTRATHINK,
            Self::ThinkHard => prompts::THINK_HARD,
            Self::Think => prompts::THINK,
            Self::EngineeringStandards => prompts::ENGINEERING_STANDARDS,
            Self::CleanCode => prompts::CLEAN_CODE,
            Self::Plan => prompts::PLAN,
            Self::Verbose => prompts::VERBOSE,
            Self::Security => prompts::SECURITY,
            Self::Testing => prompts::TESTING,
            Self::Documentation => prompts::DOCUMENTATION,
            Self::Performance => prompts::PERFORMANCE,
            Self::Review => prompts::REVIEW,
            Self::Refactor => prompts::REFACTOR,
            Self::Debug => prompts::DEBUG,
            Self::ApiDesign => prompts::API_DESIGN,
            Self::NoGuess => prompts::NO_GUESS,
            Self::Compression => prompts::COMPRESSION,
            Self::UltraCompression => prompts::ULTRA_COMPRESSION,
            Self::ProjectContext | Self::Help => return None,
        };
        Some(text)
    }

    /// Render the fragment for this effect.
    ///
    /// Returns `None` when the effect has nothing to say (for example no
    /// project marker files were found).
    pub fn render<E: Environment + ?Sized>(&self, env: &E) -> Option<String> {
        match self {
            Self::ProjectContext => project::describe_project(env),
            Self::Help => Some(help::help_request()),
            _ => self.instructions().map(str::to_string),
        }
    }
}

impl std::fmt::Display for FlagEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

static BUILTIN: LazyLock<FlagRegistry> = LazyLock::new(FlagRegistry::new);

/// Case-insensitive alias → effect lookup table.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    aliases: HashMap<&'static str, FlagEffect>,
}

impl FlagRegistry {
    /// Build a registry holding every built-in effect.
    pub fn new() -> Self {
        let aliases = FlagEffect::ALL
            .iter()
            .flat_map(|effect| effect.aliases().iter().map(move |alias| (*alias, *effect)))
            .collect();
        Self { aliases }
    }

    /// Shared built-in registry.
    pub fn builtin() -> &'static FlagRegistry {
        &BUILTIN
    }

    /// Resolve a flag name. Lookup ignores case; unknown names yield `None`.
    pub fn lookup(&self, name: &str) -> Option<FlagEffect> {
        if let Some(effect) = self.aliases.get(name) {
            return Some(*effect);
        }
        self.aliases.get(name.to_ascii_lowercase().as_str()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Effects in registry order.
    pub fn effects(&self) -> impl Iterator<Item = FlagEffect> + '_ {
        FlagEffect::ALL
            .into_iter()
            .filter(|effect| effect.aliases().iter().any(|a| self.aliases.contains_key(a)))
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::new()
    }
}
