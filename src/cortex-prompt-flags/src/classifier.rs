//! Decides whether engineering standards are auto-applied.
//!
//! Standards are injected for substantial work and skipped for quick
//! lookups, shell-like commands and small talk.

use regex::Regex;
use std::sync::LazyLock;

use crate::registry::FlagRegistry;

/// Prompts matching any of these (lowercased, leading whitespace trimmed)
/// are simple queries.
static SIMPLE_QUERY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Shell navigation and interrogatives
        r"^(ls|dir|pwd|cd|cat|grep|find|which|what|where|who|when|how much|how many)\b",
        // Information retrieval
        r"^(show|list|display|get|fetch)\s+(me\s+)?(the\s+)?",
        r"^\?",
        // Greetings and closings
        r"^(hi|hello|hey|thanks|thank you|bye)\b",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("simple query regex is valid"))
    .collect()
});

/// Whether the prompt is a quick question or command rather than work.
pub fn is_simple_query(prompt: &str) -> bool {
    let prompt = prompt.trim_start().to_lowercase();
    SIMPLE_QUERY_PATTERNS.iter().any(|re| re.is_match(&prompt))
}

/// Whether baseline engineering standards should be appended.
///
/// False when a help flag or an explicit standards flag is present, or when
/// the prompt is a [simple query](is_simple_query).
pub fn should_apply_defaults(clean_prompt: &str, flags: &[String], registry: &FlagRegistry) -> bool {
    let explicit = flags
        .iter()
        .filter_map(|flag| registry.lookup(flag))
        .any(|effect| effect.is_help() || effect.is_engineering_standards());

    !explicit && !is_simple_query(clean_prompt)
}
