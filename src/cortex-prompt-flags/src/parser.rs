//! Trailing flag parsing.
//!
//! Flags are only recognized as a run of `-name` tokens at the very end of
//! a prompt:
//!
//! ```rust
//! use cortex_prompt_flags::parse_flags;
//!
//! let parsed = parse_flags("refactor the parser -u -refactor");
//! assert_eq!(parsed.clean_prompt, "refactor the parser");
//! assert_eq!(parsed.flags, vec!["u", "refactor"]);
//! ```
//!
//! A prompt whose text genuinely ends in a hyphenated word
//! (`... compile with -static`) cannot be told apart from a flag and is
//! parsed as one.

use regex::Regex;
use std::sync::LazyLock;

/// Maximal run of whitespace-separated `-name` tokens anchored at the end.
static TRAILING_FLAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?:^|\s+)-[a-zA-Z_]+)+$").expect("trailing flags regex is valid")
});

/// A prompt split into its clean text and trailing flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPrompt {
    /// Prompt without the flag run, trimmed.
    pub clean_prompt: String,
    /// Flag names in order of appearance, without `-`, original case.
    pub flags: Vec<String>,
    /// The raw text that was removed, including separating whitespace.
    pub flag_suffix: String,
}

impl ParsedPrompt {
    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    /// True when the prompt held nothing but flags (or nothing at all).
    pub fn is_flags_only(&self) -> bool {
        self.clean_prompt.is_empty()
    }
}

/// Split `prompt` into clean text and its trailing flags.
pub fn parse_flags(prompt: &str) -> ParsedPrompt {
    let prompt = prompt.trim_end();

    let Some(run) = TRAILING_FLAGS.find(prompt) else {
        return ParsedPrompt {
            clean_prompt: prompt.trim().to_string(),
            ..Default::default()
        };
    };

    let flags = run
        .as_str()
        .split_whitespace()
        .filter_map(|token| token.strip_prefix('-'))
        .map(str::to_string)
        .collect();

    ParsedPrompt {
        clean_prompt: prompt[..run.start()].trim().to_string(),
        flags,
        flag_suffix: run.as_str().to_string(),
    }
}
