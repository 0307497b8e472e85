//! Help listing generated from the flag registry.

use crate::prompts::{AUTO_STANDARDS_NOTE, COMMON_COMBINATIONS, HELP_PREAMBLE};
use crate::registry::{FlagCategory, FlagEffect};

const ALIAS_COLUMN: usize = 26;

/// Aliases formatted as they are typed, e.g. `-u, -ultrathink`.
fn format_aliases(effect: FlagEffect) -> String {
    effect
        .aliases()
        .iter()
        .map(|alias| format!("-{alias}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every flag grouped by category, followed by common combinations.
pub fn flag_listing() -> String {
    let mut out = String::from("Here are all available prompt flags:\n");

    for category in FlagCategory::ALL {
        out.push_str(&format!("\n{}\n", category.title()));
        for effect in FlagEffect::ALL.iter().filter(|e| e.category() == category) {
            out.push_str(&format!(
                "- {:<width$}{}\n",
                format_aliases(*effect),
                effect.summary(),
                width = ALIAS_COLUMN
            ));
        }
    }

    out.push_str("\nCOMMON COMBINATIONS\n");
    for (label, flags, meaning) in COMMON_COMBINATIONS {
        out.push_str(&format!("{:<20}{:<16}({})\n", format!("{label}:"), flags, meaning));
    }

    out.push('\n');
    out.push_str(AUTO_STANDARDS_NOTE);
    out
}

/// Fragment emitted for `-hh`: asks the assistant to show the listing.
pub fn help_request() -> String {
    format!("{HELP_PREAMBLE}\n{}", flag_listing())
}
