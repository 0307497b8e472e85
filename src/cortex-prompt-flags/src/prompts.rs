//! Instruction text injected for each flag.
//!
//! The wording is content, not contract: it can be tuned freely as long as
//! each block keeps its intent.

pub const ULTRATHINK: &str = "Use the maximum amount of ultrathink. Take all the time you need. \
It's much better if you do too much research and thinking than not enough.";

pub const THINK_HARD: &str = "Think hard about this problem. Consider multiple approaches and \
evaluate trade-offs before implementing.";

pub const THINK: &str = "Think step by step through this problem before implementing.";

/// Applied for `-e` and auto-applied to substantial work.
pub const ENGINEERING_STANDARDS: &str = r#"Follow the project's principal engineering standards. No shortcuts, stubs, or hardcoded values. We build it right the first time: clean, robust, and production ready. No halfway measures.

Keep it tight. Use the simplest solution that meets the need with high quality. Do not overengineer. Do not create new files, layers, or abstractions unless they are clearly necessary. Every line of code should earn its place. Simplicity is earned through understanding, not guesswork.

Make it clean. Make it count.

If you encounter uncertainty, lack context, or are not confident in the solution, stop. Do not guess or make things up. It is not only okay, it is expected, to ask for clarification or help. Excellence includes knowing when to pause."#;

pub const CLEAN_CODE: &str = "Apply clean code principles: meaningful names, small functions, \
single responsibility, DRY, and SOLID principles. Code should be self-documenting.";

pub const PLAN: &str = "Create a detailed plan before starting implementation. Break down the \
task into clear steps and identify potential challenges.";

pub const VERBOSE: &str = "Be verbose in your explanations. Include detailed comments explaining \
the why behind decisions, not just the what.";

pub const SECURITY: &str = "Focus on security best practices. Consider potential vulnerabilities, \
input validation, authentication, and data protection.";

pub const TESTING: &str = "Include comprehensive unit tests for all functionality. Follow TDD \
principles where appropriate. Tests should be clear, focused, and cover edge cases.";

pub const DOCUMENTATION: &str = "Provide detailed documentation with examples. Include doc \
comments, type information, and usage examples. Documentation should be clear to someone \
unfamiliar with the codebase.";

pub const PERFORMANCE: &str = "Optimize for performance. Consider algorithmic complexity, memory \
usage, and potential bottlenecks. Include benchmarks where relevant.";

pub const REVIEW: &str = "Review this code critically. Look for bugs, code smells, performance \
issues, security vulnerabilities, and suggest improvements. Be thorough but constructive.";

pub const REFACTOR: &str = "Refactor for clarity and maintainability. Improve naming, reduce \
complexity, eliminate duplication, and enhance readability without changing functionality.";

pub const DEBUG: &str = "Debug systematically. Add logging, check assumptions, trace execution \
flow, and identify the root cause before proposing fixes.";

pub const API_DESIGN: &str = "Follow REST/GraphQL best practices. Design clear, consistent, and \
well-documented APIs. Consider versioning, error handling, and client developer experience.";

pub const NO_GUESS: &str = "Do not guess or make assumptions. If something is unclear or you lack \
necessary context, stop and ask for clarification. It's better to ask than to implement \
incorrectly.";

pub const COMPRESSION: &str = "Use compressed communication to reduce token usage. Apply \
technical abbreviations (cfg -> configuration, impl -> implementation, perf -> performance) and \
symbols (-> leads to, ✓ completed, ⚠ warning, 🛡 security, ⚡ performance). Compress redundant \
phrases while maintaining information quality.";

pub const ULTRA_COMPRESSION: &str = "Activate maximum token compression. Use symbol-enhanced \
communication: -> (leads to), => (transforms), & (and), | (or), ✓ (done), ✗ (failed), \
◐ (in progress), ⚡ (perf), 🛡 (sec), 📦 (deploy). Abbreviate: cfg, impl, arch, perf, env, req, \
deps, val, docs, auth. Remove redundancy, compress whitespace, maintain meaning.";

/// Prefix of the help fragment, followed by the generated flag listing.
pub const HELP_PREAMBLE: &str = "The user has just asked for help understanding the prompt \
flags. Please display the following help message:";

/// Substitute prompt used when the prompt consisted only of a help flag.
pub const HELP_REQUEST_PROMPT: &str = "Show available hook flags";

pub const COMMON_COMBINATIONS: &[(&str, &str, &str)] = &[
    ("Complex problem", "-u -p", "ultrathink + plan"),
    ("Production feature", "-e -test -doc", "standards + tests + docs"),
    ("Code review", "-review -u", "review + deep thinking"),
    ("Quick fix", "(no flags)", "skips engineering standards"),
    ("Debug issue", "-debug -v -u", "debug + verbose + ultrathink"),
    ("Token optimization", "-uc -p", "ultra compressed + plan"),
    ("Efficient analysis", "-c -th", "compressed + think hard"),
];

pub const AUTO_STANDARDS_NOTE: &str = "Note: Engineering standards (-e) are auto-applied for \
substantial work unless you're asking simple questions.";
