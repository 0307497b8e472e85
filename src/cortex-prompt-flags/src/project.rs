//! Project ecosystem detection for `-ctx`.
//!
//! Looks for well-known marker files in the working directory and reports
//! the ecosystems (and package managers) they imply.

use crate::environment::{Environment, best_effort};

const PYTHON_MARKERS: &[&str] = &[
    "pyproject.toml",
    "setup.py",
    "requirements.txt",
    "environment.yml",
];

const PYTHON_TOOLS: &[(&str, &str)] = &[
    ("uv.lock", "uv"),
    ("poetry.lock", "Poetry"),
    ("Pipfile.lock", "Pipenv"),
    (".venv", "venv"),
    ("conda-meta", "Conda"),
];

/// Checked in order; the first lockfile found wins, npm otherwise.
const NODE_LOCKFILES: &[(&str, &str)] = &[
    ("yarn.lock", "Yarn"),
    ("pnpm-lock.yaml", "pnpm"),
    ("bun.lockb", "Bun"),
];

const ECOSYSTEMS: &[(&str, &str)] = &[
    ("Cargo.toml", "Rust"),
    ("go.mod", "Go"),
    ("pom.xml", "Java (Maven)"),
    ("build.gradle", "Java (Gradle)"),
    ("Gemfile", "Ruby"),
    ("composer.json", "PHP"),
    ("mix.exs", "Elixir"),
    ("project.clj", "Clojure"),
];

fn exists<E: Environment + ?Sized>(env: &E, relative: &str) -> bool {
    best_effort("marker file", env.path_exists(relative).map(Some)).unwrap_or(false)
}

/// Names of detected ecosystems, in a stable order.
pub fn detect_ecosystems<E: Environment + ?Sized>(env: &E) -> Vec<String> {
    let mut found = Vec::new();

    if PYTHON_MARKERS.iter().any(|marker| exists(env, marker)) {
        let tools: Vec<&str> = PYTHON_TOOLS
            .iter()
            .filter(|(marker, _)| exists(env, marker))
            .map(|(_, tool)| *tool)
            .collect();
        if tools.is_empty() {
            found.push("Python".to_string());
        } else {
            found.push(format!("Python ({})", tools.join(", ")));
        }
    }

    if exists(env, "package.json") {
        let manager = NODE_LOCKFILES
            .iter()
            .find(|(lockfile, _)| exists(env, lockfile))
            .map_or("npm", |(_, manager)| *manager);
        found.push(format!("Node.js ({manager})"));
    }

    found.extend(
        ECOSYSTEMS
            .iter()
            .filter(|(marker, _)| exists(env, marker))
            .map(|(_, name)| name.to_string()),
    );

    found
}

/// `[Project Context: ...]` fragment, or `None` when nothing was detected.
pub fn describe_project<E: Environment + ?Sized>(env: &E) -> Option<String> {
    let ecosystems = detect_ecosystems(env);
    if ecosystems.is_empty() {
        return None;
    }
    Some(format!("[Project Context: {}]", ecosystems.join(", ")))
}
