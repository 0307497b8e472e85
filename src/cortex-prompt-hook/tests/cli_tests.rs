//! End-to-end tests for the `cortex-prompt-hook` binary.
//!
//! Every command runs in a temp working directory with `HOME` and the log
//! directory pointed inside it, so the user's own config and logs are never
//! touched.

use assert_cmd::Command;
use cortex_prompt_flags::prompts;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DATE_ONLY: &str = r"^\[Current Date: [A-Z][a-z]+ \d{1,2}, \d{4}\]\n$";

fn hook(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cortex-prompt-hook").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("GIT_DIR", tmp.path().join("no-repo"))
        .env("CORTEX_PROMPT_FLAGS_LOG_DIR", tmp.path().join("logs"))
        .env_remove("CORTEX_PROMPT_FLAGS_CONFIG")
        .env_remove("CORTEX_PROMPT_FLAGS_LOGGING")
        .env_remove("CORTEX_PROMPT_FLAGS_LOG");
    cmd
}

fn input(prompt: &str) -> String {
    serde_json::json!({ "prompt": prompt, "session_id": "test-session" }).to_string()
}

fn log_entries(dir: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(dir.join("prompt_hooks.jsonl"))
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_flags_expand_in_order() {
    let tmp = TempDir::new().unwrap();
    let output = hook(&tmp)
        .write_stdin(input("refactor the parser -u -refactor"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("[Current Date: "));
    assert!(stdout.ends_with('\n'));

    let standards = stdout.find(prompts::ENGINEERING_STANDARDS).unwrap();
    let ultrathink = stdout.find(prompts::ULTRATHINK).unwrap();
    let refactor = stdout.find(prompts::REFACTOR).unwrap();
    assert!(standards < ultrathink);
    assert!(ultrathink < refactor);
}

#[test]
fn test_greeting_gets_only_the_date() {
    let tmp = TempDir::new().unwrap();
    hook(&tmp)
        .write_stdin(input("hey there"))
        .assert()
        .success()
        .stdout(predicate::str::is_match(DATE_ONLY).unwrap())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_unknown_flags_are_ignored() {
    let tmp = TempDir::new().unwrap();
    hook(&tmp)
        .write_stdin(input("ls -la -zzz"))
        .assert()
        .success()
        .stdout(predicate::str::is_match(DATE_ONLY).unwrap());
}

#[test]
fn test_help_flag_lists_flags() {
    let tmp = TempDir::new().unwrap();
    hook(&tmp)
        .write_stdin(input("-hh"))
        .assert()
        .success()
        .stdout(predicate::str::contains("THINKING MODES"))
        .stdout(predicate::str::contains("-ultrathink"))
        .stdout(predicate::str::contains(prompts::ENGINEERING_STANDARDS).not());

    let entries = log_entries(&tmp.path().join("logs"));
    assert_eq!(entries[0]["clean_prompt"], "");
    assert_eq!(entries[0]["help_request"], true);
}

#[test]
fn test_project_context_from_working_directory() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("Cargo.toml"), "[package]\n").unwrap();

    let payload = serde_json::json!({
        "prompt": "what is here -ctx",
        "session_id": "s",
        "cwd": project,
    });
    hook(&tmp)
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("[Project Context: Rust]"));
}

/// An empty prompt is not a simple query, so it gets the date and standards.
fn assert_empty_prompt_output(stdout: Vec<u8>) {
    let stdout = String::from_utf8(stdout).unwrap();
    let (date, rest) = stdout.split_once('\n').unwrap();
    assert!(date.starts_with("[Current Date: "), "{date}");
    assert_eq!(rest, format!("{}\n", prompts::ENGINEERING_STANDARDS));
}

#[test]
fn test_malformed_input_is_treated_as_empty() {
    let tmp = TempDir::new().unwrap();
    let output = hook(&tmp).write_stdin("{not json").output().unwrap();
    assert!(output.status.success());
    assert_empty_prompt_output(output.stdout);

    let entries = log_entries(&tmp.path().join("logs"));
    assert_eq!(entries[0]["session_id"], "unknown");
    assert_eq!(entries[0]["original_prompt"], "");
    assert_eq!(entries[0]["auto_applied_standards"], true);
}

#[test]
fn test_invalid_utf8_input_is_recovered() {
    let tmp = TempDir::new().unwrap();
    let output = hook(&tmp).write_stdin(b"\xff".to_vec()).output().unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_empty_prompt_output(output.stdout);
    assert_eq!(log_entries(&tmp.path().join("logs"))[0]["session_id"], "unknown");
}

#[test]
fn test_invalid_utf8_inside_prompt_keeps_flags() {
    let tmp = TempDir::new().unwrap();
    hook(&tmp)
        .write_stdin(b"{\"prompt\": \"fix \xff -u\", \"session_id\": \"s\"}".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains(prompts::ULTRATHINK));

    let entries = log_entries(&tmp.path().join("logs"));
    assert_eq!(entries[0]["clean_prompt"], "fix \u{FFFD}");
    assert_eq!(entries[0]["applied_flags"], serde_json::json!(["u"]));
}

#[test]
fn test_config_can_disable_all_context() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("flags.toml");
    fs::write(
        &config,
        "[context]\ninclude_date = false\ninclude_git_branch = false\n",
    )
    .unwrap();

    hook(&tmp)
        .arg("--config")
        .arg(&config)
        .write_stdin(input("implement a cache"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(prompts::ENGINEERING_STANDARDS));

    hook(&tmp)
        .env("CORTEX_PROMPT_FLAGS_CONFIG", &config)
        .write_stdin(input("hello"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_config_is_hook_error() {
    let tmp = TempDir::new().unwrap();
    hook(&tmp)
        .arg("--config")
        .arg(tmp.path().join("missing.toml"))
        .write_stdin(input("hello"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("[Hook Error: "));
}

#[test]
fn test_list_flags() {
    let tmp = TempDir::new().unwrap();
    let output = hook(&tmp).arg("--list-flags").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for effect in cortex_prompt_flags::FlagEffect::ALL {
        for alias in effect.aliases() {
            assert!(stdout.contains(&format!("-{alias}")), "missing -{alias}");
        }
    }
    assert!(stdout.contains("COMMON COMBINATIONS"));
}

// ============================================================================
// Session log
// ============================================================================

#[test]
fn test_invocation_is_logged() {
    let tmp = TempDir::new().unwrap();
    let output = hook(&tmp)
        .write_stdin(input("write the migration -test -t"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries = log_entries(&tmp.path().join("logs"));
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry["session_id"], "test-session");
    assert_eq!(entry["clean_prompt"], "write the migration");
    assert_eq!(entry["flags"], serde_json::json!(["test", "t"]));
    assert_eq!(entry["applied_flags"], serde_json::json!(["test", "t"]));
    assert_eq!(entry["auto_applied_standards"], true);
    assert!(entry.get("help_request").is_none());
    assert_eq!(
        format!("{}\n", entry["injected_context"].as_str().unwrap()),
        String::from_utf8(output.stdout).unwrap()
    );
}

#[test]
fn test_log_appends_across_invocations() {
    let tmp = TempDir::new().unwrap();
    for prompt in ["first", "second -u"] {
        hook(&tmp).write_stdin(input(prompt)).assert().success();
    }

    let entries = log_entries(&tmp.path().join("logs"));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["original_prompt"], "second -u");
}

#[test]
fn test_log_dir_flag_and_no_log() {
    let tmp = TempDir::new().unwrap();
    let custom = tmp.path().join("custom");

    hook(&tmp)
        .arg("--log-dir")
        .arg(&custom)
        .write_stdin(input("hello"))
        .assert()
        .success();
    assert_eq!(log_entries(&custom).len(), 1);

    hook(&tmp)
        .arg("--no-log")
        .write_stdin(input("hello"))
        .assert()
        .success();
    assert!(!tmp.path().join("logs").join("prompt_hooks.jsonl").exists());
}

#[test]
fn test_unwritable_log_dir_does_not_change_output() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "a regular file").unwrap();

    let expected = hook(&tmp)
        .write_stdin(input("design the schema -p"))
        .output()
        .unwrap();

    hook(&tmp)
        .env("CORTEX_PROMPT_FLAGS_LOG_DIR", blocker.join("logs"))
        .write_stdin(input("design the schema -p"))
        .assert()
        .success()
        .stdout(expected.stdout)
        .stderr(predicate::str::is_empty());
}
