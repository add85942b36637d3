// Integration tests for the replay binary
//
// Tests the replay binary CLI behavior:
// - Command-line argument parsing
// - File loading and error handling
// - Replaying all or selected turns, with and without --verbose
// - Validating expected moves against the replayed decision

use std::path::PathBuf;
use std::process::Command;

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

/// Helper to run replay binary with arguments
fn run_replay(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_replay"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(args)
        .output()
        .expect("Failed to execute replay binary")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_replay_help() {
    let output = run_replay(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Usage: replay"), "Should show usage line");
    assert!(stdout.contains("--validate"));
    assert!(stdout.contains("--verbose"));
}

#[test]
fn test_replay_requires_log_file() {
    let output = run_replay(&[]);
    assert!(!output.status.success(), "Should fail with no arguments");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("LOG_FILE"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_replay_all() {
    let fixture = fixture_path("decisions.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "Replay should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Loaded 3 log entries"), "Should load 3 entries");
    assert!(stdout.contains("Replayed turns: 3"));
    assert!(stdout.contains("mismatched:   0"), "Logged decisions should replay identically");
    assert!(stdout.contains("fallbacks:    1"));
}

#[test]
fn test_replay_mismatch_is_reported() {
    let fixture = fixture_path("mismatch.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap()]);

    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Mismatched turns:"));
    assert!(stdout.contains("turn 0: logged left, replayed up"), "{}", stdout);
}

#[test]
fn test_replay_specific_turns() {
    let fixture = fixture_path("decisions.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--turns", "0,2"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Replayed turns: 2"));
}

#[test]
fn test_verbose_lists_areas_and_fallback_turns() {
    let fixture = fixture_path("decisions.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--verbose"]);

    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let row = |turn: &str| {
        stdout
            .lines()
            .find(|l| l.trim_start().starts_with(turn))
            .unwrap_or_default()
            .to_string()
    };

    assert!(stdout.contains("replayed"), "Should print the per-turn header");
    assert!(row("1 ").contains(" 30 "), "{}", stdout);
    assert!(row("2 ").ends_with("ok, fallback"), "{}", stdout);
}

#[test]
fn test_timed_out_turns_are_labelled_not_mismatched() {
    let fixture = fixture_path("timeouts.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap()]);

    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("mismatched:   0"), "{}", stdout);
    assert!(stdout.contains("Skipped turns: 1 (timed out), 2 (failed)"), "{}", stdout);
}

#[test]
fn test_validate_expected_moves_success() {
    let fixture = fixture_path("decisions.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--validate", "0:up,1:right"]);

    assert!(
        output.status.success(),
        "Validation should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout_of(&output).contains("2 expected move(s) reproduced"));
}

#[test]
fn test_validate_with_alternatives() {
    let fixture = fixture_path("decisions.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--validate", "2:up|down"]);

    assert!(output.status.success());
}

#[test]
fn test_validate_checks_the_replayed_move() {
    // Turn 0 was logged as "left" but the selector answers "up"
    let fixture = fixture_path("mismatch.jsonl");

    let replayed = run_replay(&[fixture.to_str().unwrap(), "--validate", "0:up"]);
    assert!(replayed.status.success());

    let logged = run_replay(&[fixture.to_str().unwrap(), "--validate", "0:left"]);
    assert!(!logged.status.success());
}

#[test]
fn test_validate_expected_moves_failure() {
    let fixture = fixture_path("decisions.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--validate", "1:left"]);

    assert!(!output.status.success(), "Validation should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Validation failed"));
}

#[test]
fn test_malformed_expectation_is_rejected() {
    let fixture = fixture_path("decisions.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--validate", "1-left"]);

    assert!(!output.status.success());
}

#[test]
fn test_nonexistent_log_file() {
    let output = run_replay(&["nonexistent.jsonl"]);

    assert!(!output.status.success(), "Should fail for a missing file");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error loading log file"));
}
