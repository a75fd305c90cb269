//! Integration tests for the cadence binary.
//!
//! These tests verify end-to-end behavior including:
//! - Program listing and phase plans
//! - Running a workout with an accelerated tick
//! - Journal recording and history output

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("cadence"))
}

fn write_program(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write program file");
    path
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interval workout timer"));
}

#[test]
fn test_list_shows_builtin_programs() {
    cli()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabata"))
        .stdout(predicate::str::contains("quick"))
        .stdout(predicate::str::contains("circuit"));
}

#[test]
fn test_plan_from_file_totals_phase_sequence() {
    let temp_dir = setup_test_dir();
    let path = write_program(
        &temp_dir,
        "pair.toml",
        r#"
name = "Pair"
sets = 2
rest_between_exercises = 5
rest_between_sets = 15

[[exercises]]
name = "Squats"
duration = 10

[[exercises]]
name = "Push-ups"
duration = 20
"#,
    );

    cli()
        .arg("plan")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Squats"))
        .stdout(predicate::str::contains("Set Rest"))
        .stdout(predicate::str::contains("Total: 90s (1:30)"));
}

#[test]
fn test_plan_single_exercise_has_no_rests() {
    let temp_dir = setup_test_dir();
    let path = write_program(
        &temp_dir,
        "solo.json",
        r#"{"name":"Solo","exercises":[{"name":"Plank","duration":30}],"sets":1}"#,
    );

    cli()
        .arg("plan")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest").not())
        .stdout(predicate::str::contains("Total: 35s"));
}

#[test]
fn test_unknown_program_fails() {
    cli()
        .arg("plan")
        .arg("--program")
        .arg("marathon")
        .assert()
        .failure();
}

#[test]
fn test_invalid_program_file_fails() {
    let temp_dir = setup_test_dir();
    let path = write_program(
        &temp_dir,
        "empty.json",
        r#"{"name":"Empty","exercises":[],"sets":1}"#,
    );

    cli()
        .arg("run")
        .arg("--file")
        .arg(&path)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--tick-ms")
        .arg("1")
        .assert()
        .failure();
}

#[test]
fn test_run_completes_and_journals() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("run")
        .arg("--program")
        .arg("quick")
        .arg("--tick-ms")
        .arg("1")
        .arg("--quiet")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout complete"))
        .stdout(predicate::str::contains("Elapsed: 2:05 of 2:05"));

    let journal =
        fs::read_to_string(data_dir.join("journal.jsonl")).expect("Failed to read journal");
    let record: serde_json::Value =
        serde_json::from_str(journal.lines().next().expect("empty journal")).unwrap();
    assert_eq!(record["program_name"], "Quick Start");
    assert_eq!(record["outcome"], "completed");
    assert_eq!(record["elapsed_seconds"], 125);
    assert_eq!(record["total_seconds"], 125);
}

#[test]
fn test_run_renders_phases() {
    let temp_dir = setup_test_dir();
    let path = write_program(
        &temp_dir,
        "short.json",
        r#"{"name":"Short","exercises":[{"name":"Jumps","duration":2},{"name":"Hold","duration":0}],
            "sets":1,"rest_between_exercises":1}"#,
    );

    cli()
        .arg("run")
        .arg("--file")
        .arg(&path)
        .arg("--tick-ms")
        .arg("1")
        .arg("--no-journal")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Get Ready"))
        .stdout(predicate::str::contains("Jumps"))
        .stdout(predicate::str::contains("next: Hold"))
        .stdout(predicate::str::contains("Workout complete"));

    assert!(!temp_dir.path().join("journal.jsonl").exists());
}

#[test]
fn test_stop_from_stdin_aborts() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("run")
        .arg("--program")
        .arg("circuit")
        .arg("--tick-ms")
        .arg("50")
        .arg("--quiet")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout stopped"));

    let journal = fs::read_to_string(temp_dir.path().join("journal.jsonl")).unwrap();
    let lines: Vec<_> = journal.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["outcome"], "aborted");
    assert_eq!(record["program_name"], "Full Body Circuit");
    assert_eq!(record["total_seconds"], 860);
}

#[test]
fn test_history_lists_recent_runs() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts recorded yet"));

    for _ in 0..2 {
        cli()
            .arg("run")
            .arg("--program")
            .arg("quick")
            .arg("--tick-ms")
            .arg("1")
            .arg("--quiet")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick Start").count(2))
        .stdout(predicate::str::contains("completed"));
}
