//! Integration tests for the logbridge CLI
//!
//! These run the actual binary and verify its event output.

use assert_cmd::Command;
use predicates::prelude::*;

fn logbridge_cmd() -> Command {
    Command::cargo_bin("logbridge").unwrap()
}

#[test]
fn test_help_flag() {
    logbridge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Structured-event bridge for hierarchical evaluator diagnostics",
        ));
}

#[test]
fn test_demo_emits_json_lines() {
    let output = logbridge_cmd().arg("demo").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one JSON object"))
        .collect();
    assert!(!events.is_empty());

    let start = events
        .iter()
        .find(|e| e["type"] == "activity_start")
        .expect("demo session starts an activity");
    assert_eq!(start["id"], 7);
    assert_eq!(start["kind"], "build");
    assert_eq!(start["fields"][0]["value"], "foo");

    let error = events
        .iter()
        .find(|e| e["type"] == "error_report")
        .expect("demo session reports an error");
    // Outermost frame first after ingest reversal
    assert_eq!(error["frames"][0]["hint"], "while calling f");
    assert_eq!(error["frames"][1]["hint"], "while evaluating x");
}

#[test]
fn test_demo_event_order() {
    let output = logbridge_cmd().arg("demo").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let types: Vec<String> = stdout
        .lines()
        .map(|line| {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            v["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        types,
        vec![
            "plain",
            "activity_start",
            "activity_result",
            "activity_stop",
            "error_report",
        ]
    );
}

#[test]
fn test_settings_accepted() {
    logbridge_cmd()
        .args(["settings", "--key", "warn-dirty", "--value", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warn-dirty = false"));
}

#[test]
fn test_settings_rejected_exits_nonzero() {
    logbridge_cmd()
        .args(["settings", "--key", "unknown-key", "--value", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected"));
}
