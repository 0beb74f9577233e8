// The cargo_bin! macro requires build script setup that's overkill for simple tests.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_help_flag() {
    let mut cmd = Command::new(cargo_bin("taipan"));
    let output = cmd.arg("--help").output().expect("failed to execute");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--seed"));
    assert!(stdout.contains("--events"));
}

#[test]
fn test_events_stream_is_json_lines() {
    let output = Command::new(cargo_bin("taipan"))
        .args(["--seed", "7", "-t", "200", "--events", "--log-level", "warn"])
        .output()
        .expect("failed to execute");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.len() > 1);

    for line in &lines {
        let value: serde_json::Value =
            serde_json::from_str(line).unwrap_or_else(|e| panic!("bad line {line}: {e}"));
        assert!(value.is_object());
    }
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert!(first.get("type").is_some());

    let last: serde_json::Value = serde_json::from_str(lines[lines.len() - 1]).unwrap();
    assert!(last.get("net_worth").is_some());
    assert!(last.get("score").is_some());
}

#[test]
fn test_same_seed_same_output() {
    let run = || {
        Command::new(cargo_bin("taipan"))
            .args(["--seed", "99", "-t", "150", "--events", "--log-level", "off"])
            .output()
            .expect("failed to execute")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_summary_without_events() {
    Command::new(cargo_bin("taipan"))
        .args(["--firm", "Jardine", "-t", "20", "--start", "guns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Firm:      Jardine"))
        .stdout(predicate::str::contains("Net worth:"));
}

#[test]
fn test_missing_config_fails() {
    Command::new(cargo_bin("taipan"))
        .args(["--config", "/nonexistent/taipan.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config"));
}

#[test]
fn test_invalid_battle_probability_fails() {
    Command::new(cargo_bin("taipan"))
        .args(["--battle-probability", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("battle probability"));
}
