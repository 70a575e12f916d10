//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. The
//! SESSIONFLOW_ENV=dev data directory keeps them off real user data.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "sessionflow-cli", "--"])
        .args(args)
        .env("SESSIONFLOW_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_task_add_and_list() {
    let (stdout, _, code) = run_cli(&["task", "add", "Smoke Task"]);
    assert_eq!(code, 0, "Task add failed");
    assert!(stdout.contains("Task added:"));

    let (stdout, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "Task list failed");
    assert!(stdout.contains("Smoke Task"));
}

#[test]
fn test_task_add_blank_rejected() {
    let (_, _, code) = run_cli(&["task", "add", "   "]);
    assert_ne!(code, 0);
}

#[test]
fn test_plan_show() {
    let (stdout, _, code) = run_cli(&["plan", "show"]);
    assert_eq!(code, 0, "Plan show failed");
    assert!(stdout.contains("target hours:"));
}

#[test]
fn test_plan_hours_clamped() {
    let (stdout, _, code) = run_cli(&["plan", "hours", "99"]);
    assert_eq!(code, 0, "Plan hours failed");
    assert!(stdout.contains("target hours: 12"));
}

#[test]
fn test_session_status_runs() {
    // Either a compiled preview or the empty-timeline notice.
    let (_, _, code) = run_cli(&["session", "status"]);
    assert_eq!(code, 0, "Session status failed");
}

#[test]
fn test_horizons_list() {
    let (stdout, _, code) = run_cli(&["horizons", "list"]);
    assert_eq!(code, 0, "Horizons list failed");
    assert!(stdout.contains("Someday / Later"));
}

#[test]
fn test_stats_today() {
    let (stdout, _, code) = run_cli(&["stats", "today"]);
    assert_eq!(code, 0, "Stats today failed");
    assert!(stdout.contains("focus score:"));
}

#[test]
fn test_stats_heatmap() {
    let (stdout, _, code) = run_cli(&["stats", "heatmap", "--days", "7"]);
    assert_eq!(code, 0, "Stats heatmap failed");
    let cells: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(cells.as_array().unwrap().len(), 7);
}

#[test]
fn test_config_get_set() {
    let (_, _, code) = run_cli(&["config", "set", "session.tick_ms", "200"]);
    assert_eq!(code, 0, "Config set failed");

    let (stdout, _, code) = run_cli(&["config", "get", "session.tick_ms"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "200");
}

#[test]
fn test_config_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
}

#[test]
fn test_settings_show_and_set() {
    let (_, _, code) = run_cli(&["settings", "set", "smart_breaks", "true"]);
    assert_eq!(code, 0, "Settings set failed");

    let (stdout, _, code) = run_cli(&["settings", "show"]);
    assert_eq!(code, 0, "Settings show failed");
    assert!(stdout.contains("smartBreaks"));
}
