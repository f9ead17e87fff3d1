//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with the config directory pointed at a
//! scratch directory and verify outputs.

use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studydock"))
        .args(args)
        .env("STUDYDOCK_CONFIG_DIR", dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn scratch() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn test_config_get_default() {
    let dir = scratch();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "timer.study_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_set_persists() {
    let dir = scratch();
    let (stdout, _, code) = run_cli(&dir, &["config", "set", "timer.rounds", "6"]);
    assert_eq!(code, 0, "Config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, _) = run_cli(&dir, &["config", "get", "timer.rounds"]);
    assert_eq!(stdout.trim(), "6");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_bad_value() {
    let dir = scratch();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "audio.muted", "loud"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"), "{stderr}");
}

#[test]
fn test_config_get_unknown_key() {
    let dir = scratch();
    let (_, stderr, code) = run_cli(&dir, &["config", "get", "ui.dark_mode"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_and_reset() {
    let dir = scratch();
    run_cli(&dir, &["config", "set", "audio.muted", "true"]);
    let (stdout, _, code) = run_cli(&dir, &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(parsed["audio"]["muted"], true);

    let (_, _, code) = run_cli(&dir, &["config", "reset"]);
    assert_eq!(code, 0, "Config reset failed");
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "audio.muted"]);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_timer_simulate_first_study_phase() {
    let dir = scratch();
    let (stdout, _, code) = run_cli(&dir, &["timer", "simulate", "--ticks", "1500", "--muted"]);
    assert_eq!(code, 0, "Timer simulate failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    let view = &parsed["view"];
    assert_eq!(view["phase"], "break");
    assert_eq!(view["round"], 1);
    assert_eq!(view["remainingSecondsFormatted"], "05:00");
    assert_eq!(view["running"], true);

    let events = parsed["events"].as_array().expect("events");
    assert_eq!(events[0]["type"], "TimerStarted");
    assert_eq!(events[1]["type"], "PhaseChanged");
}

#[test]
fn test_timer_simulate_uses_saved_config() {
    let dir = scratch();
    run_cli(&dir, &["config", "set", "timer.study_minutes", "1"]);
    run_cli(&dir, &["config", "set", "timer.break_minutes", "1"]);
    run_cli(&dir, &["config", "set", "timer.rounds", "1"]);
    let (stdout, _, code) = run_cli(&dir, &["timer", "simulate", "--ticks", "120", "--muted"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(parsed["view"]["complete"], true);
    assert_eq!(parsed["view"]["progressFraction"], 1.0);
}

#[test]
fn test_timer_run_finishes_session() {
    let dir = scratch();
    let (stdout, _, code) = run_cli(
        &dir,
        &[
            "timer", "run", "--study", "1", "--break", "1", "--rounds", "1", "--muted",
            "--speed", "1000",
        ],
    );
    assert_eq!(code, 0, "Timer run failed");
    let last = stdout.lines().last().expect("view lines");
    let view: serde_json::Value = serde_json::from_str(last).expect("json");
    assert_eq!(view["complete"], true);
    assert_eq!(view["running"], false);
}

#[test]
fn test_timer_run_rejects_zero_speed() {
    let dir = scratch();
    let (_, stderr, code) = run_cli(&dir, &["timer", "run", "--speed", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid speed"));
}

#[test]
fn test_timer_run_rejects_vanishing_speed() {
    let dir = scratch();
    let (_, stderr, code) = run_cli(&dir, &["timer", "run", "--speed", "1e-300", "--muted"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid speed"), "{stderr}");
}

#[test]
fn test_drag_simulate_clamps_to_viewport() {
    let dir = scratch();
    let (stdout, _, code) = run_cli(
        &dir,
        &[
            "drag", "simulate", "--viewport", "800x600", "--widget", "200x150", "--from", "50,50",
            "--grab", "100,100", "--path", "790,10", "740,60",
        ],
    );
    assert_eq!(code, 0, "Drag simulate failed");
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("json"))
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["position"]["x"], 600.0);
    assert_eq!(lines[0]["position"]["y"], 0.0);
    assert_eq!(lines[1]["position"]["x"], 550.0);
    assert_eq!(lines[1]["position"]["y"], 50.0);
    assert_eq!(lines[2]["final"]["x"], 550.0);
}

#[test]
fn test_drag_simulate_rejects_bad_size() {
    let dir = scratch();
    let (_, _, code) = run_cli(
        &dir,
        &["drag", "simulate", "--viewport", "800", "--grab", "1,1", "--path", "2,2"],
    );
    assert_ne!(code, 0);
}
