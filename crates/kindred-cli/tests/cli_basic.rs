//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temp dir, so config
//! writes never touch the real user config.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_kindred"))
        .args(args)
        .env("HOME", home)
        .env_remove("KINDRED_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

const FIXTURE: &str = r#"{
  "preferences": {
    "alex": {
      "date_suggestion_days": ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"],
      "date_suggestion_time_preference": "evening"
    }
  },
  "profiles": {
    "sam": {
      "display_name": "Sam",
      "love_language": "touch",
      "communication_style": "playful"
    }
  }
}"#;

fn setup() -> (TempDir, String) {
    let home = tempfile::tempdir().unwrap();
    let fixture = home.path().join("fixture.json");
    std::fs::write(&fixture, FIXTURE).unwrap();
    let fixture = fixture.to_string_lossy().to_string();
    (home, fixture)
}

#[test]
fn test_config_list_shows_defaults() {
    let (home, _) = setup();
    let config = run_json(home.path(), &["config", "list"]);
    assert_eq!(config["api"]["base_url"], "http://localhost:54321");
    assert_eq!(config["scheduler"]["probe_ceiling_minutes"], 120);
    assert!(home.path().join(".config/kindred/config.toml").exists());
}

#[test]
fn test_config_set_then_get() {
    let (home, _) = setup();
    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "scheduler.evening_hour", "20"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "scheduler.evening_hour"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "20");
}

#[test]
fn test_config_rejects_unknown_key() {
    let (home, _) = setup();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "scheduler.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_schedule_daily_without_preferences_is_null() {
    let (home, fixture) = setup();
    let slot = run_json(home.path(), &["--fixture", &fixture, "schedule", "daily", "nobody"]);
    assert!(slot.is_null());
}

#[test]
fn test_schedule_dates_caps_at_three() {
    let (home, fixture) = setup();
    let slots = run_json(
        home.path(),
        &["--fixture", &fixture, "schedule", "dates", "alex", "--partner", "sam"],
    );
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert!(slots.iter().all(|s| s["notification_type"] == "date_suggestion"));
}

#[test]
fn test_suggest_messages_primary_first() {
    let (home, fixture) = setup();
    let messages = run_json(
        home.path(),
        &[
            "--fixture", &fixture, "suggest", "messages", "appreciation",
            "--love-language", "words", "--style", "direct", "--name", "Sam",
        ],
    );
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["tone"], "direct");
    assert_eq!(messages[0]["confidence"], 90);
    assert_eq!(messages[1]["confidence"], 70);
    assert!(messages.iter().all(|m| !m["text"].as_str().unwrap().contains("{name}")));
}

#[test]
fn test_suggest_refresh_leads_with_requested_type() {
    let (home, fixture) = setup();
    let messages = run_json(
        home.path(),
        &["--fixture", &fixture, "suggest", "refresh", "support", "alex", "sam"],
    );
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["suggestion_type"], "support");
    assert_eq!(messages[0]["love_language_alignment"], "touch");
}

#[test]
fn test_suggest_need_space() {
    let (home, fixture) = setup();
    let response = run_json(
        home.path(),
        &["--fixture", &fixture, "suggest", "need", "--category", "space"],
    );
    assert_eq!(response["messages"].as_array().unwrap().len(), 1);
    assert_eq!(response["actions"].as_array().unwrap().len(), 2);
    assert!(response["safety_note"].is_string());
}

#[test]
fn test_suggest_need_store_and_record_usage() {
    let (home, fixture) = setup();
    let stored = run_json(
        home.path(),
        &[
            "--fixture", &fixture, "suggest", "need", "--category", "affection",
            "--requester", "sam", "--receiver", "alex", "--context", "Long week", "--store",
        ],
    );
    let id = stored["suggestion_id"].as_str().unwrap().to_string();
    assert!(!stored["response"]["messages"].as_array().unwrap().is_empty());

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&fixture).unwrap()).unwrap();
    assert_eq!(saved["suggestions"][0]["id"], id.as_str());
    assert_eq!(saved["suggestions"][0]["need_category"], "affection");

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["--fixture", &fixture, "suggest", "usage", &id, "1", "--feedback", "worked"],
    );
    assert_eq!(code, 0, "{stderr}");
    assert_eq!(stdout.trim(), "ok");

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&fixture).unwrap()).unwrap();
    assert_eq!(saved["usage"][id.as_str()]["used_index"], 1);
}

#[test]
fn test_suggest_usage_unknown_id_fails() {
    let (home, fixture) = setup();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["--fixture", &fixture, "suggest", "usage", "missing", "0"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_suggest_date_uses_profile() {
    let (home, fixture) = setup();
    let idea = run_json(home.path(), &["--fixture", &fixture, "suggest", "date", "sam"]);
    assert_eq!(idea["title"], "Massage and slow dance night in");
}

#[test]
fn test_invalid_love_language_is_rejected() {
    let (home, fixture) = setup();
    let (_, _, code) = run_cli(
        home.path(),
        &["--fixture", &fixture, "suggest", "messages", "appreciation", "--love-language", "poetry"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_debug_log_reports_backend_on_stderr() {
    let (home, fixture) = setup();
    let output = Command::new(env!("CARGO_BIN_EXE_kindred"))
        .args(["--fixture", &fixture, "schedule", "daily", "nobody"])
        .env("HOME", home.path())
        .env_remove("KINDRED_ENV")
        .env("RUST_LOG", "debug")
        .output()
        .expect("Failed to execute CLI command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("using fixture backend"), "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "null");
}
