// Tests for the status-context-hook binary: stdin payload in, JSON result out.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn run(payload: &str) -> Value {
    let output = Command::cargo_bin("status-context-hook")
        .unwrap()
        .env_remove("STATUS_CONTEXT_LOG")
        .write_stdin(payload)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_prompt_submit_injects_datetime() {
    let payload = json!({
        "event": "prompt:submit",
        "data": { "prompt": "hello" },
        "config": { "include_git": false }
    });
    let result = run(&payload.to_string());
    assert_eq!(result["action"], "inject_context");
    assert_eq!(result["context_injection_role"], "user");
    assert!(result["context_injection"]
        .as_str()
        .unwrap()
        .starts_with("Today's date: "));
}

#[test]
fn test_everything_disabled_continues() {
    let payload = json!({
        "event": "prompt:submit",
        "config": { "include_git": false, "include_datetime": false }
    });
    let result = run(&payload.to_string());
    assert_eq!(result["action"], "continue");
    assert!(result.get("context_injection").is_none());
}

#[test]
fn test_unknown_event_continues() {
    let result = run(r#"{"event": "session:end"}"#);
    assert_eq!(result["action"], "continue");
}

#[test]
fn test_empty_stdin_continues() {
    let result = run("");
    assert_eq!(result["action"], "continue");
}

#[test]
fn test_invalid_payload_fails() {
    Command::cargo_bin("status-context-hook")
        .unwrap()
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_config_file_is_used_without_payload_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status.json");
    std::fs::write(&path, r#"{"include_git": false, "include_datetime": false}"#).unwrap();

    let output = Command::cargo_bin("status-context-hook")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .write_stdin(r#"{"event": "prompt:submit"}"#)
        .output()
        .unwrap();
    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["action"], "continue");
}

#[test]
fn test_describe_prints_registration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status.json");
    std::fs::write(&path, r#"{"priority": 7}"#).unwrap();

    Command::cargo_bin("status-context-hook")
        .unwrap()
        .arg("--describe")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"event":"prompt:submit","name":"hooks-status-context","priority":7}"#,
        ));
}

#[test]
fn test_malformed_payload_config_still_injects() {
    let payload = json!({
        "event": "prompt:submit",
        "config": {
            "include_git": "no",
            "git_include_commits": null,
            "git_status_max_lines": 2.0,
            "git_status_max_tracked": "3",
            "include_datetime": "yes"
        }
    });
    let result = run(&payload.to_string());
    assert_eq!(result["action"], "inject_context");
    assert!(result["context_injection"]
        .as_str()
        .unwrap()
        .starts_with("Today's date: "));
}
