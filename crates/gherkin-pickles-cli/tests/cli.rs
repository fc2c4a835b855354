#![expect(clippy::expect_used, reason = "tests fail loudly when the binary misbehaves")]
//! Smoke tests for the `gherkin-pickles` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use rstest::{fixture, rstest};
use serde_json::Value;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[fixture]
fn command() -> Command {
    let mut command = Command::cargo_bin("gherkin-pickles").expect("binary exists");
    command.env_remove("GHERKIN_PICKLES_LOG_LEVEL");
    command
}

fn events(stdout: &[u8]) -> Vec<Value> {
    std::str::from_utf8(stdout)
        .expect("utf8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect()
}

fn types(events: &[Value]) -> Vec<&str> {
    events
        .iter()
        .map(|event| event["type"].as_str().unwrap_or_default())
        .collect()
}

#[rstest]
fn feature_file_emits_every_event_kind(mut command: Command) {
    let output = command
        .arg(fixtures().join("cukes.feature"))
        .output()
        .expect("runs");
    assert!(output.status.success());
    let events = events(&output.stdout);
    assert_eq!(types(&events), ["source", "gherkin-document", "pickle", "pickle"]);

    let names: Vec<_> = events
        .iter()
        .filter_map(|event| event["pickle"]["name"].as_str())
        .collect();
    assert_eq!(names, ["eating 5", "eating 12"]);
}

#[rstest]
#[case::no_source(&["--no-source"], &["gherkin-document", "pickle", "pickle"])]
#[case::no_ast(&["--no-ast"], &["source", "pickle", "pickle"])]
#[case::pickles_only(&["--no-source", "--no-ast"], &["pickle", "pickle"])]
#[case::nothing(&["--no-source", "--no-ast", "--no-pickles"], &[])]
fn flags_switch_event_kinds_off(
    mut command: Command,
    #[case] flags: &[&str],
    #[case] expected: &[&str],
) {
    let output = command
        .args(flags)
        .arg(fixtures().join("cukes.feature"))
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(types(&events(&output.stdout)), expected);
}

#[rstest]
fn directories_are_walked_in_order(mut command: Command) {
    let output = command
        .args(["--no-source", "--no-ast"])
        .arg(fixtures())
        .output()
        .expect("runs");
    assert!(output.status.success());
    let events = events(&output.stdout);
    let uris: Vec<_> = events
        .iter()
        .filter_map(|event| {
            event["uri"]
                .as_str()
                .or_else(|| event["source"]["uri"].as_str())
        })
        .filter_map(|uri| uri.rsplit(['/', '\\']).next())
        .collect();
    assert_eq!(
        uris,
        [
            "broken.feature",
            "cukes.feature",
            "cukes.feature",
            "weighing.feature"
        ]
    );
    assert_eq!(types(&events).first(), Some(&"attachment"));
}

#[rstest]
fn stdin_events_are_processed(mut command: Command) {
    let input = concat!(
        "{\"type\":\"source\",\"uri\":\"stdin.feature\",",
        "\"data\":\"Feature: S\\n  Scenario: s\\n    Given x\\n\"}\n",
        "{\"type\":\"test-run-finished\",\"success\":true}\n",
    );
    let output = command
        .arg("--no-ast")
        .write_stdin(input)
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(
        types(&events(&output.stdout)),
        ["source", "pickle", "test-run-finished"]
    );
}

#[rstest]
fn missing_file_exits_with_failure(mut command: Command) {
    command
        .arg(fixtures().join("absent.feature"))
        .assert()
        .code(1);
}

#[rstest]
fn invalid_log_level_in_environment_exits_with_config_error(mut command: Command) {
    command
        .env("GHERKIN_PICKLES_LOG_LEVEL", "chatty")
        .arg(fixtures().join("cukes.feature"))
        .assert()
        .code(2)
        .stdout("");
}

#[rstest]
fn log_level_flag_overrides_environment(mut command: Command) {
    command
        .env("GHERKIN_PICKLES_LOG_LEVEL", "error")
        .args(["--log-level", "debug", "--no-source", "--no-ast", "--no-pickles"])
        .arg(fixtures().join("cukes.feature"))
        .assert()
        .success()
        .stdout("");
}
