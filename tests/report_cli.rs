//! End-to-end tests for the report command.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;


fn sample_log() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"timestamp": "2024-03-04T10:00:00Z", "status": "delivered", "recipient": "alice", "preview": "hello"}}"#
    )
    .unwrap();
    writeln!(
        file,
        r#"{{"timestamp": "2024-03-04T11:00:00Z", "status": "error", "recipient": "bob", "preview": "see attached document.pdf"}}"#
    )
    .unwrap();
    // Outside the 7d window, must be filtered out by the source
    writeln!(
        file,
        r#"{{"timestamp": "2024-01-01T00:00:00Z", "status": "delivered", "recipient": "carol"}}"#
    )
    .unwrap();
    file
}


#[test]
fn test_report_json_output() {
    let file = sample_log();

    Command::cargo_bin("mlg")
        .unwrap()
        .args(["report", "--range", "7d", "--at", "2024-03-05T12:00:00Z", "--json"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""total_messages": 2"#))
        .stdout(predicate::str::contains(r#""delivery_rate_percent": 50.0"#))
        .stdout(predicate::str::contains(r#""active_recipient_count": 2"#))
        .stdout(predicate::str::contains("document"));
}


#[test]
fn test_report_terminal_output() {
    let file = sample_log();

    Command::cargo_bin("mlg")
        .unwrap()
        .args(["report", "--range", "7d", "--at", "2024-03-05T12:00:00Z"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Message Delivery Report"))
        .stdout(predicate::str::contains("SUMMARY"))
        .stdout(predicate::str::contains("TOP RECIPIENTS"))
        .stdout(predicate::str::contains("TIME SERIES"));
}


#[test]
fn test_report_rejects_unknown_range() {
    let file = sample_log();

    Command::cargo_bin("mlg")
        .unwrap()
        .args(["report", "--range", "90d"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized range selector"));
}


#[test]
fn test_report_missing_file_fails() {
    Command::cargo_bin("mlg")
        .unwrap()
        .args(["report", "--range", "24h", "/nonexistent/delivery.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("record source unavailable"));
}
