//! JSONL parser for message delivery logs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::LogRecord;


/// Parse a single JSONL file and return LogRecord objects.
pub fn parse_jsonl_file(file_path: &Path) -> Result<Vec<LogRecord>> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open file: {}", file_path.display()))?;

    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) => {
                eprintln!(
                    "Warning: Error reading line {} in {}: {}",
                    line_num + 1,
                    file_path.display(),
                    e
                );
                continue;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(data) => records.push(parse_record(&data)),
            Err(e) => {
                eprintln!(
                    "Warning: Skipping malformed JSON at {}:{}: {}",
                    file_path.display(),
                    line_num + 1,
                    e
                );
            }
        }
    }

    Ok(records)
}


/// Parse a single JSON object into a LogRecord.
///
/// Field extraction never fails: a record missing its timestamp is kept with
/// `timestamp: None` so the aggregator can count it as skipped, and every
/// other field defaults to absent.
fn parse_record(data: &Value) -> LogRecord {
    let timestamp = data
        .get("timestamp")
        .and_then(|v| v.as_str())
        .and_then(parse_timestamp);

    let status = data
        .get("status")
        .and_then(|v| v.as_str())
        .map(String::from);

    let recipient = data
        .get("recipient")
        .and_then(|v| v.as_str())
        .map(String::from);

    let content_preview = data
        .get("preview")
        .and_then(|v| v.as_str())
        .map(String::from);

    LogRecord {
        timestamp,
        status,
        recipient,
        content_preview,
    }
}


/// Parse ISO 8601 timestamp string to DateTime<Utc>.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Handle "Z" suffix
    let normalized = s.replace("Z", "+00:00");
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_parse_record_full() {
        let json = r#"{
            "timestamp": "2024-01-15T10:30:00Z",
            "status": "delivered",
            "recipient": "+15551234567",
            "preview": "see attached document.pdf"
        }"#;

        let data: Value = serde_json::from_str(json).unwrap();
        let record = parse_record(&data);

        assert!(record.timestamp.is_some());
        assert_eq!(record.status.as_deref(), Some("delivered"));
        assert_eq!(record.recipient.as_deref(), Some("+15551234567"));
        assert_eq!(record.content_preview.as_deref(), Some("see attached document.pdf"));
    }

    #[test]
    fn test_parse_record_missing_fields() {
        let json = r#"{"status": "sent"}"#;

        let data: Value = serde_json::from_str(json).unwrap();
        let record = parse_record(&data);

        assert!(record.timestamp.is_none());
        assert_eq!(record.status.as_deref(), Some("sent"));
        assert!(record.recipient.is_none());
        assert!(record.content_preview.is_none());
    }

    #[test]
    fn test_parse_record_bad_timestamp_kept() {
        let json = r#"{"timestamp": "not-a-date", "status": "delivered"}"#;

        let data: Value = serde_json::from_str(json).unwrap();
        let record = parse_record(&data);

        assert!(record.timestamp.is_none());
        assert_eq!(record.status.as_deref(), Some("delivered"));
    }

    #[test]
    fn test_parse_jsonl_file_skips_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"timestamp": "2024-01-15T10:30:00Z", "status": "delivered"}}"#).unwrap();
        writeln!(file, "not json at all").unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"timestamp": "2024-01-15T11:30:00Z", "status": "sent"}}"#).unwrap();

        let records = parse_jsonl_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status.as_deref(), Some("delivered"));
        assert_eq!(records[1].status.as_deref(), Some("sent"));
    }
}
