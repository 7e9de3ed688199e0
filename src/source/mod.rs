//! Record sources for delivery reports.
//!
//! The reporting core never reaches for a global client; it is handed a
//! `RecordSource` and asks it for the records of one resolved window. The
//! JSONL file source is the only implementation shipped here.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::data::parse_jsonl_file;
use crate::error::SourceError;
use crate::models::LogRecord;


/// Supplies the log records for one `[start, end)` window.
///
/// Retry and backoff, if any, belong to the implementation; callers treat an
/// error as the report simply not being producible.
pub trait RecordSource {
    fn fetch_records(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LogRecord>, SourceError>;
}


/// Record source backed by one or more JSONL log files.
#[derive(Debug, Clone)]
pub struct JsonlSource {
    paths: Vec<PathBuf>,
}


impl JsonlSource {
    pub fn new<P: AsRef<Path>>(paths: &[P]) -> Self {
        Self {
            paths: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }
}


impl RecordSource for JsonlSource {
    /// Read all files and keep the records inside `[start, end)`.
    ///
    /// Records without a usable timestamp are kept too, so the aggregator
    /// can report them as skipped instead of losing them silently here.
    fn fetch_records(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LogRecord>, SourceError> {
        if self.paths.is_empty() {
            return Err(SourceError::Unavailable("no log files given".to_string()));
        }

        let mut records = Vec::new();
        for path in &self.paths {
            let parsed = parse_jsonl_file(path)
                .map_err(|e| SourceError::Unavailable(e.to_string()))?;
            records.extend(parsed);
        }

        records.retain(|record| match record.timestamp {
            Some(ts) => start <= ts && ts < end,
            None => true,
        });

        Ok(records)
    }
}
