//! Single-pass delivery report aggregation.
//!
//! Folds a finite batch of log records against a bucket plan into a complete
//! report: per-bucket time series (zero-filled, no gaps), status and type
//! breakdowns, top recipients and derived rates.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::error::ReportError;
use crate::models::{DeliveryStatus, LogRecord, MessageType};
use crate::window::BucketPlan;


/// Maximum number of entries in the top-recipient ranking.
pub const TOP_RECIPIENT_COUNT: usize = 5;


/// One bucket of the time series, in plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub label: String,
    pub count: u64,
}


/// One entry of the top-recipient ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientCount {
    pub identifier: String,
    pub count: u64,
}


/// Complete delivery report for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub total_messages: u64,
    pub delivery_rate_percent: f64,
    pub messages_by_bucket: Vec<BucketCount>,
    pub messages_by_status: BTreeMap<String, u64>,
    pub messages_by_type: BTreeMap<String, u64>,
    pub top_recipients: Vec<RecipientCount>,
    pub active_recipient_count: u64,
    /// Records skipped because they carried no usable timestamp. Non-zero
    /// values are a data-quality signal for the caller.
    pub skipped_malformed: u64,
}


/// Aggregate log records against a bucket plan in one pass.
///
/// Records are never mutated or re-ordered. Individual records degrade
/// gracefully: a missing recipient or preview defaults, an unknown status
/// gets its own counter, and only a missing timestamp causes a per-record
/// skip. The only failure is an empty or duplicate-labeled plan.
pub fn aggregate(plan: &BucketPlan, records: &[LogRecord]) -> Result<AggregationResult, ReportError> {
    validate_plan(plan)?;

    // Zero-fill every counter up front so empty buckets, statuses and types
    // still appear in the report.
    let mut bucket_counts: HashMap<&str, u64> =
        plan.labels.iter().map(|label| (label.as_str(), 0)).collect();

    let mut status_counts: BTreeMap<String, u64> = DeliveryStatus::KNOWN
        .iter()
        .map(|status| (status.to_string(), 0))
        .collect();

    let mut type_counts: BTreeMap<String, u64> = MessageType::ALL
        .iter()
        .map(|message_type| (message_type.key().to_string(), 0))
        .collect();

    let mut recipient_counts: HashMap<String, u64> = HashMap::new();
    let mut total_messages = 0u64;
    let mut skipped_malformed = 0u64;

    for record in records {
        // A bucket cannot be assigned without a timestamp; skip the record
        // entirely and surface it in the skipped count.
        let timestamp = match record.timestamp {
            Some(ts) => ts,
            None => {
                skipped_malformed += 1;
                continue;
            }
        };

        total_messages += 1;

        // Records outside the plan (caller fetched too wide) still count
        // toward totals but must not distort the time series.
        let label = plan.granularity.bucket_label(timestamp);
        if let Some(count) = bucket_counts.get_mut(label.as_str()) {
            *count += 1;
        }

        *status_counts
            .entry(record.delivery_status().key().to_string())
            .or_insert(0) += 1;

        *type_counts
            .entry(record.message_type().key().to_string())
            .or_insert(0) += 1;

        if let Some(recipient) = record.recipient_id() {
            *recipient_counts.entry(recipient.to_string()).or_insert(0) += 1;
        }
    }

    let delivered = status_counts.get("delivered").copied().unwrap_or(0);
    let delivery_rate_percent = if total_messages == 0 {
        0.0
    } else {
        // One decimal place, half away from zero
        (delivered as f64 * 1000.0 / total_messages as f64).round() / 10.0
    };

    let active_recipient_count = recipient_counts.len() as u64;
    let top_recipients = rank_recipients(recipient_counts);

    let messages_by_bucket = plan
        .labels
        .iter()
        .map(|label| BucketCount {
            label: label.clone(),
            count: bucket_counts[label.as_str()],
        })
        .collect();

    Ok(AggregationResult {
        total_messages,
        delivery_rate_percent,
        messages_by_bucket,
        messages_by_status: status_counts,
        messages_by_type: type_counts,
        top_recipients,
        active_recipient_count,
        skipped_malformed,
    })
}


/// Reject plans the aggregator cannot work with.
fn validate_plan(plan: &BucketPlan) -> Result<(), ReportError> {
    if plan.labels.is_empty() {
        return Err(ReportError::InvalidPlan("no bucket labels".to_string()));
    }

    let mut seen = HashSet::new();
    for label in &plan.labels {
        if !seen.insert(label.as_str()) {
            return Err(ReportError::InvalidPlan(format!(
                "duplicate bucket label: {label}"
            )));
        }
    }

    Ok(())
}


/// Rank recipients by count descending, ties broken by ascending identifier,
/// truncated to the top five.
fn rank_recipients(recipient_counts: HashMap<String, u64>) -> Vec<RecipientCount> {
    let mut ranked: Vec<RecipientCount> = recipient_counts
        .into_iter()
        .map(|(identifier, count)| RecipientCount { identifier, count })
        .collect();

    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.identifier.cmp(&b.identifier))
    });
    ranked.truncate(TOP_RECIPIENT_COUNT);

    ranked
}
