//! Reporting window planner.
//!
//! Resolves a coarse range selector against a reference instant into a
//! concrete `[start, end)` window and the ordered bucket labels every report
//! must contain, hourly for short ranges and daily for longer ones.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::error::ReportError;


/// Supported reporting ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelector {
    Last24Hours,
    Last7Days,
    Last30Days,
}


impl RangeSelector {
    /// Window length for this range.
    pub fn duration(&self) -> Duration {
        match self {
            Self::Last24Hours => Duration::hours(24),
            Self::Last7Days => Duration::days(7),
            Self::Last30Days => Duration::days(30),
        }
    }

    /// Bucket size used when partitioning this range.
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Last24Hours => Granularity::Hourly,
            Self::Last7Days | Self::Last30Days => Granularity::Daily,
        }
    }

    /// Number of buckets the plan must contain.
    pub fn bucket_count(&self) -> usize {
        match self {
            Self::Last24Hours => 24,
            Self::Last7Days => 7,
            Self::Last30Days => 30,
        }
    }
}


impl FromStr for RangeSelector {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::Last24Hours),
            "7d" => Ok(Self::Last7Days),
            "30d" => Ok(Self::Last30Days),
            other => Err(ReportError::InvalidRangeSelector(other.to_string())),
        }
    }
}


/// Bucket granularity.
///
/// Owns both the label format and the step size so the planner and the
/// aggregator always compute labels through the same function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hourly,
    Daily,
}


impl Granularity {
    /// Bucket label for an instant: `HH:00` hourly, `YYYY-MM-DD` daily.
    pub fn bucket_label(&self, instant: DateTime<Utc>) -> String {
        match self {
            Self::Hourly => instant.format("%H:00").to_string(),
            Self::Daily => instant.format("%Y-%m-%d").to_string(),
        }
    }

    /// One bucket-sized calendar step.
    pub fn step(&self) -> Duration {
        match self {
            Self::Hourly => Duration::hours(1),
            Self::Daily => Duration::days(1),
        }
    }
}


/// The resolved reporting window and its ordered bucket labels.
///
/// Built fresh for every report and never shared across requests. Labels are
/// unique and strictly increasing in time.
#[derive(Debug, Clone)]
pub struct BucketPlan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
    pub labels: Vec<String>,
}


/// Resolve a range selector against a reference instant.
///
/// Pure and deterministic: the reference instant is always injected by the
/// caller, never read from the system clock here.
pub fn plan(selector: RangeSelector, reference: DateTime<Utc>) -> BucketPlan {
    let granularity = selector.granularity();
    let end = reference;
    let start = end - selector.duration();

    let mut labels = Vec::with_capacity(selector.bucket_count());
    let mut cursor = start;
    for _ in 0..selector.bucket_count() {
        labels.push(granularity.bucket_label(cursor));
        cursor += granularity.step();
    }

    BucketPlan {
        start,
        end,
        granularity,
        labels,
    }
}
