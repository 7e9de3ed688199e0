//! Aggregation layer for delivery reports.

mod report;

#[allow(unused_imports)]
pub use report::{
    aggregate,
    AggregationResult,
    BucketCount,
    RecipientCount,
    TOP_RECIPIENT_COUNT,
};
