//! Reporting window resolution and time bucketing.

mod planner;

#[allow(unused_imports)]
pub use planner::{plan, BucketPlan, Granularity, RangeSelector};
