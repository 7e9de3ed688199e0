//! Typed errors for the reporting core.

use thiserror::Error;


/// Errors produced by the window planner and aggregator.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The range token is not one of the supported selectors.
    #[error("unrecognized range selector: {0:?} (expected 24h, 7d or 30d)")]
    InvalidRangeSelector(String),

    /// The bucket plan handed to the aggregator is unusable. This is a
    /// programmer error upstream, not a data problem.
    #[error("invalid bucket plan: {0}")]
    InvalidPlan(String),
}


/// Errors produced by a record source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}
