//! FILENAME: core/analytics/src/error.rs

use thiserror::Error;

use crate::accumulate::AggregateOp;

/// Errors surfaced by aggregation requests. These are caller mistakes
/// (asking for columns the table does not have), not data problems;
/// data problems degrade to empty or zero results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("aggregation {0:?} requires a value column")]
    ValueColumnRequired(AggregateOp),
}
