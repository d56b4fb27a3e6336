//! FILENAME: core/analytics/src/stats.rs
//!
//! Describe-style statistics for the numeric columns of a table: count,
//! mean, sample standard deviation and the quartiles, rounded to two
//! decimals for display.

use serde::Serialize;

use dataset::{DataTable, DataValue};

use crate::accumulate::{Accumulator, AggregateOp};

// ============================================================================
// RESULT TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericColumnStats {
    pub column: String,
    pub count: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

// ============================================================================
// NUMERIC SUMMARY
// ============================================================================

/// Statistics for every numeric column, in header order. A column
/// qualifies when all its non-empty cells are numbers and at least one
/// exists; empty cells are ignored rather than treated as zero.
pub fn numeric_summary(table: &DataTable) -> Vec<NumericColumnStats> {
    let mut out = Vec::new();

    for header in table.headers() {
        let mut numbers: Vec<f64> = Vec::new();
        let mut numeric_only = true;
        if let Some(values) = table.column_values(header) {
            for value in values {
                match value {
                    DataValue::Number(number) => numbers.push(*number),
                    DataValue::Empty => {}
                    _ => {
                        numeric_only = false;
                        break;
                    }
                }
            }
        }
        if !numeric_only || numbers.is_empty() {
            continue;
        }

        let mut acc = Accumulator::new();
        for number in &numbers {
            acc.add_number(*number);
        }
        numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        out.push(NumericColumnStats {
            column: header.clone(),
            count: acc.count_numbers,
            mean: round2(acc.mean),
            std_dev: round2(acc.std_dev()),
            min: round2(acc.compute(AggregateOp::Min)),
            q25: round2(quantile(&numbers, 0.25)),
            median: round2(quantile(&numbers, 0.5)),
            q75: round2(quantile(&numbers, 0.75)),
            max: round2(acc.compute(AggregateOp::Max)),
        });
    }

    out
}

/// Linear-interpolation quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = q * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        let fraction = position - low as f64;
        sorted[low] + fraction * (sorted[high] - sorted[low])
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
