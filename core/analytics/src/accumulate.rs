//! FILENAME: core/analytics/src/accumulate.rs
//!
//! Streaming accumulator behind every aggregate in this crate. A single
//! pass over the rows, no stored values; mean and variance use Welford's
//! algorithm so long columns stay numerically stable.

use serde::{Deserialize, Serialize};

// ============================================================================
// AGGREGATION OPERATIONS
// ============================================================================

/// Aggregation function applied to a grouped value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateOp {
    Sum,
    Count,
    Average,
    Min,
    Max,
}

impl Default for AggregateOp {
    fn default() -> Self {
        AggregateOp::Sum
    }
}

impl AggregateOp {
    /// `Count` only counts rows; every other operation needs a value
    /// column to aggregate.
    pub fn needs_value_column(&self) -> bool {
        !matches!(self, AggregateOp::Count)
    }
}

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// Running aggregate state for one group (or one whole column).
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    /// Sum of numeric values.
    pub sum: f64,
    /// All values seen, numeric or not.
    pub count: u64,
    /// Numeric values only.
    pub count_numbers: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Running mean of numeric values (Welford).
    pub mean: f64,
    /// Sum of squared distances from the running mean (Welford).
    pub m2: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one numeric value into the running state.
    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.count_numbers += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));

        let delta = value - self.mean;
        self.mean += delta / self.count_numbers as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Folds a non-numeric value: it counts as a row but contributes
    /// nothing to sum, min, max or the moments.
    pub fn add_non_number(&mut self) {
        self.count += 1;
    }

    /// Final aggregate for `op`. Empty input yields 0.0 for every
    /// operation; callers never see a division error.
    pub fn compute(&self, op: AggregateOp) -> f64 {
        match op {
            AggregateOp::Sum => self.sum,
            AggregateOp::Count => self.count as f64,
            AggregateOp::Average => {
                if self.count_numbers > 0 {
                    self.sum / self.count_numbers as f64
                } else {
                    0.0
                }
            }
            AggregateOp::Min => self.min.unwrap_or(0.0),
            AggregateOp::Max => self.max.unwrap_or(0.0),
        }
    }

    /// Sample standard deviation of the numeric values; 0.0 below two
    /// values.
    pub fn std_dev(&self) -> f64 {
        if self.count_numbers > 1 {
            (self.m2 / (self.count_numbers - 1) as f64).sqrt()
        } else {
            0.0
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
