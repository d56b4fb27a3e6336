//! FILENAME: core/analytics/src/group.rs
//!
//! Single-dimension group aggregation: one pass to bucket rows into
//! accumulators, then a sort over the group keys.

use rustc_hash::FxHashMap;
use serde::Serialize;

use dataset::{compare_values, DataTable, DataValue};

use crate::accumulate::{Accumulator, AggregateOp};
use crate::error::AnalyticsError;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One output row of a group aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: String,
    pub value: f64,
}

/// A grouped aggregate, ordered ascending by group key: numbers
/// numerically, labels lexicographically. Calendar labels like 2023-06
/// or 2023Q2 sort lexicographically into chronological order, which is
/// what trend charts rely on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    pub group_column: String,
    pub value_column: Option<String>,
    pub op: AggregateOp,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.key.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.value).collect()
    }

    /// The `n` largest rows by aggregate value, descending. The sort is
    /// stable, so ties keep their ascending key order.
    pub fn top_n(&self, n: usize) -> AggregateTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
        rows.truncate(n);
        AggregateTable {
            group_column: self.group_column.clone(),
            value_column: self.value_column.clone(),
            op: self.op,
            rows,
        }
    }
}

// ============================================================================
// GROUP AGGREGATION
// ============================================================================

/// Groups `table` by `group_column` and aggregates `value_column` with
/// `op`. Rows with an empty group key are left out of the breakdown.
/// `Count` ignores the value column; every other operation requires one.
pub fn group_aggregate(
    table: &DataTable,
    group_column: &str,
    value_column: Option<&str>,
    op: AggregateOp,
) -> Result<AggregateTable, AnalyticsError> {
    let group_index = table
        .column_index(group_column)
        .ok_or_else(|| AnalyticsError::MissingColumn(group_column.to_string()))?;

    let value_index = if op.needs_value_column() {
        let name = value_column.ok_or(AnalyticsError::ValueColumnRequired(op))?;
        Some(
            table
                .column_index(name)
                .ok_or_else(|| AnalyticsError::MissingColumn(name.to_string()))?,
        )
    } else {
        None
    };

    // Buckets keep the first-seen key value so the final sort can compare
    // typed values instead of display strings.
    let mut buckets: Vec<(DataValue, String, Accumulator)> = Vec::new();
    let mut index_of: FxHashMap<String, usize> = FxHashMap::default();

    for row in table.rows() {
        let key = &row[group_index];
        if key.is_empty() {
            continue;
        }
        let label = key.display_value();
        let slot = match index_of.get(&label) {
            Some(&slot) => slot,
            None => {
                index_of.insert(label.clone(), buckets.len());
                buckets.push((key.clone(), label, Accumulator::new()));
                buckets.len() - 1
            }
        };
        let acc = &mut buckets[slot].2;
        match value_index {
            Some(index) => match row[index].as_number() {
                Some(number) => acc.add_number(number),
                None => acc.add_non_number(),
            },
            None => acc.add_non_number(),
        }
    }

    buckets.sort_by(|a, b| compare_values(&a.0, &b.0));

    let rows = buckets
        .into_iter()
        .map(|(_, key, acc)| AggregateRow {
            key,
            value: acc.compute(op),
        })
        .collect();

    Ok(AggregateTable {
        group_column: group_column.to_string(),
        value_column: value_column.map(|name| name.to_string()),
        op,
        rows,
    })
}

// ============================================================================
// TESTS
// ============================================================================
