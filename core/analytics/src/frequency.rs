//! FILENAME: core/analytics/src/frequency.rs
//!
//! Categorical frequency tables: counts per distinct value, ordered by
//! count descending, with a share of all rows and a top-N truncation.

use rustc_hash::FxHashMap;
use serde::Serialize;

use dataset::DataTable;

use crate::error::AnalyticsError;

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: u64,
    /// Share of all input rows, in percent, rounded to one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    pub column: String,
    /// At most the requested top N entries, count descending.
    pub entries: Vec<FrequencyEntry>,
    /// True distinct count, including values cut off by the truncation.
    pub distinct_values: usize,
    /// Denominator of the percentages: every row of the input table,
    /// empty cells included.
    pub total_rows: usize,
}

impl FrequencyTable {
    /// How many distinct values the truncation hid.
    pub fn hidden_values(&self) -> usize {
        self.distinct_values.saturating_sub(self.entries.len())
    }
}

// ============================================================================
// FREQUENCY TABLE
// ============================================================================

/// Counts occurrences of each distinct non-empty display value in
/// `column`. Entries are ordered by count descending; ties keep their
/// first-seen order. Percentages are taken against the full row count,
/// so a column with blanks sums below 100%.
pub fn frequency_table(
    table: &DataTable,
    column: &str,
    top_n: usize,
) -> Result<FrequencyTable, AnalyticsError> {
    let values = table
        .column_values(column)
        .ok_or_else(|| AnalyticsError::MissingColumn(column.to_string()))?;

    let mut counts: FxHashMap<String, u64> = FxHashMap::default();
    let mut first_seen: Vec<String> = Vec::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        let label = value.display_value();
        match counts.get_mut(&label) {
            Some(count) => *count += 1,
            None => {
                counts.insert(label.clone(), 1);
                first_seen.push(label);
            }
        }
    }

    let distinct_values = first_seen.len();
    let total_rows = table.row_count();

    let mut ordered: Vec<(String, u64)> = first_seen
        .into_iter()
        .map(|label| {
            let count = counts.get(&label).copied().unwrap_or(0);
            (label, count)
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    let entries = ordered
        .into_iter()
        .take(top_n)
        .map(|(value, count)| FrequencyEntry {
            value,
            count,
            percentage: percentage(count, total_rows),
        })
        .collect();

    Ok(FrequencyTable {
        column: column.to_string(),
        entries,
        distinct_values,
        total_rows,
    })
}

fn percentage(count: u64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Clips a label to `max_chars` characters with a `...` suffix. Counts
/// characters, not bytes; labels here are routinely CJK.
pub fn clip_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let clipped: String = label.chars().take(max_chars).collect();
        format!("{}...", clipped)
    } else {
        label.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
