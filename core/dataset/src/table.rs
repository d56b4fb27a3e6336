//! FILENAME: core/dataset/src/table.rs
//! PURPOSE: In-memory table of records sharing one header row.
//! CONTEXT: The unit the whole pipeline passes around. Rows are uniform
//! width; columns are addressed by header name. After preprocessing the
//! table is treated as read-only — filtering and aggregation build new
//! values instead of mutating it.

use serde::{Deserialize, Serialize};

use crate::value::DataValue;

/// An ordered collection of records with a uniform column set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<DataValue>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>) -> Self {
        DataTable {
            headers,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding with `Empty` or truncating so every row
    /// matches the header width.
    pub fn push_row(&mut self, mut row: Vec<DataValue>) {
        row.resize(self.headers.len(), DataValue::Empty);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&DataValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn row(&self, index: usize) -> Option<&[DataValue]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DataValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Iterates one column's values top to bottom.
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &DataValue>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Replaces a column's values, or appends the column if the header is
    /// new. `values` is padded/truncated to the current row count.
    pub fn set_column(&mut self, name: &str, mut values: Vec<DataValue>) {
        values.resize(self.rows.len(), DataValue::Empty);
        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Distinct non-empty display strings of a column in first-seen order.
    /// Feeds filter option lists and distinct-value KPIs.
    pub fn unique_labels(&self, name: &str) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        if let Some(values) = self.column_values(name) {
            for value in values {
                if value.is_empty() {
                    continue;
                }
                let label = value.display_value();
                if !seen.contains(&label) {
                    seen.push(label);
                }
            }
        }
        seen
    }

    /// Copy of the first `n` rows (the whole table when it is shorter).
    pub fn head(&self, n: usize) -> DataTable {
        DataTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
