//! FILENAME: core/dataset/src/value.rs
//! PURPOSE: Defines the tagged value type stored in every table cell.
//! CONTEXT: BI tables are column-heterogeneous: a cell holds nothing, a
//! number, text, a calendar date, or a boolean. Dates are first-class here
//! because the whole pipeline derives calendar attributes from them.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell value in a [`DataTable`](crate::DataTable).
/// `Empty` doubles as the "missing" sentinel for failed coercions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Boolean(bool),
}

impl DataValue {
    /// True when this value is the missing sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, DataValue::Empty)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Calendar-date view of the value, if it has one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DataValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the display string of the value.
    /// This is what filter matching, group labels, and export output see.
    pub fn display_value(&self) -> String {
        match self {
            DataValue::Empty => String::new(),
            DataValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            DataValue::Text(s) => s.clone(),
            DataValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            DataValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }

    /// Label used when the value keys a group or appears in a breakdown.
    /// Empty cells show as "(blank)" instead of vanishing.
    pub fn group_label(&self) -> String {
        if self.is_empty() {
            "(blank)".to_string()
        } else {
            self.display_value()
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            DataValue::Empty => 0,
            DataValue::Number(_) => 1,
            DataValue::Date(_) => 2,
            DataValue::Text(_) => 3,
            DataValue::Boolean(_) => 4,
        }
    }
}

/// Total order over values, used wherever group keys or options are sorted:
/// Empty < Number < Date < Text < Boolean. Numbers compare numerically,
/// dates chronologically, text lexicographically.
pub fn compare_values(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        (DataValue::Number(x), DataValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (DataValue::Date(x), DataValue::Date(y)) => x.cmp(y),
        (DataValue::Text(x), DataValue::Text(y)) => x.cmp(y),
        (DataValue::Boolean(x), DataValue::Boolean(y)) => x.cmp(y),
        _ => a.type_rank().cmp(&b.type_rank()),
    }
}
