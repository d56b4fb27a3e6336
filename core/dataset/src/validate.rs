//! FILENAME: core/dataset/src/validate.rs
//! PURPOSE: One-pass dataset validation.
//! CONTEXT: Checks that the required columns exist and that their values
//! are coercible by the preprocessor. Reports every violated rule — the
//! caller needs the complete list to show actionable errors — and never
//! mutates the table.

use std::fmt;

use serde::Serialize;

use crate::preprocess::{coerce_date, coerce_number};
use crate::schema;
use crate::table::DataTable;

/// One violated validation rule. `rows` counts the offending cells; the
/// display message keeps the user-facing wording.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationIssue {
    MissingColumn { column: String },
    InvalidDates { column: String, rows: usize },
    NonNumeric { column: String, rows: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingColumn { column } => {
                write!(f, "缺少必需字段: {}", column)
            }
            ValidationIssue::InvalidDates { column, .. } => {
                write!(f, "{}字段格式不正确", column)
            }
            ValidationIssue::NonNumeric { column, .. } => {
                write!(f, "{}字段必须是数值类型", column)
            }
        }
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// User-facing messages, one per violated rule.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.to_string()).collect()
    }
}

/// Validates the table against the fixed schema. Rules:
/// required columns present; every non-empty 日期 value is a date or
/// date-parseable text; every non-empty 销售额 value is numeric or
/// numeric-coercible. Empty cells pass — they are the missing sentinel,
/// not a format violation.
pub fn validate(table: &DataTable) -> ValidationReport {
    let mut report = ValidationReport::default();

    for column in schema::REQUIRED_COLUMNS {
        if !table.has_column(column) {
            report.issues.push(ValidationIssue::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    if let Some(values) = table.column_values(schema::DATE) {
        let bad = values
            .filter(|v| !v.is_empty() && coerce_date(v).is_none())
            .count();
        if bad > 0 {
            report.issues.push(ValidationIssue::InvalidDates {
                column: schema::DATE.to_string(),
                rows: bad,
            });
        }
    }

    if let Some(values) = table.column_values(schema::SALE_AMOUNT) {
        let bad = values
            .filter(|v| !v.is_empty() && coerce_number(v).is_none())
            .count();
        if bad > 0 {
            report.issues.push(ValidationIssue::NonNumeric {
                column: schema::SALE_AMOUNT.to_string(),
                rows: bad,
            });
        }
    }

    report
}
