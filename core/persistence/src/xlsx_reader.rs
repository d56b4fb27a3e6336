//! FILENAME: core/persistence/src/xlsx_reader.rs
//!
//! Workbook import via calamine. Only the first worksheet is read: the
//! dashboard treats an upload as one flat table, headers in row one.

use std::io::{Cursor, Read, Seek};

use calamine::{Data, Reader, Xls, Xlsx};
use chrono::NaiveDate;
use dataset::{DataTable, DataValue};

use crate::error::PersistenceError;

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub fn read_xlsx(bytes: &[u8]) -> Result<DataTable, PersistenceError> {
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    first_sheet_table(workbook)
}

pub fn read_xls(bytes: &[u8]) -> Result<DataTable, PersistenceError> {
    let workbook: Xls<_> = Xls::new(Cursor::new(bytes))?;
    first_sheet_table(workbook)
}

// ============================================================================
// SHEET -> TABLE
// ============================================================================

fn first_sheet_table<RS, R>(mut workbook: R) -> Result<DataTable, PersistenceError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names.first().ok_or(PersistenceError::EmptyWorkbook)?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| {
        PersistenceError::InvalidFormat(format!("worksheet '{}' has no rows", sheet_name))
    })?;
    let headers = header_row
        .iter()
        .map(|cell| cell_to_value(cell).display_value())
        .collect();

    let mut table = DataTable::new(headers);
    for row in rows {
        table.push_row(row.iter().map(cell_to_value).collect());
    }
    Ok(table)
}

fn cell_to_value(cell: &Data) -> DataValue {
    match cell {
        Data::Empty => DataValue::Empty,
        Data::String(s) => DataValue::Text(s.clone()),
        Data::Float(f) => DataValue::Number(*f),
        Data::Int(i) => DataValue::Number(*i as f64),
        Data::Bool(b) => DataValue::Boolean(*b),
        Data::Error(_) => DataValue::Empty,
        Data::DateTime(dt) => match serial_to_date(dt.as_f64()) {
            Some(date) => DataValue::Date(date),
            None => DataValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => DataValue::Text(s.clone()),
        Data::DurationIso(s) => DataValue::Text(s.clone()),
    }
}

/// Converts an Excel serial to a calendar date, 1900 date system. Day
/// zero is 1899-12-30, which absorbs the phantom 1900-02-29; fractional
/// parts are time of day and dropped.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = chrono::Duration::try_days(serial.floor() as i64)?;
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(days)
}

// ============================================================================
// TESTS
// ============================================================================
