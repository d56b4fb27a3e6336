//! FILENAME: core/persistence/src/csv_io.rs
//!
//! CSV import/export for `DataTable`. Reading infers a value type per
//! cell (number, else text); date strings stay text until the
//! preprocessing pass coerces them.

use dataset::{DataTable, DataValue};

use crate::error::PersistenceError;

// ============================================================================
// READING
// ============================================================================

/// Parses CSV bytes into a table. The first record is the header row;
/// short or long records are tolerated and padded/truncated by
/// `push_row`.
pub fn read_csv(bytes: &[u8]) -> Result<DataTable, PersistenceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|field| field.trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(PersistenceError::InvalidFormat(
            "CSV input has no header row".to_string(),
        ));
    }

    let mut table = DataTable::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(parse_field).collect());
    }
    Ok(table)
}

fn parse_field(field: &str) -> DataValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return DataValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => DataValue::Number(number),
        _ => DataValue::Text(trimmed.to_string()),
    }
}

// ============================================================================
// WRITING
// ============================================================================

/// Serializes a table to CSV bytes (UTF-8, header row first). Cells are
/// written via `display_value`, so dates come out as YYYY-MM-DD and
/// integral numbers without a decimal point.
pub fn write_csv(table: &DataTable) -> Result<Vec<u8>, PersistenceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|value| value.display_value()))?;
    }

    writer
        .into_inner()
        .map_err(|e| PersistenceError::Io(e.into_error()))
}

// ============================================================================
// TESTS
// ============================================================================
