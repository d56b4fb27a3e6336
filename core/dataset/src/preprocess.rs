//! FILENAME: core/dataset/src/preprocess.rs
//! PURPOSE: Calendar derivation and numeric coercion.
//! CONTEXT: Runs once after load. Pure — returns a new table — and
//! idempotent: derived columns are recomputed from the date column every
//! time, so preprocessing already-preprocessed data is a no-op.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::schema;
use crate::table::DataTable;
use crate::value::DataValue;

/// Date formats accepted in text cells. Datetime strings keep only the
/// calendar part.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a text cell as a calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Calendar-date view of any value the preprocessor can normalize.
pub fn coerce_date(value: &DataValue) -> Option<NaiveDate> {
    match value {
        DataValue::Date(d) => Some(*d),
        DataValue::Text(s) => parse_date(s),
        _ => None,
    }
}

/// Numeric view of any value the preprocessor can coerce.
pub fn coerce_number(value: &DataValue) -> Option<f64> {
    match value {
        DataValue::Number(n) => Some(*n),
        DataValue::Text(s) => s.trim().parse::<f64>().ok(),
        DataValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Derives 月份 / 季度 / 年份 / 星期 from the date column and coerces the
/// amount columns to numbers. Values that cannot be coerced become `Empty`
/// (the missing sentinel) — never an error. Rows whose date does not parse
/// keep their original date cell and get `Empty` derived cells.
pub fn preprocess(table: &DataTable) -> DataTable {
    let mut processed = table.clone();

    if let Some(date_index) = processed.column_index(schema::DATE) {
        let dates: Vec<Option<NaiveDate>> = processed
            .rows()
            .map(|row| coerce_date(&row[date_index]))
            .collect();

        let normalized: Vec<DataValue> = processed
            .rows()
            .zip(dates.iter())
            .map(|(row, date)| match date {
                Some(d) => DataValue::Date(*d),
                None => row[date_index].clone(),
            })
            .collect();
        processed.set_column(schema::DATE, normalized);

        processed.set_column(
            schema::MONTH,
            derive(&dates, |d| DataValue::Text(d.format("%Y-%m").to_string())),
        );
        processed.set_column(
            schema::QUARTER,
            derive(&dates, |d| {
                DataValue::Text(format!("{}Q{}", d.year(), d.month0() / 3 + 1))
            }),
        );
        processed.set_column(
            schema::YEAR,
            derive(&dates, |d| DataValue::Number(d.year() as f64)),
        );
        processed.set_column(
            schema::WEEKDAY,
            derive(&dates, |d| DataValue::Text(d.format("%A").to_string())),
        );
    }

    for column in [schema::SALE_AMOUNT, schema::QUANTITY] {
        if processed.has_column(column) {
            let coerced: Vec<DataValue> = processed
                .column_values(column)
                .into_iter()
                .flatten()
                .map(|value| match coerce_number(value) {
                    Some(n) => DataValue::Number(n),
                    None => DataValue::Empty,
                })
                .collect();
            processed.set_column(column, coerced);
        }
    }

    processed
}

fn derive<F>(dates: &[Option<NaiveDate>], f: F) -> Vec<DataValue>
where
    F: Fn(NaiveDate) -> DataValue,
{
    dates
        .iter()
        .map(|date| match date {
            Some(d) => f(*d),
            None => DataValue::Empty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataTable {
        let mut table = DataTable::new(vec![
            schema::DATE.to_string(),
            schema::SALE_AMOUNT.to_string(),
            schema::QUANTITY.to_string(),
        ]);
        table.push_row(vec![
            DataValue::Text("2023-01-05".to_string()),
            DataValue::Text("1000".to_string()),
            DataValue::Number(2.0),
        ]);
        table.push_row(vec![
            DataValue::Text("2023-06-30".to_string()),
            DataValue::Text("abc".to_string()),
            DataValue::Text("3".to_string()),
        ]);
        table
    }

    #[test]
    fn test_preprocess_derives_calendar_columns() {
        let processed = preprocess(&sample_table());

        for column in schema::DERIVED_COLUMNS {
            assert!(processed.has_column(column), "missing {}", column);
        }

        let month = processed.column_index(schema::MONTH).unwrap();
        let quarter = processed.column_index(schema::QUARTER).unwrap();
        let year = processed.column_index(schema::YEAR).unwrap();
        let weekday = processed.column_index(schema::WEEKDAY).unwrap();

        assert_eq!(
            processed.value(0, month),
            Some(&DataValue::Text("2023-01".to_string()))
        );
        assert_eq!(
            processed.value(0, quarter),
            Some(&DataValue::Text("2023Q1".to_string()))
        );
        assert_eq!(processed.value(0, year), Some(&DataValue::Number(2023.0)));
        assert_eq!(
            processed.value(0, weekday),
            Some(&DataValue::Text("Thursday".to_string()))
        );
        assert_eq!(
            processed.value(1, quarter),
            Some(&DataValue::Text("2023Q2".to_string()))
        );
    }

    #[test]
    fn test_preprocess_normalizes_dates_and_coerces_numbers() {
        let processed = preprocess(&sample_table());
        let date = processed.column_index(schema::DATE).unwrap();
        let amount = processed.column_index(schema::SALE_AMOUNT).unwrap();
        let quantity = processed.column_index(schema::QUANTITY).unwrap();

        assert_eq!(
            processed.value(0, date),
            Some(&DataValue::Date(
                NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
            ))
        );
        assert_eq!(processed.value(0, amount), Some(&DataValue::Number(1000.0)));
        // Unparseable amount becomes the missing sentinel, not an error.
        assert_eq!(processed.value(1, amount), Some(&DataValue::Empty));
        assert_eq!(processed.value(1, quantity), Some(&DataValue::Number(3.0)));
    }

    #[test]
    fn test_preprocess_is_idempotent() {
        let once = preprocess(&sample_table());
        let twice = preprocess(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preprocess_is_pure() {
        let table = sample_table();
        let before = table.clone();
        let _ = preprocess(&table);
        assert_eq!(table, before);
    }

    #[test]
    fn test_preprocess_without_date_column_adds_nothing() {
        let mut table = DataTable::new(vec![schema::SALE_AMOUNT.to_string()]);
        table.push_row(vec![DataValue::Number(5.0)]);
        let processed = preprocess(&table);

        assert_eq!(processed.column_count(), 1);
        for column in schema::DERIVED_COLUMNS {
            assert!(!processed.has_column(column));
        }
    }

    #[test]
    fn test_unparseable_date_keeps_cell_and_blanks_derived() {
        let mut table = DataTable::new(vec![schema::DATE.to_string()]);
        table.push_row(vec![DataValue::Text("not a date".to_string())]);
        let processed = preprocess(&table);

        let date = processed.column_index(schema::DATE).unwrap();
        let month = processed.column_index(schema::MONTH).unwrap();
        assert_eq!(
            processed.value(0, date),
            Some(&DataValue::Text("not a date".to_string()))
        );
        assert_eq!(processed.value(0, month), Some(&DataValue::Empty));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 2, 10).unwrap();
        assert_eq!(parse_date("2023-02-10"), Some(expected));
        assert_eq!(parse_date("2023/02/10"), Some(expected));
        assert_eq!(parse_date("2023-02-10 08:30:00"), Some(expected));
        assert_eq!(parse_date("10 Feb"), None);
    }
}
