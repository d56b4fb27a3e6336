//! FILENAME: core/dataset/src/lib.rs
//! PURPOSE: Data model and ingestion-side transforms for the BI pipeline.
//! CONTEXT: Re-exports the table/value types plus the validator,
//! preprocessor, and synthetic sample generator used by the other crates.

pub mod preprocess;
pub mod sample;
pub mod schema;
pub mod table;
pub mod validate;
pub mod value;

// Re-export commonly used types at the crate root
pub use preprocess::{coerce_date, coerce_number, parse_date, preprocess};
pub use sample::{generate_sample, SampleConfig};
pub use table::DataTable;
pub use validate::{validate, ValidationIssue, ValidationReport};
pub use value::{compare_values, DataValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_and_reads_a_table() {
        let mut table = DataTable::new(vec!["a".to_string()]);
        table.push_row(vec![DataValue::Number(1.0)]);

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(0, 0), Some(&DataValue::Number(1.0)));
    }

    #[test]
    fn integration_test_generate_validate_preprocess() {
        let mut config = SampleConfig::default();
        config.end_date = config.start_date;
        let raw = generate_sample(&config);

        let report = validate(&raw);
        assert!(report.is_valid(), "sample data must validate: {:?}", report);

        let processed = preprocess(&raw);
        assert!(processed.has_column(schema::MONTH));
        assert_eq!(processed.row_count(), raw.row_count());
        // Derived columns recompute from 日期, so a second pass is a no-op.
        assert_eq!(preprocess(&processed), processed);
    }

    #[test]
    fn test_table_serializes_round_trip() {
        let mut table = DataTable::new(vec![schema::REGION.to_string()]);
        table.push_row(vec![DataValue::Text("北京".to_string())]);

        let json = serde_json::to_string(&table).unwrap();
        let back: DataTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
