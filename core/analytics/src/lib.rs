//! FILENAME: core/analytics/src/lib.rs
//!
//! PURPOSE: Aggregation layer of the dashboard: tri-state row filtering,
//! grouped aggregates, frequency tables, KPI summaries and numeric
//! statistics. Everything here is pure; the same table and parameters
//! always produce the same result.

pub mod accumulate;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod group;
pub mod kpi;
pub mod stats;

pub use accumulate::{Accumulator, AggregateOp};
pub use error::AnalyticsError;
pub use filter::{
    apply_filters, column_options, date_bounds, DateInterval, DimensionFilter, FilterSelection,
};
pub use frequency::{clip_label, frequency_table, FrequencyEntry, FrequencyTable};
pub use group::{group_aggregate, AggregateRow, AggregateTable};
pub use kpi::{summarize, KpiSummary};
pub use stats::{numeric_summary, NumericColumnStats};

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{preprocess, schema, DataTable, DataValue};

    fn three_order_table() -> DataTable {
        let mut table = DataTable::new(vec![
            schema::DATE.to_string(),
            schema::SALE_AMOUNT.to_string(),
            schema::REGION.to_string(),
        ]);
        let rows = [
            ("2023-01-05", 1000.0, "北京"),
            ("2023-01-06", 2000.0, "北京"),
            ("2023-02-10", 500.0, "上海"),
        ];
        for (date, amount, region) in rows {
            table.push_row(vec![
                DataValue::Text(date.to_string()),
                DataValue::Number(amount),
                DataValue::Text(region.to_string()),
            ]);
        }
        preprocess(&table)
    }

    #[test]
    fn integration_test_filter_then_aggregate() {
        let table = three_order_table();

        let selection = FilterSelection {
            regions: DimensionFilter::Explicit(vec!["北京".to_string()]),
            ..FilterSelection::default()
        };
        let filtered = apply_filters(&table, &selection);
        assert_eq!(filtered.row_count(), 2);

        let summary = summarize(&filtered);
        assert_eq!(summary.total_sales, Some(3000.0));
        assert_eq!(summary.order_count, 2);

        let monthly = group_aggregate(
            &filtered,
            schema::MONTH,
            Some(schema::SALE_AMOUNT),
            AggregateOp::Sum,
        )
        .unwrap();
        assert_eq!(monthly.labels(), vec!["2023-01"]);
        assert_eq!(monthly.values(), vec![3000.0]);
    }

    #[test]
    fn integration_test_monthly_trend_over_unfiltered_table() {
        let table = three_order_table();
        let monthly = group_aggregate(
            &table,
            schema::MONTH,
            Some(schema::SALE_AMOUNT),
            AggregateOp::Sum,
        )
        .unwrap();
        assert_eq!(monthly.labels(), vec!["2023-01", "2023-02"]);
        assert_eq!(monthly.values(), vec![3000.0, 500.0]);

        let regions = frequency_table(&table, schema::REGION, 10).unwrap();
        assert_eq!(regions.entries[0].value, "北京");
        assert_eq!(regions.entries[0].percentage, 66.7);
        assert_eq!(regions.entries[1].percentage, 33.3);
    }
}
