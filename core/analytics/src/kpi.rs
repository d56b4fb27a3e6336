//! FILENAME: core/analytics/src/kpi.rs
//!
//! Headline metrics for the KPI strip. Metrics whose source column is
//! absent come back as `None`; those cards simply are not rendered.

use serde::Serialize;

use dataset::{schema, DataTable};

use crate::accumulate::{Accumulator, AggregateOp};

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_sales: Option<f64>,
    pub average_sales: Option<f64>,
    pub max_sale: Option<f64>,
    pub min_sale: Option<f64>,
    /// Every row counts as one order, whatever its cells hold.
    pub order_count: u64,
    /// Total sales divided by the order count, not by numeric cells only.
    pub average_order_value: Option<f64>,
    pub customer_type_count: Option<usize>,
    pub region_count: Option<usize>,
    pub category_count: Option<usize>,
}

/// Computes the KPI summary over `table`, usually the filtered view.
pub fn summarize(table: &DataTable) -> KpiSummary {
    let mut summary = KpiSummary {
        order_count: table.row_count() as u64,
        ..KpiSummary::default()
    };

    if let Some(values) = table.column_values(schema::SALE_AMOUNT) {
        let mut acc = Accumulator::new();
        for value in values {
            match value.as_number() {
                Some(number) => acc.add_number(number),
                None => acc.add_non_number(),
            }
        }
        summary.total_sales = Some(acc.sum);
        summary.average_sales = Some(acc.compute(AggregateOp::Average));
        summary.max_sale = Some(acc.compute(AggregateOp::Max));
        summary.min_sale = Some(acc.compute(AggregateOp::Min));
        summary.average_order_value = Some(if table.row_count() > 0 {
            acc.sum / table.row_count() as f64
        } else {
            0.0
        });
    }

    summary.customer_type_count = distinct_count(table, schema::CUSTOMER_TYPE);
    summary.region_count = distinct_count(table, schema::REGION);
    summary.category_count = distinct_count(table, schema::CATEGORY);

    summary
}

/// Distinct non-empty values of `column`, counted on the raw cells.
fn distinct_count(table: &DataTable, column: &str) -> Option<usize> {
    if table.has_column(column) {
        Some(table.unique_labels(column).len())
    } else {
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================
