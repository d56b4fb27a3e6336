//! FILENAME: core/dashboard/src/views.rs
//!
//! The standard chart lineup of the dashboard. Each view declares the
//! grouping it needs; a table missing the required columns simply
//! renders without that view, so partial uploads still get a dashboard.

use analytics::{group_aggregate, AggregateOp, AggregateTable};
use charts::{bar_chart, horizontal_bar_chart, line_chart, pie_chart, scatter_chart};
use charts::{ChartSpec, ChartStyle};
use dataset::{schema, DataTable};
use serde::{Deserialize, Serialize};

const TOP_PRODUCTS: usize = 10;

// ============================================================================
// STANDARD VIEWS
// ============================================================================

/// Builds every standard view the table's columns support, in the
/// fixed dashboard order.
pub fn standard_charts(table: &DataTable, style: &ChartStyle) -> Vec<ChartSpec> {
    let views = [
        monthly_trend(table, style),
        quarterly_comparison(table, style),
        category_share(table, style),
        product_ranking(table, style),
        region_sales(table, style),
        region_orders(table, style),
        customer_share(table, style),
        payment_usage(table, style),
    ];
    views.into_iter().flatten().collect()
}

fn monthly_trend(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let sums = sum_of_sales(table, schema::MONTH)?;
    Some(line_chart(&sums, "月度销售趋势", schema::MONTH, schema::SALE_AMOUNT, style))
}

fn quarterly_comparison(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let sums = sum_of_sales(table, schema::QUARTER)?;
    Some(bar_chart(&sums, "季度销售对比", schema::QUARTER, schema::SALE_AMOUNT, style))
}

fn category_share(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let sums = sum_of_sales(table, schema::CATEGORY)?;
    Some(pie_chart(&sums, "产品类别销售占比", style))
}

fn product_ranking(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let sums = group_aggregate(table, schema::PRODUCT, Some(schema::QUANTITY), AggregateOp::Sum)
        .ok()?
        .top_n(TOP_PRODUCTS);
    Some(horizontal_bar_chart(
        &sums,
        "产品销量排行 (Top 10)",
        schema::QUANTITY,
        schema::PRODUCT,
        style,
    ))
}

fn region_sales(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let sums = sum_of_sales(table, schema::REGION)?;
    Some(bar_chart(&sums, "各地区销售情况", schema::REGION, schema::SALE_AMOUNT, style))
}

fn region_orders(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let counts = group_aggregate(table, schema::REGION, None, AggregateOp::Count).ok()?;
    Some(scatter_chart(&counts, "各地区订单数量", schema::REGION, "订单数", style))
}

fn customer_share(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let sums = sum_of_sales(table, schema::CUSTOMER_TYPE)?;
    Some(pie_chart(&sums, "客户类型销售占比", style))
}

fn payment_usage(table: &DataTable, style: &ChartStyle) -> Option<ChartSpec> {
    let counts = group_aggregate(table, schema::PAYMENT_METHOD, None, AggregateOp::Count).ok()?;
    // Usage reads most-popular-first, so re-rank the key-ordered table.
    let ranked = counts.top_n(counts.rows.len());
    Some(bar_chart(&ranked, "支付方式使用情况", schema::PAYMENT_METHOD, "使用次数", style))
}

fn sum_of_sales(table: &DataTable, group_column: &str) -> Option<AggregateTable> {
    group_aggregate(table, group_column, Some(schema::SALE_AMOUNT), AggregateOp::Sum).ok()
}

// ============================================================================
// TREND CHART
// ============================================================================

/// Grouping period for the sales trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendPeriod {
    Month,
    Quarter,
    Week,
}

impl TrendPeriod {
    /// The derived calendar column this period groups by.
    pub fn column(&self) -> &'static str {
        match self {
            TrendPeriod::Month => schema::MONTH,
            TrendPeriod::Quarter => schema::QUARTER,
            TrendPeriod::Week => schema::WEEKDAY,
        }
    }
}

/// Sales-sum trend over a calendar period. `None` when the period
/// column or 销售额 is absent.
pub fn sales_trend_chart(
    table: &DataTable,
    period: TrendPeriod,
    style: &ChartStyle,
) -> Option<ChartSpec> {
    let sums = sum_of_sales(table, period.column())?;
    let title = format!("销售趋势 - {}", period.column());
    Some(line_chart(&sums, &title, period.column(), "销售额 (¥)", style))
}

// ============================================================================
// TESTS
// ============================================================================
