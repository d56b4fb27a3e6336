//! FILENAME: core/dashboard/src/report.rs
//!
//! Presentation-ready numbers and the downloadable summary report. The
//! KPI strip always shows its four cards; metrics whose source column
//! is absent read as zero rather than leaving a hole in the layout.

use analytics::{frequency_table, numeric_summary, FrequencyTable, KpiSummary, NumericColumnStats};
use dataset::{schema, DataTable, DataValue};
use serde::Serialize;

// ============================================================================
// KPI CARDS
// ============================================================================

/// One tile of the KPI strip: a label and an already-formatted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

impl KpiCard {
    fn new(label: &str, value: String) -> Self {
        KpiCard { label: label.to_string(), value }
    }
}

/// The four headline cards, in display order.
pub fn kpi_cards(summary: &KpiSummary) -> Vec<KpiCard> {
    vec![
        KpiCard::new("总销售额", format_money(summary.total_sales.unwrap_or(0.0))),
        KpiCard::new("总订单数", format_count(summary.order_count)),
        KpiCard::new("平均订单金额", format_money(summary.average_order_value.unwrap_or(0.0))),
        KpiCard::new("客户类型数", summary.customer_type_count.unwrap_or(0).to_string()),
    ]
}

/// Currency display: ¥ prefix, rounded to whole units, thousands
/// separated.
pub fn format_money(value: f64) -> String {
    format!("¥{}", add_thousands_separator(&format!("{:.0}", value)))
}

/// Count display with thousands separators.
pub fn format_count(value: u64) -> String {
    add_thousands_separator(&value.to_string())
}

fn add_thousands_separator(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

// ============================================================================
// SUMMARY REPORT
// ============================================================================

/// Shape-of-the-data report: row/column counts, covered time range,
/// describe-style numeric statistics and full value distributions of
/// the text columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub row_count: usize,
    pub column_count: usize,
    /// "{min} 至 {max}" over parsed dates, or "无日期数据".
    pub time_range: String,
    pub numeric_stats: Vec<NumericColumnStats>,
    pub categorical_frequencies: Vec<FrequencyTable>,
}

pub fn generate_summary_report(table: &DataTable) -> SummaryReport {
    let time_range = match analytics::date_bounds(table) {
        Some(bounds) => format!(
            "{} 至 {}",
            bounds.start.format("%Y-%m-%d"),
            bounds.end.format("%Y-%m-%d")
        ),
        None => "无日期数据".to_string(),
    };

    let categorical_frequencies = text_columns(table)
        .into_iter()
        .filter_map(|column| frequency_table(table, &column, usize::MAX).ok())
        .collect();

    SummaryReport {
        row_count: table.row_count(),
        column_count: table.column_count(),
        time_range,
        numeric_stats: numeric_summary(table),
        categorical_frequencies,
    }
}

/// Columns whose non-empty cells are all text, in header order. Dates
/// and derived numeric columns don't belong in a value distribution.
fn text_columns(table: &DataTable) -> Vec<String> {
    let mut out = Vec::new();
    for header in table.headers() {
        let mut saw_text = false;
        let mut text_only = true;
        if let Some(values) = table.column_values(header) {
            for value in values {
                match value {
                    DataValue::Text(_) => saw_text = true,
                    DataValue::Empty => {}
                    _ => {
                        text_only = false;
                        break;
                    }
                }
            }
        }
        if saw_text && text_only {
            out.push(header.clone());
        }
    }
    out
}

impl SummaryReport {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Renders the report as markdown, the dashboard's downloadable
    /// text form.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# 数据摘要报告\n\n");
        out.push_str(&format!("- 数据行数: {}\n", self.row_count));
        out.push_str(&format!("- 数据列数: {}\n", self.column_count));
        out.push_str(&format!("- 时间范围: {}\n", self.time_range));

        if !self.numeric_stats.is_empty() {
            out.push_str("\n## 数值型字段统计\n\n");
            out.push_str("| 字段 | 计数 | 均值 | 标准差 | 最小值 | 25% | 中位数 | 75% | 最大值 |\n");
            out.push_str("| --- | --- | --- | --- | --- | --- | --- | --- | --- |\n");
            for stats in &self.numeric_stats {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                    stats.column,
                    stats.count,
                    stats.mean,
                    stats.std_dev,
                    stats.min,
                    stats.q25,
                    stats.median,
                    stats.q75,
                    stats.max,
                ));
            }
        }

        if !self.categorical_frequencies.is_empty() {
            out.push_str("\n## 分类字段统计\n");
            for table in &self.categorical_frequencies {
                out.push_str(&format!("\n### {}\n\n", table.column));
                out.push_str("| 值 | 频次 | 占比(%) |\n| --- | --- | --- |\n");
                for entry in &table.entries {
                    out.push_str(&format!(
                        "| {} | {} | {} |\n",
                        entry.value, entry.count, entry.percentage
                    ));
                }
            }
        }

        out
    }
}

// ============================================================================
// TESTS
// ============================================================================
