//! FILENAME: core/analytics/src/filter.rs
//!
//! Tri-state dimension filters and the stable row filter they drive.
//! "Never touched" and "explicitly cleared" are different states: the
//! first passes every row, the second passes none.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dataset::{schema, DataTable};

// ============================================================================
// FILTER STATE
// ============================================================================

/// Selection state of one filter dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DimensionFilter {
    /// No constraint; every value passes.
    Unset,
    /// Only the listed display values pass. An empty list passes nothing.
    Explicit(Vec<String>),
}

impl Default for DimensionFilter {
    fn default() -> Self {
        DimensionFilter::Unset
    }
}

impl DimensionFilter {
    pub fn is_unset(&self) -> bool {
        matches!(self, DimensionFilter::Unset)
    }

    /// Whether a cell's display value passes this dimension.
    pub fn allows(&self, label: &str) -> bool {
        match self {
            DimensionFilter::Unset => true,
            DimensionFilter::Explicit(values) => values.iter().any(|v| v == label),
        }
    }
}

/// Inclusive calendar interval: both endpoints are kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Everything the user has dialed in on the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub regions: DimensionFilter,
    pub categories: DimensionFilter,
    pub date_range: Option<DateInterval>,
}

impl FilterSelection {
    /// True when nothing constrains the table and filtering is the
    /// identity.
    pub fn is_default_all(&self) -> bool {
        self.regions.is_unset() && self.categories.is_unset() && self.date_range.is_none()
    }
}

// ============================================================================
// ROW FILTERING
// ============================================================================

/// Returns the rows matching `selection`, in their original order.
///
/// A clause over a column the table does not have is a no-op for that
/// clause alone. With an active date range, rows whose 日期 cell did not
/// parse to a date are excluded; their position inside the range is
/// unknowable.
pub fn apply_filters(table: &DataTable, selection: &FilterSelection) -> DataTable {
    let region_index = table.column_index(schema::REGION);
    let category_index = table.column_index(schema::CATEGORY);
    let date_index = table.column_index(schema::DATE);

    let mut filtered = DataTable::new(table.headers().to_vec());
    for row in table.rows() {
        if let Some(index) = region_index {
            if !selection.regions.allows(&row[index].display_value()) {
                continue;
            }
        }
        if let Some(index) = category_index {
            if !selection.categories.allows(&row[index].display_value()) {
                continue;
            }
        }
        if let (Some(range), Some(index)) = (selection.date_range, date_index) {
            match row[index].as_date() {
                Some(date) if range.contains(date) => {}
                _ => continue,
            }
        }
        filtered.push_row(row.to_vec());
    }
    filtered
}

/// Distinct display values of `column` in first-seen order, for
/// populating a dimension control.
pub fn column_options(table: &DataTable, column: &str) -> Vec<String> {
    table.unique_labels(column)
}

/// Minimum and maximum parsed date of the 日期 column, for date-picker
/// bounds. `None` when the column is absent or holds no parsed dates.
pub fn date_bounds(table: &DataTable) -> Option<DateInterval> {
    let values = table.column_values(schema::DATE)?;
    let mut bounds: Option<DateInterval> = None;
    for value in values {
        if let Some(date) = value.as_date() {
            bounds = Some(match bounds {
                None => DateInterval::new(date, date),
                Some(b) => DateInterval::new(b.start.min(date), b.end.max(date)),
            });
        }
    }
    bounds
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::DataValue;

    fn sales_table() -> DataTable {
        let mut table = DataTable::new(vec![
            schema::DATE.to_string(),
            schema::REGION.to_string(),
            schema::CATEGORY.to_string(),
        ]);
        let rows = [
            ("2023-01-05", "北京", "电子产品"),
            ("2023-01-06", "上海", "服装"),
            ("2023-02-10", "北京", "食品"),
            ("2023-03-15", "广州", "电子产品"),
        ];
        for (date, region, category) in rows {
            table.push_row(vec![
                DataValue::Date(date.parse().unwrap()),
                DataValue::Text(region.to_string()),
                DataValue::Text(category.to_string()),
            ]);
        }
        table
    }

    #[test]
    fn test_default_selection_is_identity() {
        let table = sales_table();
        let filtered = apply_filters(&table, &FilterSelection::default());
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_explicit_empty_selection_keeps_nothing() {
        let table = sales_table();
        let selection = FilterSelection {
            regions: DimensionFilter::Explicit(Vec::new()),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&table, &selection).row_count(), 0);
    }

    #[test]
    fn test_region_filter_preserves_row_order() {
        let table = sales_table();
        let selection = FilterSelection {
            regions: DimensionFilter::Explicit(vec!["北京".to_string()]),
            ..FilterSelection::default()
        };
        let filtered = apply_filters(&table, &selection);
        assert_eq!(filtered.row_count(), 2);
        assert_eq!(filtered.value(0, 0), Some(&DataValue::Date("2023-01-05".parse().unwrap())));
        assert_eq!(filtered.value(1, 0), Some(&DataValue::Date("2023-02-10".parse().unwrap())));
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let table = sales_table();
        let selection = FilterSelection {
            regions: DimensionFilter::Explicit(vec!["北京".to_string()]),
            categories: DimensionFilter::Explicit(vec!["食品".to_string()]),
            ..FilterSelection::default()
        };
        let filtered = apply_filters(&table, &selection);
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.value(0, 1), Some(&DataValue::Text("北京".to_string())));
    }

    #[test]
    fn test_date_range_is_inclusive_at_both_ends() {
        let table = sales_table();
        let selection = FilterSelection {
            date_range: Some(DateInterval::new(
                "2023-01-06".parse().unwrap(),
                "2023-02-10".parse().unwrap(),
            )),
            ..FilterSelection::default()
        };
        let filtered = apply_filters(&table, &selection);
        assert_eq!(filtered.row_count(), 2);
    }

    #[test]
    fn test_unparsed_date_cell_is_excluded_by_date_range() {
        let mut table = sales_table();
        table.push_row(vec![
            DataValue::Text("not a date".to_string()),
            DataValue::Text("北京".to_string()),
            DataValue::Text("服装".to_string()),
        ]);
        let selection = FilterSelection {
            date_range: Some(DateInterval::new(
                "2023-01-01".parse().unwrap(),
                "2023-12-31".parse().unwrap(),
            )),
            ..FilterSelection::default()
        };
        // All four parsed dates survive; the malformed row does not.
        assert_eq!(apply_filters(&table, &selection).row_count(), 4);
    }

    #[test]
    fn test_filter_on_absent_column_is_noop() {
        let mut table = DataTable::new(vec![schema::CATEGORY.to_string()]);
        table.push_row(vec![DataValue::Text("服装".to_string())]);

        let selection = FilterSelection {
            regions: DimensionFilter::Explicit(vec!["北京".to_string()]),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&table, &selection).row_count(), 1);
    }

    #[test]
    fn test_date_bounds_span_min_and_max() {
        let table = sales_table();
        let bounds = date_bounds(&table).unwrap();
        assert_eq!(bounds.start, "2023-01-05".parse::<NaiveDate>().unwrap());
        assert_eq!(bounds.end, "2023-03-15".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn test_column_options_first_seen_order() {
        let table = sales_table();
        assert_eq!(column_options(&table, schema::REGION), vec!["北京", "上海", "广州"]);
        assert!(column_options(&table, "库存").is_empty());
    }
}
