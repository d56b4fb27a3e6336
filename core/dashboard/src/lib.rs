//! FILENAME: core/dashboard/src/lib.rs
//! Dashboard Session Module
//!
//! Owns what the UI above it would otherwise scatter across widgets:
//! the loaded table, the validation report, the filter selection and
//! the option lists that drive the filter controls. `snapshot()` turns
//! that state into one serializable view-model; rendering it is someone
//! else's job.

pub mod config;
pub mod loader;
pub mod report;
pub mod views;

pub use config::{DashboardConfig, ExportConfig, FilterConfig};
pub use loader::{load_table, source_key, DataSource, LoadOutcome};
pub use report::{
    format_count, format_money, generate_summary_report, kpi_cards, KpiCard, SummaryReport,
};
pub use views::{sales_trend_chart, standard_charts, TrendPeriod};

use serde::Serialize;

use analytics::{
    apply_filters, column_options, date_bounds, frequency_table, numeric_summary, summarize,
    DateInterval, DimensionFilter, FilterSelection, FrequencyTable, KpiSummary, NumericColumnStats,
};
use charts::ChartSpec;
use dataset::{preprocess, schema, validate, DataTable, ValidationReport};
use persistence::{export_table, ExportFormat, PersistenceError};

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Categorical columns that get a frequency breakdown on the dashboard.
const FREQUENCY_COLUMNS: &[&str] = &[
    schema::CATEGORY,
    schema::REGION,
    schema::CUSTOMER_TYPE,
    schema::PAYMENT_METHOD,
];
const FREQUENCY_TOP_N: usize = 10;
const FREQUENCY_LABEL_CHARS: usize = 30;

/// Everything one render of the dashboard needs, computed over the
/// filtered table. Views whose columns are missing are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub kpis: KpiSummary,
    pub kpi_cards: Vec<KpiCard>,
    pub charts: Vec<ChartSpec>,
    pub frequencies: Vec<FrequencyTable>,
    pub numeric_stats: Vec<NumericColumnStats>,
    pub filtered_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Renders a snapshot from a preprocessed table and a filter selection.
/// Pure: same table, selection and config give the same snapshot.
pub fn render_dashboard(
    table: &DataTable,
    selection: &FilterSelection,
    config: &DashboardConfig,
) -> DashboardSnapshot {
    let filtered = apply_filters(table, selection);
    let kpis = summarize(&filtered);

    DashboardSnapshot {
        kpi_cards: report::kpi_cards(&kpis),
        kpis,
        charts: views::standard_charts(&filtered, &config.chart),
        frequencies: categorical_frequencies(&filtered),
        numeric_stats: numeric_summary(&filtered),
        filtered_rows: filtered.row_count(),
        warning: None,
    }
}

fn categorical_frequencies(table: &DataTable) -> Vec<FrequencyTable> {
    FREQUENCY_COLUMNS
        .iter()
        .filter_map(|column| frequency_table(table, column, FREQUENCY_TOP_N).ok())
        .map(|mut frequencies| {
            for entry in &mut frequencies.entries {
                entry.value = analytics::clip_label(&entry.value, FREQUENCY_LABEL_CHARS);
            }
            frequencies
        })
        .collect()
}

// ============================================================================
// SESSION
// ============================================================================

/// One user's dashboard state. Loading is memoized on the source key:
/// re-submitting the same source keeps the table and the filters;
/// a different source re-runs parse, validation and preprocessing and
/// resets the filters.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    config: DashboardConfig,
    source_key: Option<String>,
    table: DataTable,
    validation: ValidationReport,
    warning: Option<String>,
    region_options: Vec<String>,
    category_options: Vec<String>,
    date_bounds: Option<DateInterval>,
    selection: FilterSelection,
}

impl DashboardSession {
    pub fn new(config: DashboardConfig) -> Self {
        let selection = initial_selection(&config.filters);
        DashboardSession {
            config,
            source_key: None,
            table: DataTable::default(),
            validation: ValidationReport::default(),
            warning: None,
            region_options: Vec::new(),
            category_options: Vec::new(),
            date_bounds: None,
            selection,
        }
    }

    /// Loads `source` unless it is the one already loaded. Returns
    /// whether a fresh load ran; a memoized hit changes nothing, the
    /// filter selection included.
    pub fn load(&mut self, source: &DataSource) -> bool {
        let key = loader::source_key(source, &self.config.sample);
        if self.source_key.as_deref() == Some(key.as_str()) {
            log::debug!("source {} already loaded, keeping table and filters", key);
            return false;
        }

        let outcome = loader::load_table(source, &self.config.sample);
        self.validation = validate(&outcome.table);
        self.table = preprocess(&outcome.table);
        self.warning = outcome.warning;
        self.source_key = Some(key);

        self.region_options = column_options(&self.table, schema::REGION);
        self.category_options = column_options(&self.table, schema::CATEGORY);
        self.date_bounds = date_bounds(&self.table);
        self.selection = initial_selection(&self.config.filters);
        true
    }

    /// Drops the loaded table and every derived bit of state; the next
    /// `load` always runs fresh.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = DashboardSession::new(config);
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    /// The loaded, preprocessed table before filtering.
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn validation_report(&self) -> &ValidationReport {
        &self.validation
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Distinct 地区 values of the loaded table, first-seen order.
    pub fn region_options(&self) -> &[String] {
        &self.region_options
    }

    /// Distinct 产品类别 values of the loaded table, first-seen order.
    pub fn category_options(&self) -> &[String] {
        &self.category_options
    }

    /// Date-picker bounds: min and max parsed 日期 of the loaded table.
    pub fn date_bounds(&self) -> Option<DateInterval> {
        self.date_bounds
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    // ------------------------------------------------------------------
    // Filter mutators
    // ------------------------------------------------------------------

    pub fn set_regions(&mut self, values: Vec<String>) {
        self.selection.regions = self.clipped(values, schema::REGION);
    }

    pub fn set_categories(&mut self, values: Vec<String>) {
        self.selection.categories = self.clipped(values, schema::CATEGORY);
    }

    /// Back to "no constraint": every region passes, current and future.
    pub fn select_all_regions(&mut self) {
        self.selection.regions = DimensionFilter::Unset;
    }

    pub fn select_all_categories(&mut self) {
        self.selection.categories = DimensionFilter::Unset;
    }

    /// Explicitly nothing selected; no row passes this dimension.
    pub fn clear_regions(&mut self) {
        self.selection.regions = DimensionFilter::Explicit(Vec::new());
    }

    pub fn clear_categories(&mut self) {
        self.selection.categories = DimensionFilter::Explicit(Vec::new());
    }

    pub fn set_date_range(&mut self, range: Option<DateInterval>) {
        self.selection.date_range = range;
    }

    fn clipped(&self, mut values: Vec<String>, dimension: &str) -> DimensionFilter {
        let max = self.config.filters.max_selections;
        if values.len() > max {
            log::warn!(
                "{} selection clipped from {} to {} values",
                dimension,
                values.len(),
                max
            );
            values.truncate(max);
        }
        DimensionFilter::Explicit(values)
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// The loaded table with the current selection applied.
    pub fn filtered(&self) -> DataTable {
        apply_filters(&self.table, &self.selection)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let mut snapshot = render_dashboard(&self.table, &self.selection, &self.config);
        snapshot.warning = self.warning.clone();
        snapshot
    }

    pub fn summary_report(&self) -> SummaryReport {
        report::generate_summary_report(&self.filtered())
    }

    /// Serializes the filtered table for download. The configured row
    /// cap truncates oversized exports; an unsupported format name
    /// produces no bytes at all.
    pub fn export(&self, format_name: &str) -> Result<Vec<u8>, PersistenceError> {
        let format = ExportFormat::from_name(format_name)?;
        let filtered = self.filtered();

        let max_rows = self.config.export.max_rows;
        let capped = if filtered.row_count() > max_rows {
            log::warn!("export truncated from {} to {} rows", filtered.row_count(), max_rows);
            filtered.head(max_rows)
        } else {
            filtered
        };
        export_table(&capped, format)
    }
}

fn initial_selection(config: &FilterConfig) -> FilterSelection {
    if config.default_all {
        FilterSelection::default()
    } else {
        FilterSelection {
            regions: DimensionFilter::Explicit(Vec::new()),
            categories: DimensionFilter::Explicit(Vec::new()),
            date_range: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::DataValue;
    use persistence::UploadedFile;

    fn orders_upload() -> DataSource {
        let csv = "日期,地区,产品类别,销售额\n\
                   2023-01-05,北京,电子产品,1000\n\
                   2023-02-10,上海,服装,500\n\
                   2023-01-20,北京,电子产品,2000\n";
        DataSource::Upload(UploadedFile::new("orders.csv", csv.as_bytes().to_vec()))
    }

    #[test]
    fn test_load_populates_options_and_bounds() {
        let mut session = DashboardSession::new(DashboardConfig::default());
        assert!(session.load(&orders_upload()));

        assert_eq!(session.region_options(), ["北京", "上海"]);
        assert_eq!(session.category_options(), ["电子产品", "服装"]);
        let bounds = session.date_bounds().unwrap();
        assert_eq!(bounds.start.to_string(), "2023-01-05");
        assert_eq!(bounds.end.to_string(), "2023-02-10");
        assert!(session.validation_report().is_valid());
        assert_eq!(session.warning(), None);
    }

    #[test]
    fn test_memoized_load_keeps_filters() {
        let mut session = DashboardSession::new(DashboardConfig::default());
        session.load(&orders_upload());
        session.set_regions(vec!["北京".to_string()]);

        assert!(!session.load(&orders_upload()));
        assert_eq!(
            session.selection().regions,
            DimensionFilter::Explicit(vec!["北京".to_string()])
        );

        // A different source is a fresh load and resets the selection.
        assert!(session.load(&DataSource::Sample));
        assert!(session.selection().regions.is_unset());
    }

    #[test]
    fn test_reset_forces_next_load() {
        let mut session = DashboardSession::new(DashboardConfig::default());
        session.load(&orders_upload());
        session.reset();

        assert_eq!(session.table().row_count(), 0);
        assert!(session.load(&orders_upload()));
    }

    #[test]
    fn test_selection_clipping() {
        let mut config = DashboardConfig::default();
        config.filters.max_selections = 2;
        let mut session = DashboardSession::new(config);
        session.load(&orders_upload());

        session.set_regions(vec!["北京".to_string(), "上海".to_string(), "广州".to_string()]);
        assert_eq!(
            session.selection().regions,
            DimensionFilter::Explicit(vec!["北京".to_string(), "上海".to_string()])
        );
    }

    #[test]
    fn test_default_all_false_starts_empty() {
        let mut config = DashboardConfig::default();
        config.filters.default_all = false;
        let mut session = DashboardSession::new(config);
        session.load(&orders_upload());

        assert_eq!(session.filtered().row_count(), 0);
        session.select_all_regions();
        session.select_all_categories();
        assert_eq!(session.filtered().row_count(), 3);
    }

    #[test]
    fn test_snapshot_counts_filtered_rows() {
        let mut session = DashboardSession::new(DashboardConfig::default());
        session.load(&orders_upload());
        session.set_regions(vec!["北京".to_string()]);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.filtered_rows, 2);
        assert_eq!(snapshot.kpis.total_sales, Some(3000.0));
        assert_eq!(snapshot.kpi_cards[0].value, "¥3,000");
        assert_eq!(snapshot.warning, None);
    }

    #[test]
    fn test_frequencies_clip_long_labels() {
        let mut table = DataTable::new(vec![schema::CATEGORY.to_string()]);
        let long_label = "超".repeat(40);
        table.push_row(vec![DataValue::Text(long_label)]);

        let frequencies = categorical_frequencies(&table);
        assert_eq!(frequencies.len(), 1);
        let clipped = &frequencies[0].entries[0].value;
        assert_eq!(clipped.chars().count(), 33);
        assert!(clipped.ends_with("..."));
    }
}
