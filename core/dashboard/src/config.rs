//! FILENAME: core/dashboard/src/config.rs
//!
//! Session configuration. Everything deserializes from camelCase JSON
//! with every field optional, so a host can override one knob without
//! restating the rest.

use charts::ChartStyle;
use dataset::SampleConfig;
use serde::{Deserialize, Serialize};

// ============================================================================
// FILTERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    /// Upper bound on values per dimension filter; longer selections are
    /// clipped, not rejected.
    pub max_selections: usize,
    /// Whether a fresh load starts with every value selected (`Unset`)
    /// or with nothing selected.
    pub default_all: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig { max_selections: 10, default_all: true }
    }
}

// ============================================================================
// EXPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Row cap on downloads; larger filtered tables are truncated.
    pub max_rows: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig { max_rows: 10_000 }
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub filters: FilterConfig,
    pub chart: ChartStyle,
    pub export: ExportConfig,
    pub sample: SampleConfig,
}

// ============================================================================
// TESTS
// ============================================================================
