//! FILENAME: core/charts/src/spec.rs
//!
//! Declarative chart descriptions. A `ChartSpec` carries everything a
//! renderer needs (kind, titles, data series, styling); no drawing
//! happens in this crate.

use serde::{Deserialize, Serialize};

// ============================================================================
// CHART KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Vertical
    }
}

// ============================================================================
// STYLE
// ============================================================================

/// Rendering knobs shared by every chart on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    /// Pixel height of the rendered chart.
    pub height: u32,
    /// Layout template name, e.g. "plotly_white".
    pub template: String,
    /// Continuous color scale for value-shaded marks.
    pub color_scale: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            height: 400,
            template: "plotly_white".to_string(),
            color_scale: "Blues".to_string(),
        }
    }
}

// ============================================================================
// CHART SPEC
// ============================================================================

/// One renderable chart. Every kind binds `labels` to `values`
/// index-by-index; scatter charts also carry per-point `sizes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
    pub orientation: Orientation,
    /// Category labels, index-aligned with `values`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Series values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f64>,
    /// Per-point marker sizes for scatter charts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<f64>,
    pub style: ChartStyle,
}

impl ChartSpec {
    /// Number of rendered marks.
    pub fn point_count(&self) -> usize {
        self.labels.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================
