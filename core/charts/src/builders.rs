//! FILENAME: core/charts/src/builders.rs
//!
//! Pure constructors from aggregate results to chart specs. Same inputs,
//! same spec; all ordering decisions are made by the aggregation layer
//! and preserved here.

use analytics::AggregateTable;

use crate::spec::{ChartKind, ChartSpec, ChartStyle, Orientation};

// ============================================================================
// CATEGORICAL BUILDERS
// ============================================================================

pub fn line_chart(
    aggregate: &AggregateTable,
    title: &str,
    x_title: &str,
    y_title: &str,
    style: &ChartStyle,
) -> ChartSpec {
    categorical(ChartKind::Line, aggregate, title, Some(x_title), Some(y_title), style)
}

pub fn bar_chart(
    aggregate: &AggregateTable,
    title: &str,
    x_title: &str,
    y_title: &str,
    style: &ChartStyle,
) -> ChartSpec {
    categorical(ChartKind::Bar, aggregate, title, Some(x_title), Some(y_title), style)
}

/// Horizontal bar chart. The rows arrive largest-first; they are reversed
/// here because horizontal renderers draw the first category at the
/// bottom, and rankings read top-down.
pub fn horizontal_bar_chart(
    aggregate: &AggregateTable,
    title: &str,
    x_title: &str,
    y_title: &str,
    style: &ChartStyle,
) -> ChartSpec {
    let mut spec =
        categorical(ChartKind::Bar, aggregate, title, Some(x_title), Some(y_title), style);
    spec.orientation = Orientation::Horizontal;
    spec.labels.reverse();
    spec.values.reverse();
    spec
}

pub fn pie_chart(aggregate: &AggregateTable, title: &str, style: &ChartStyle) -> ChartSpec {
    categorical(ChartKind::Pie, aggregate, title, None, None, style)
}

fn categorical(
    kind: ChartKind,
    aggregate: &AggregateTable,
    title: &str,
    x_title: Option<&str>,
    y_title: Option<&str>,
    style: &ChartStyle,
) -> ChartSpec {
    ChartSpec {
        kind,
        title: title.to_string(),
        x_title: x_title.map(|t| t.to_string()),
        y_title: y_title.map(|t| t.to_string()),
        orientation: Orientation::Vertical,
        labels: aggregate.labels(),
        values: aggregate.values(),
        sizes: Vec::new(),
        style: style.clone(),
    }
}

// ============================================================================
// SCATTER BUILDER
// ============================================================================

/// Scatter chart over a categorical axis. Marker sizes track the values,
/// so bigger outcomes draw bigger points.
pub fn scatter_chart(
    aggregate: &AggregateTable,
    title: &str,
    x_title: &str,
    y_title: &str,
    style: &ChartStyle,
) -> ChartSpec {
    let mut spec =
        categorical(ChartKind::Scatter, aggregate, title, Some(x_title), Some(y_title), style);
    spec.sizes = spec.values.clone();
    spec
}

// ============================================================================
// TESTS
// ============================================================================
