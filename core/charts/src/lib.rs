//! FILENAME: core/charts/src/lib.rs
//!
//! PURPOSE: Declarative chart layer of the dashboard. Aggregated tables go
//! in, renderer-ready `ChartSpec` values come out; nothing here draws or
//! holds state.

pub mod builders;
pub mod spec;

pub use builders::{bar_chart, horizontal_bar_chart, line_chart, pie_chart, scatter_chart};
pub use spec::{ChartKind, ChartSpec, ChartStyle, Orientation};
