//! Uplift chart construction and rendering
//!
//! - `labels`: pure percentile-range label formatting
//! - `chart`: the owned chart model and its construction from observations
//! - `render`: drawing onto plotters backends

mod chart;
mod error;
mod labels;
mod render;


pub use chart::{uplift_by_percentile_chart, ChartConfig, ChartKind, ChartSeries, UpliftChart};
pub use error::ChartError;
pub use labels::percentile_range_labels;
