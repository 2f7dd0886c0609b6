//! Uplift-modeling evaluation: percentile metrics and chart rendering
//!
//! Given ground-truth binary outcomes, predicted uplift scores, and
//! treatment indicators, this crate buckets observations into percentile
//! bins of the predicted-uplift ranking and renders a chart comparing
//! treatment response rate, control response rate, and uplift, with error
//! bars.
//!
//! ## Architecture
//!
//! - `metrics`: percentile-bucket response-rate/uplift statistics
//! - `viz`: the owned chart model, label formatting, and plotters rendering
//!
//! ## Example
//!
//! ```
//! use uplift_eval::{uplift_by_percentile_chart, ChartConfig, ChartKind};
//!
//! let y_true = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0];
//! let uplift = vec![0.9, 0.8, 0.7, 0.6, 0.4, 0.3, 0.2, 0.1];
//! let treatment = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
//!
//! let chart = uplift_by_percentile_chart(
//!     &y_true,
//!     &uplift,
//!     &treatment,
//!     &ChartConfig {
//!         kind: ChartKind::Line,
//!         bins: 2,
//!         ..Default::default()
//!     },
//! )?;
//! let svg = chart.to_svg_string()?;
//! assert!(svg.contains("<svg"));
//! # Ok::<(), uplift_eval::ChartError>(())
//! ```

pub mod metrics;
pub mod viz;

pub use metrics::{
    uplift_by_percentile, MetricsError, PercentileBin, PercentileTable, Strategy,
    UpliftByPercentileOptions,
};
pub use viz::{
    percentile_range_labels, uplift_by_percentile_chart, ChartConfig, ChartError, ChartKind,
    ChartSeries, UpliftChart,
};
