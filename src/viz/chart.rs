//! Uplift-by-percentile chart model
//!
//! [`UpliftChart`] is an owned figure description: series data, tick model,
//! and styling. Nothing here touches a drawing backend; rendering lives in
//! the `render` module so the chart data stays inspectable in tests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::{uplift_by_percentile, Strategy, UpliftByPercentileOptions};

use super::error::{ChartError, Result};
use super::labels::percentile_range_labels;

/// Fallback inter-bucket spacing when the chart has a single bucket
pub(crate) const SINGLE_BIN_SPACING: f64 = 5.0;

/// Fraction of the inter-bucket spacing used as bar width and offset
pub(crate) const BAR_WIDTH_RATIO: f64 = 0.35;

/// How the three series are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Error-bar line series with a shaded treatment/control band
    #[default]
    Line,
    /// Grouped bars per percentile bucket
    Bar,
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            other => Err(ChartError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Bar => write!(f, "bar"),
        }
    }
}

/// Chart construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Line or bar rendering
    pub kind: ChartKind,
    /// Number of percentile buckets
    pub bins: usize,
    /// Label x ticks as percentile ranges instead of raw boundaries
    pub string_percentiles: bool,
    /// Figure size in abstract units, rendered at 100 px per unit
    pub figsize: (f64, f64),
    /// Optional chart title
    pub title: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            bins: 10,
            string_percentiles: true,
            figsize: (10.0, 6.0),
            title: None,
        }
    }
}

/// One plotted series: values with their standard deviations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub values: Vec<f64>,
    pub std: Vec<f64>,
}

/// A renderable uplift-by-percentile figure
///
/// Created by [`uplift_by_percentile_chart`]; owned by the caller, who
/// decides whether to draw it onto a backend or persist it. Accessors expose
/// the underlying series data so behavior can be asserted without pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpliftChart {
    kind: ChartKind,
    string_percentiles: bool,
    figsize: (f64, f64),
    title: Option<String>,
    percentiles: Vec<f64>,
    treatment: ChartSeries,
    control: ChartSeries,
    uplift: ChartSeries,
}

/// Build an uplift-by-percentile chart from raw observations.
///
/// Delegates the statistics to [`uplift_by_percentile`] with the overall
/// strategy and no total row, then captures the per-bucket series in
/// ascending percentile order. Constructing the chart performs no drawing
/// and has no side effects.
///
/// # Arguments
/// * `y_true` - Binary outcomes (0 or 1)
/// * `uplift` - Predicted uplift scores
/// * `treatment` - Binary treatment indicators (0 or 1)
/// * `config` - Kind, bucket count, labeling, size, and title
///
/// # Errors
/// Input validation failures from the metrics layer propagate unchanged.
pub fn uplift_by_percentile_chart(
    y_true: &[f64],
    uplift: &[f64],
    treatment: &[f64],
    config: &ChartConfig,
) -> Result<UpliftChart> {
    let table = uplift_by_percentile(
        y_true,
        uplift,
        treatment,
        &UpliftByPercentileOptions {
            strategy: Strategy::Overall,
            bins: config.bins,
            total: false,
        },
    )?;

    let mut chart = UpliftChart {
        kind: config.kind,
        string_percentiles: config.string_percentiles,
        figsize: config.figsize,
        title: config.title.clone(),
        percentiles: Vec::with_capacity(table.bins.len()),
        treatment: ChartSeries {
            values: Vec::with_capacity(table.bins.len()),
            std: Vec::with_capacity(table.bins.len()),
        },
        control: ChartSeries {
            values: Vec::with_capacity(table.bins.len()),
            std: Vec::with_capacity(table.bins.len()),
        },
        uplift: ChartSeries {
            values: Vec::with_capacity(table.bins.len()),
            std: Vec::with_capacity(table.bins.len()),
        },
    };
    for bin in &table.bins {
        chart.percentiles.push(bin.percentile);
        chart.treatment.values.push(bin.response_rate_treatment);
        chart.treatment.std.push(bin.std_treatment);
        chart.control.values.push(bin.response_rate_control);
        chart.control.std.push(bin.std_control);
        chart.uplift.values.push(bin.uplift);
        chart.uplift.std.push(bin.std_uplift);
    }
    Ok(chart)
}

impl UpliftChart {
    /// Rendering kind
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Figure size in abstract units
    pub fn figsize(&self) -> (f64, f64) {
        self.figsize
    }

    /// Chart title, if any
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// X tick positions: percentile boundaries, ascending
    pub fn percentiles(&self) -> &[f64] {
        &self.percentiles
    }

    /// Treatment response-rate series
    pub fn treatment_series(&self) -> &ChartSeries {
        &self.treatment
    }

    /// Control response-rate series
    pub fn control_series(&self) -> &ChartSeries {
        &self.control
    }

    /// Uplift series
    pub fn uplift_series(&self) -> &ChartSeries {
        &self.uplift
    }

    /// X tick labels: raw boundaries, or range strings when requested
    pub fn tick_labels(&self) -> Vec<String> {
        if self.string_percentiles {
            percentile_range_labels(&self.percentiles)
        } else {
            self.percentiles.iter().map(|p| format!("{p:.0}")).collect()
        }
    }

    /// True when the line rendering draws a y = 0 reference line
    pub fn has_zero_line(&self) -> bool {
        self.kind == ChartKind::Line && self.uplift.values.iter().any(|&u| u < 0.0)
    }

    /// Spacing between adjacent buckets on the x axis
    pub(crate) fn inter_bin_spacing(&self) -> f64 {
        if self.percentiles.len() > 1 {
            self.percentiles[1] - self.percentiles[0]
        } else {
            SINGLE_BIN_SPACING
        }
    }

    /// Width of each bar, and the offset between the bar groups
    pub fn bar_width(&self) -> f64 {
        self.inter_bin_spacing() * BAR_WIDTH_RATIO
    }

    /// X center positions `[treatment, control, uplift]` per bucket;
    /// `None` for line charts
    pub fn bar_positions(&self) -> Option<Vec<[f64; 3]>> {
        if self.kind != ChartKind::Bar {
            return None;
        }
        let w = self.bar_width();
        Some(
            self.percentiles
                .iter()
                .map(|&p| [p - w, p, p + w])
                .collect(),
        )
    }
}
