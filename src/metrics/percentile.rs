//! Percentile uplift statistics
//!
//! Buckets observations into percentile bins of the predicted-uplift ranking
//! and computes per-bin treatment/control response rates, uplift, and
//! standard deviations.

use serde::{Deserialize, Serialize};

use super::error::{MetricsError, Result};

/// Binning strategy for percentile statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Bins drawn from the uplift ranking of the whole population
    #[default]
    Overall,
    /// Treatment and control each binned within their own ranking
    ByGroup,
}

/// Options for [`uplift_by_percentile`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpliftByPercentileOptions {
    /// Binning strategy
    pub strategy: Strategy,
    /// Number of percentile buckets
    pub bins: usize,
    /// Append a whole-population summary row
    pub total: bool,
}

impl Default for UpliftByPercentileOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Overall,
            bins: 10,
            total: false,
        }
    }
}

/// Summary statistics for one percentile bucket
///
/// Response rates are NaN when the corresponding group has no members in
/// the bucket, mirroring a mean over an empty slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBin {
    /// Upper edge of the bucket as a cumulative percentile of the ranking
    pub percentile: f64,
    /// Treated units in the bucket
    pub n_treatment: usize,
    /// Control units in the bucket
    pub n_control: usize,
    /// Fraction of treated units with a positive outcome
    pub response_rate_treatment: f64,
    /// Fraction of control units with a positive outcome
    pub response_rate_control: f64,
    /// Treatment rate minus control rate
    pub uplift: f64,
    /// Standard deviation of the treatment response rate
    pub std_treatment: f64,
    /// Standard deviation of the control response rate
    pub std_control: f64,
    /// Standard deviation of the uplift estimate
    pub std_uplift: f64,
}

/// Per-bucket statistics ordered by ascending percentile boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileTable {
    /// Strategy the table was computed with
    pub strategy: Strategy,
    /// One entry per bucket, ascending percentile order
    pub bins: Vec<PercentileBin>,
    /// Whole-population summary, present when requested
    pub total: Option<PercentileBin>,
}

impl PercentileTable {
    /// Percentile boundaries of the buckets, ascending
    pub fn percentiles(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.percentile).collect()
    }
}

/// Which side of the treatment indicator a statistic is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Treatment,
    Control,
}

impl Group {
    fn flag(self) -> f64 {
        match self {
            Self::Treatment => 1.0,
            Self::Control => 0.0,
        }
    }
}

/// Per-bucket response rate, variance, and group size for one group
struct GroupStats {
    n: Vec<usize>,
    rate: Vec<f64>,
    variance: Vec<f64>,
}

/// Compute response-rate/uplift statistics per percentile bucket.
///
/// Observations are ranked by `uplift` descending (stable order among ties)
/// and split into `options.bins` contiguous chunks; when the population does
/// not divide evenly, the leading chunks take one extra observation each.
///
/// # Arguments
/// * `y_true` - Binary outcomes (0 or 1)
/// * `uplift` - Predicted uplift scores
/// * `treatment` - Binary treatment indicators (0 or 1)
/// * `options` - Strategy, bucket count, and total-row flag
///
/// # Errors
/// Length mismatches, empty input, non-binary outcome/treatment values, and
/// bucket counts that are zero or exceed the available samples are rejected.
pub fn uplift_by_percentile(
    y_true: &[f64],
    uplift: &[f64],
    treatment: &[f64],
    options: &UpliftByPercentileOptions,
) -> Result<PercentileTable> {
    validate_inputs(y_true, uplift, treatment)?;
    validate_bins(treatment, options)?;

    let bins = options.bins;
    let trmnt = response_rate_by_percentile(
        y_true,
        uplift,
        treatment,
        Group::Treatment,
        options.strategy,
        bins,
    );
    let ctrl = response_rate_by_percentile(
        y_true,
        uplift,
        treatment,
        Group::Control,
        options.strategy,
        bins,
    );

    let rows = (0..bins)
        .map(|i| {
            let percentile = round_half_even((i + 1) as f64 * 100.0 / bins as f64);
            make_bin(percentile, &trmnt, &ctrl, i)
        })
        .collect();

    let total = if options.total {
        let t = response_rate_by_percentile(
            y_true,
            uplift,
            treatment,
            Group::Treatment,
            options.strategy,
            1,
        );
        let c = response_rate_by_percentile(
            y_true,
            uplift,
            treatment,
            Group::Control,
            options.strategy,
            1,
        );
        Some(make_bin(100.0, &t, &c, 0))
    } else {
        None
    };

    Ok(PercentileTable {
        strategy: options.strategy,
        bins: rows,
        total,
    })
}

fn make_bin(percentile: f64, trmnt: &GroupStats, ctrl: &GroupStats, i: usize) -> PercentileBin {
    PercentileBin {
        percentile,
        n_treatment: trmnt.n[i],
        n_control: ctrl.n[i],
        response_rate_treatment: trmnt.rate[i],
        response_rate_control: ctrl.rate[i],
        uplift: trmnt.rate[i] - ctrl.rate[i],
        std_treatment: trmnt.variance[i].sqrt(),
        std_control: ctrl.variance[i].sqrt(),
        std_uplift: (trmnt.variance[i] + ctrl.variance[i]).sqrt(),
    }
}

fn validate_inputs(y_true: &[f64], uplift: &[f64], treatment: &[f64]) -> Result<()> {
    if y_true.len() != uplift.len() || uplift.len() != treatment.len() {
        return Err(MetricsError::LengthMismatch {
            y_true: y_true.len(),
            uplift: uplift.len(),
            treatment: treatment.len(),
        });
    }
    if y_true.is_empty() {
        return Err(MetricsError::EmptyInput);
    }
    if let Some(&v) = treatment.iter().find(|&&v| v != 0.0 && v != 1.0) {
        return Err(MetricsError::NonBinaryTreatment(v));
    }
    if let Some(&v) = y_true.iter().find(|&&v| v != 0.0 && v != 1.0) {
        return Err(MetricsError::NonBinaryOutcome(v));
    }
    Ok(())
}

fn validate_bins(treatment: &[f64], options: &UpliftByPercentileOptions) -> Result<()> {
    if options.bins == 0 {
        return Err(MetricsError::ZeroBins);
    }
    let available = match options.strategy {
        Strategy::Overall => treatment.len(),
        Strategy::ByGroup => {
            let n_trmnt = treatment.iter().filter(|&&t| t == 1.0).count();
            n_trmnt.min(treatment.len() - n_trmnt)
        }
    };
    if options.bins > available {
        return Err(MetricsError::BinsExceedSamples {
            bins: options.bins,
            available,
        });
    }
    Ok(())
}

/// Round half to even, matching Python/numpy rounding of boundary values.
fn round_half_even(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor == 0.5 {
        if (floor / 2.0).fract() == 0.0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        x.round()
    }
}

/// Indices sorted by score descending; stable among equal scores.
fn descending_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Chunk lengths for splitting `n` items into `bins` contiguous parts,
/// leading parts one longer when the split is uneven.
fn chunk_sizes(n: usize, bins: usize) -> Vec<usize> {
    let base = n / bins;
    let extra = n % bins;
    (0..bins).map(|i| base + usize::from(i < extra)).collect()
}

fn response_rate_by_percentile(
    y_true: &[f64],
    uplift: &[f64],
    treatment: &[f64],
    group: Group,
    strategy: Strategy,
    bins: usize,
) -> GroupStats {
    let flag = group.flag();

    let chunks: Vec<Vec<usize>> = match strategy {
        Strategy::Overall => {
            // Rank the whole population, then filter to the group inside
            // each chunk.
            let order = descending_order(uplift);
            let mut chunks = Vec::with_capacity(bins);
            let mut start = 0;
            for size in chunk_sizes(order.len(), bins) {
                let members: Vec<usize> = order[start..start + size]
                    .iter()
                    .copied()
                    .filter(|&i| treatment[i] == flag)
                    .collect();
                chunks.push(members);
                start += size;
            }
            chunks
        }
        Strategy::ByGroup => {
            // Rank the group on its own, then split that ranking.
            let group_idx: Vec<usize> =
                (0..treatment.len()).filter(|&i| treatment[i] == flag).collect();
            let mut order = group_idx;
            order.sort_by(|&a, &b| uplift[b].total_cmp(&uplift[a]));
            let mut chunks = Vec::with_capacity(bins);
            let mut start = 0;
            for size in chunk_sizes(order.len(), bins) {
                chunks.push(order[start..start + size].to_vec());
                start += size;
            }
            chunks
        }
    };

    let mut stats = GroupStats {
        n: Vec::with_capacity(bins),
        rate: Vec::with_capacity(bins),
        variance: Vec::with_capacity(bins),
    };
    for members in &chunks {
        let n = members.len();
        let rate = if n == 0 {
            f64::NAN
        } else {
            members.iter().map(|&i| y_true[i]).sum::<f64>() / n as f64
        };
        let variance = if n == 0 {
            f64::NAN
        } else {
            rate * (1.0 - rate) / n as f64
        };
        stats.n.push(n);
        stats.rate.push(rate);
        stats.variance.push(variance);
    }
    stats
}
