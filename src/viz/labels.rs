//! Percentile range labels
//!
//! Pure label formatting, kept free of any rendering dependency.

/// Format percentile boundaries as contiguous range labels.
///
/// Bucket `i` covers `(boundary[i-1], boundary[i]]`; the first lower edge is
/// always rendered as 0. Boundaries of `[25, 50, 75, 100]` become
/// `["0-25", "25-50", "50-75", "75-100"]`.
pub fn percentile_range_labels(boundaries: &[f64]) -> Vec<String> {
    let mut labels = Vec::with_capacity(boundaries.len());
    let mut lower = 0.0;
    for &upper in boundaries {
        labels.push(format!("{lower:.0}-{upper:.0}"));
        lower = upper;
    }
    labels
}
