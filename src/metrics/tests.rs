//! Tests for percentile uplift statistics

use super::*;

fn descending_scores(n: usize) -> Vec<f64> {
    (0..n).map(|i| (n - i) as f64 / n as f64).collect()
}

fn alternating(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i % 2) as f64).collect()
}

#[test]
fn test_overall_two_bins() {
    // Scores already descending, treatment alternating: each bucket of 4
    // holds 2 treated and 2 control units.
    let y_true = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0];
    let uplift = descending_scores(8);
    let treatment = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];

    let table = uplift_by_percentile(
        &y_true,
        &uplift,
        &treatment,
        &UpliftByPercentileOptions {
            bins: 2,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(table.bins.len(), 2);
    assert_eq!(table.percentiles(), vec![50.0, 100.0]);

    let top = &table.bins[0];
    assert_eq!(top.n_treatment, 2);
    assert_eq!(top.n_control, 2);
    assert_eq!(top.response_rate_treatment, 1.0);
    assert_eq!(top.response_rate_control, 0.0);
    assert_eq!(top.uplift, 1.0);
    assert_eq!(top.std_uplift, 0.0);

    let bottom = &table.bins[1];
    assert_eq!(bottom.response_rate_treatment, 0.5);
    assert_eq!(bottom.response_rate_control, 0.0);
    assert_eq!(bottom.uplift, 0.5);
    // p(1-p)/n = 0.5 * 0.5 / 2
    assert!((bottom.std_treatment - 0.125f64.sqrt()).abs() < 1e-12);
    assert!((bottom.std_uplift - 0.125f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_overall_ranking_descending() {
    // Highest predicted uplift lands in the first bucket regardless of
    // input order.
    let y_true = vec![1.0, 0.0, 0.0, 0.0];
    let uplift = vec![0.1, 0.2, 0.3, 0.9];
    let treatment = vec![0.0, 1.0, 0.0, 1.0];

    let table = uplift_by_percentile(
        &y_true,
        &uplift,
        &treatment,
        &UpliftByPercentileOptions {
            bins: 2,
            ..Default::default()
        },
    )
    .unwrap();

    // First bucket: indices 3 (t, y=0) and 2 (c, y=0).
    assert_eq!(table.bins[0].n_treatment, 1);
    assert_eq!(table.bins[0].n_control, 1);
    assert_eq!(table.bins[0].response_rate_treatment, 0.0);
    // Second bucket: indices 1 (t, y=0) and 0 (c, y=1).
    assert_eq!(table.bins[1].response_rate_control, 1.0);
    assert_eq!(table.bins[1].uplift, -1.0);
}

#[test]
fn test_uneven_split_leading_buckets_larger() {
    let n = 10;
    let y_true = vec![0.0; n];
    let uplift = descending_scores(n);
    let treatment = alternating(n);

    let table = uplift_by_percentile(
        &y_true,
        &uplift,
        &treatment,
        &UpliftByPercentileOptions {
            bins: 3,
            ..Default::default()
        },
    )
    .unwrap();

    let sizes: Vec<usize> = table
        .bins
        .iter()
        .map(|b| b.n_treatment + b.n_control)
        .collect();
    assert_eq!(sizes, vec![4, 3, 3]);
}

#[test]
fn test_by_group_strategy_bins_within_groups() {
    let y_true = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
    let uplift = vec![0.1, 0.9, 0.8, 0.2, 0.7, 0.3, 0.6, 0.4];
    let treatment = vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0];

    let table = uplift_by_percentile(
        &y_true,
        &uplift,
        &treatment,
        &UpliftByPercentileOptions {
            strategy: Strategy::ByGroup,
            bins: 2,
            total: false,
        },
    )
    .unwrap();

    assert_eq!(table.strategy, Strategy::ByGroup);
    // Treatment ranking: 0.9, 0.8 | 0.2, 0.1 -> rates 0.5, 0.5
    // Control ranking:   0.7, 0.6 | 0.4, 0.3 -> rates 1.0, 0.0
    assert_eq!(table.bins[0].response_rate_treatment, 0.5);
    assert_eq!(table.bins[0].response_rate_control, 1.0);
    assert_eq!(table.bins[0].uplift, -0.5);
    assert_eq!(table.bins[1].response_rate_control, 0.0);
    assert_eq!(table.bins[1].uplift, 0.5);
}

#[test]
fn test_empty_group_in_bucket_yields_nan() {
    // Top half of the ranking is all treated; the control rate there is a
    // mean over nothing.
    let y_true = vec![1.0, 1.0, 0.0, 0.0];
    let uplift = vec![0.9, 0.8, 0.2, 0.1];
    let treatment = vec![1.0, 1.0, 0.0, 0.0];

    let table = uplift_by_percentile(
        &y_true,
        &uplift,
        &treatment,
        &UpliftByPercentileOptions {
            bins: 2,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(table.bins[0].n_control, 0);
    assert!(table.bins[0].response_rate_control.is_nan());
    assert!(table.bins[0].uplift.is_nan());
    assert!(table.bins[0].std_control.is_nan());
}

#[test]
fn test_total_row() {
    let y_true = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0];
    let uplift = descending_scores(8);
    let treatment = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];

    let table = uplift_by_percentile(
        &y_true,
        &uplift,
        &treatment,
        &UpliftByPercentileOptions {
            bins: 2,
            total: true,
            ..Default::default()
        },
    )
    .unwrap();

    let total = table.total.as_ref().expect("total row requested");
    assert_eq!(total.percentile, 100.0);
    assert_eq!(total.n_treatment, 4);
    assert_eq!(total.n_control, 4);
    assert_eq!(total.response_rate_treatment, 0.75);
    assert_eq!(total.response_rate_control, 0.0);
    assert_eq!(total.uplift, 0.75);
    // sqrt(0.75 * 0.25 / 4)
    assert!((total.std_treatment - 0.046875f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_length_mismatch_rejected() {
    let err = uplift_by_percentile(
        &[1.0, 0.0],
        &[0.5, 0.4, 0.3],
        &[1.0, 0.0],
        &UpliftByPercentileOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        MetricsError::LengthMismatch {
            y_true: 2,
            uplift: 3,
            treatment: 2
        }
    );
}

#[test]
fn test_empty_input_rejected() {
    let err =
        uplift_by_percentile(&[], &[], &[], &UpliftByPercentileOptions::default()).unwrap_err();
    assert_eq!(err, MetricsError::EmptyInput);
}

#[test]
fn test_non_binary_values_rejected() {
    let err = uplift_by_percentile(
        &[1.0, 0.0],
        &[0.5, 0.4],
        &[1.0, 2.0],
        &UpliftByPercentileOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, MetricsError::NonBinaryTreatment(2.0));

    let err = uplift_by_percentile(
        &[0.5, 0.0],
        &[0.5, 0.4],
        &[1.0, 0.0],
        &UpliftByPercentileOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, MetricsError::NonBinaryOutcome(0.5));
}

#[test]
fn test_bins_validation() {
    let y = vec![1.0, 0.0, 1.0, 0.0];
    let u = descending_scores(4);
    let t = alternating(4);

    let err = uplift_by_percentile(
        &y,
        &u,
        &t,
        &UpliftByPercentileOptions {
            bins: 0,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err, MetricsError::ZeroBins);

    let err = uplift_by_percentile(
        &y,
        &u,
        &t,
        &UpliftByPercentileOptions {
            bins: 5,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        MetricsError::BinsExceedSamples {
            bins: 5,
            available: 4
        }
    );

    // ByGroup caps at the smaller group.
    let err = uplift_by_percentile(
        &y,
        &u,
        &t,
        &UpliftByPercentileOptions {
            strategy: Strategy::ByGroup,
            bins: 3,
            total: false,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        MetricsError::BinsExceedSamples {
            bins: 3,
            available: 2
        }
    );
}

#[test]
fn test_table_serde_round_trip() {
    let y_true = vec![1.0, 0.0, 1.0, 0.0];
    let uplift = descending_scores(4);
    let treatment = alternating(4);

    let table = uplift_by_percentile(
        &y_true,
        &uplift,
        &treatment,
        &UpliftByPercentileOptions {
            bins: 2,
            ..Default::default()
        },
    )
    .unwrap();

    let json = serde_json::to_string(&table).unwrap();
    let back: PercentileTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
}
