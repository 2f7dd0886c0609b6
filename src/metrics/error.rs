//! Metric error types

use thiserror::Error;

/// Errors raised while validating inputs or computing percentile metrics
#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("input length mismatch: y_true={y_true}, uplift={uplift}, treatment={treatment}")]
    LengthMismatch {
        y_true: usize,
        uplift: usize,
        treatment: usize,
    },

    #[error("input sequences are empty")]
    EmptyInput,

    #[error("treatment indicator must be 0 or 1, got {0}")]
    NonBinaryTreatment(f64),

    #[error("outcome must be 0 or 1, got {0}")]
    NonBinaryOutcome(f64),

    #[error("bins must be a positive integer")]
    ZeroBins,

    #[error("bins={bins} exceeds available samples ({available})")]
    BinsExceedSamples { bins: usize, available: usize },
}

/// Result type for metric computations
pub type Result<T> = std::result::Result<T, MetricsError>;
