//! Chart error types

use thiserror::Error;

use crate::metrics::MetricsError;

/// Errors raised while building or drawing a chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart kind {0:?}: expected \"line\" or \"bar\"")]
    InvalidKind(String),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;
