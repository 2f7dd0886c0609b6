//! Uplift metrics by percentile
//!
//! Provides the percentile-bucket statistics the chart layer consumes:
//! - Ranking observations by predicted uplift and splitting into buckets
//! - Treatment/control response rates and their standard deviations
//! - Uplift (treatment rate minus control rate) per bucket

mod error;
mod percentile;

#[cfg(test)]
mod tests;

pub use error::MetricsError;
pub use percentile::{
    uplift_by_percentile, PercentileBin, PercentileTable, Strategy, UpliftByPercentileOptions,
};
