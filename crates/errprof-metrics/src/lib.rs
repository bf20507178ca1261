#![deny(unsafe_code)]

//! Quality-stratified error count tables and their serialized forms.
//!
//! This crate provides:
//! - [`Metric`] trait for types written as TSV metrics
//! - [`quality`] module with count tables, profile buckets and the long-format metric row
//! - [`skip`] module for tracking records that were not profiled
//! - [`writer`] module for TSV file output

pub mod quality;
pub mod skip;
pub mod writer;

use serde::{Deserialize, Serialize};

/// Number of decimal places printed for error rates.
pub const RATE_PRECISION: usize = 9;

/// Formats an error rate with the standard precision.
///
/// # Example
/// ```
/// use errprof_metrics::format_rate;
/// assert_eq!(format_rate(0.1), "0.100000000");
/// assert_eq!(format_rate(0.0), "0.000000000");
/// ```
#[must_use]
pub fn format_rate(value: f64) -> String {
    format!("{value:.RATE_PRECISION$}")
}

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type, used in error messages.
    fn metric_name() -> &'static str;
}

pub use quality::{BaseCounts, CountTable, ErrorProfile, ProfileBucket, QualityErrorMetric};
pub use skip::{SkipCounts, SkipReason, format_count};
pub use writer::{write_metrics, write_metrics_auto};
