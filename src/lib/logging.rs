//! Logging utilities for formatted output.
//!
//! Consistent, human-readable formatting of percentages, durations and throughput, an
//! operation timer, and the end-of-run summary of an error-profiling pass.

use std::time::{Duration, Instant};

use errprof_metrics::{ErrorProfile, ProfileBucket, format_count};
use errprof_sam::BaseClass;
use log::info;

use crate::profiler::ProfileStats;

/// Formats a fraction as a percentage with the given number of decimals.
///
/// # Examples
///
/// ```
/// use errprof_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration in human-readable form (e.g., "45s", "2m 15s", "1h 30m").
///
/// # Examples
///
/// ```
/// use errprof_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a processing throughput (e.g., "1,234 records/s", "30.0 records/min").
///
/// # Examples
///
/// ```
/// use errprof_lib::logging::format_throughput;
/// use std::time::Duration;
///
/// assert_eq!(format_throughput(1000, Duration::from_secs(1)), "1,000 records/s");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_throughput(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        let per_min = count as f64 / (secs / 60.0);
        format!("{per_min:.1} records/min")
    }
}

/// Logs the outcome of an error-profiling pass: record counts, skipped records by reason,
/// and base totals with the overall substitution rate for each active bucket.
#[allow(clippy::cast_precision_loss)]
pub fn log_profile_summary(stats: &ProfileStats, profile: &ErrorProfile, buckets: &[ProfileBucket]) {
    info!("Records read: {}", format_count(stats.records_read));
    info!("Reads analyzed: {}", format_count(stats.records_analyzed));

    let skipped = stats.skipped.total();
    if skipped > 0 {
        info!("Records skipped: {}", format_count(skipped));
        for (reason, count) in stats.skipped.iter() {
            info!("  {reason}: {}", format_count(count));
        }
    }

    for &bucket in buckets {
        let table = profile.table(bucket);
        let total = table.total();
        if total == 0 {
            info!("{} 0 bases", bucket.name());
            continue;
        }
        let subs = table.class_total(BaseClass::Substitution);
        info!(
            "{} {} bases, substitution rate {}",
            bucket.name(),
            format_count(total),
            format_percent(subs as f64 / total as f64, 4)
        );
    }
}

/// Logs the start of an operation and, on completion, its duration and throughput.
///
/// # Examples
///
/// ```no_run
/// use errprof_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Profiling errors");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with record count and throughput.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        info!(
            "{} completed: {} records in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_throughput(count, duration)
        );
    }
}
