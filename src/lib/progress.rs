//! Progress tracking utilities
//!
//! A progress tracker for logging at regular intervals while streaming records. The
//! tracker keeps an internal count and logs when interval boundaries are crossed.

use log::info;

use errprof_metrics::format_count;

/// Default logging interval.
pub const DEFAULT_INTERVAL: u64 = 1_000_000;

/// Logs progress each time the count crosses a multiple of the interval.
///
/// # Example
/// ```
/// use errprof_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Processed records").with_interval(100);
/// for _ in 0..250 {
///     tracker.record(1); // Logs at 100, 200
/// }
/// tracker.log_final(); // Logs "Processed records 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: u64,
}

impl ProgressTracker {
    /// Creates a tracker with the default interval of 1,000,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: DEFAULT_INTERVAL, message: message.into(), count: 0 }
    }

    /// Sets the logging interval. A zero interval is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds to the count, logging once for every interval boundary crossed.
    ///
    /// Returns `true` if the new count lies exactly on an interval boundary.
    pub fn record(&mut self, additional: u64) -> bool {
        let prev = self.count;
        self.count += additional;

        for i in (prev / self.interval + 1)..=(self.count / self.interval) {
            info!("{} {}", self.message, format_count(i * self.interval));
        }

        self.on_boundary()
    }

    /// Logs the final count unless it was already logged at an interval boundary.
    pub fn log_final(&self) {
        if self.count > 0 && !self.on_boundary() {
            info!("{} {} (complete)", self.message, format_count(self.count));
        }
    }

    /// Items counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    fn on_boundary(&self) -> bool {
        self.count > 0 && self.count.is_multiple_of(self.interval)
    }
}
