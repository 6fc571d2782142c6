//! Progress tracking utilities
//!
//! [`ProgressTracker`] counts processed items and reports each time the count crosses a
//! multiple of its interval. Reports go to the log by default; a custom reporter can be
//! injected with [`ProgressTracker::with_reporter`].

use log::info;

use crate::logging::format_count;

/// Receives progress milestones: the tracker's message and the count reached.
pub type Reporter = Box<dyn FnMut(&str, u64)>;

fn log_reporter(message: &str, count: u64) {
    info!("{message} {}", format_count(count));
}

/// Progress tracker that reports at regular intervals.
///
/// # Example
/// ```
/// use fixbam_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Processed fragments").with_interval(100);
///
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // Reports at 100, 200
/// }
/// tracker.log_final(); // Reports "Processed fragments 250 (complete)"
/// ```
pub struct ProgressTracker {
    /// Progress is reported when the count crosses multiples of this.
    interval: u64,
    /// Message prefix for reports.
    message: String,
    /// Items processed so far.
    count: u64,
    reporter: Reporter,
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("interval", &self.interval)
            .field("message", &self.message)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl ProgressTracker {
    /// Create a new progress tracker with the specified message.
    ///
    /// The tracker starts with a count of 0, an interval of 1,000,000 and reports to the log.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            interval: 1_000_000,
            message: message.into(),
            count: 0,
            reporter: Box::new(log_reporter),
        }
    }

    /// Set the reporting interval. An interval of 0 is treated as 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Replace the default log reporter.
    #[must_use]
    pub fn with_reporter<F>(mut self, reporter: F) -> Self
    where
        F: FnMut(&str, u64) + 'static,
    {
        self.reporter = Box::new(reporter);
        self
    }

    /// Add to the count and report every interval boundary crossed.
    ///
    /// Returns `true` if the new count is exactly a multiple of the interval.
    pub fn log_if_needed(&mut self, additional: u64) -> bool {
        let prev = self.count;
        self.count += additional;

        for i in (prev / self.interval + 1)..=(self.count / self.interval) {
            (self.reporter)(&self.message, i * self.interval);
        }

        self.count > 0 && self.count.is_multiple_of(self.interval)
    }

    /// Report the final count, unless it was just reported as a milestone.
    pub fn log_final(&mut self) {
        if self.count > 0 && !self.count.is_multiple_of(self.interval) {
            let message = format!("{} (complete)", self.message);
            (self.reporter)(&message, self.count);
        }
    }

    /// The current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The reporting interval.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }
}
