//! Formatting helpers and summary logging.

use std::time::{Duration, Instant};

use crate::metrics::FixMatesMetrics;

/// Formats a count with comma thousands separators.
///
/// # Examples
///
/// ```
/// use fixbam_lib::logging::format_count;
///
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// assert_eq!(format_count(123), "123");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// ```
/// use fixbam_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration as e.g. "45s", "2m 15s" or "1h 30m".
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let (mins, rem) = (secs / 60, secs % 60);
        if rem == 0 { format!("{mins}m") } else { format!("{mins}m {rem}s") }
    } else {
        let (hours, mins) = (secs / 3600, (secs % 3600) / 60);
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a throughput, falling back to items/min below one item per second.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} items/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} items/s", format_count(rate as u64))
    } else {
        format!("{:.1} items/min", count as f64 / (secs / 60.0))
    }
}

/// Logs the outcome of a mate-fixing run.
#[allow(clippy::cast_precision_loss)]
pub fn log_fix_mates_summary(metrics: &FixMatesMetrics) {
    log::info!("Mate Fixing Summary:");
    log::info!("  Fragments: {}", format_count(metrics.fragments));
    log::info!("  Read 1 records: {}", format_count(metrics.first_records));
    log::info!("  Read 2 records: {}", format_count(metrics.second_records));
    log::info!("  Pairs written: {}", format_count(metrics.pairs_written));

    if metrics.first_records > 0 {
        let rate = metrics.pairs_written as f64 / metrics.first_records as f64;
        log::info!("  Read 1 records re-paired: {}", format_percent(rate, 2));
    }
    if metrics.unmatched_first_records > 0 || metrics.unmatched_second_records > 0 {
        log::info!(
            "  Dropped without a mate: {} read 1, {} read 2",
            format_count(metrics.unmatched_first_records),
            format_count(metrics.unmatched_second_records)
        );
    }
}

/// Logs the start of an operation and, later, its duration and throughput.
///
/// ```no_run
/// use fixbam_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Fixing mates");
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
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
