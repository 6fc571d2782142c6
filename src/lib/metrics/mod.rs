//! Metrics collection and reporting.
//!
//! - [`fix_mates`] - Counts gathered while repairing mate information
//! - [`writer`] - Metrics file I/O utilities

pub mod fix_mates;
pub mod writer;

use serde::{Deserialize, Serialize};

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type.
    ///
    /// Used in error messages and logging when writing metrics files.
    fn metric_name() -> &'static str;
}

pub use fix_mates::FixMatesMetrics;
pub use writer::write_metrics;
