//! Writing metrics to TSV files.

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use std::path::Path;

use super::Metric;

/// Writes `metrics` as a headed TSV file, one row per value.
///
/// # Errors
/// Returns an error naming the metric type and path if the file cannot be written.
///
/// # Example
/// ```no_run
/// use fixbam_lib::metrics::{FixMatesMetrics, write_metrics};
///
/// write_metrics("fix_mates.metrics.tsv", &[FixMatesMetrics::default()]).unwrap();
/// ```
pub fn write_metrics<P: AsRef<Path>, T: Metric>(path: P, metrics: &[T]) -> Result<()> {
    let path = path.as_ref();
    DelimFile::default()
        .write_tsv(&path, metrics)
        .with_context(|| format!("Failed to write {} metrics: {}", T::metric_name(), path.display()))
}
