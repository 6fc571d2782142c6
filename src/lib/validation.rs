//! Input validation utilities
//!
//! Checks on command-line parameters and file paths, reported as [`FixBamError`]s.

use crate::errors::{FixBamError, Result};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::Path;

/// Valid BGZF compression levels.
pub const COMPRESSION_LEVELS: RangeInclusive<u32> = 1..=12;

/// Validate that a file exists
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use fixbam_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.bam", "Input BAM");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(FixBamError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use fixbam_lib::validation::validate_positive;
///
/// validate_positive(1000, "progress-interval").unwrap();
/// assert!(validate_positive(0, "progress-interval").is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(FixBamError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}

/// Validate a BGZF compression level.
///
/// # Errors
/// Returns an error if the level is outside [`COMPRESSION_LEVELS`]
pub fn validate_compression_level(level: u32) -> Result<()> {
    if !COMPRESSION_LEVELS.contains(&level) {
        return Err(FixBamError::InvalidParameter {
            parameter: "compression-level".to_string(),
            reason: format!(
                "Must be between {} and {}, got: {level}",
                COMPRESSION_LEVELS.start(),
                COMPRESSION_LEVELS.end()
            ),
        });
    }
    Ok(())
}
