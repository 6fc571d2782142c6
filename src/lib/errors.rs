//! Custom error types for fixbam operations.

use thiserror::Error;

/// Result type alias for fixbam operations
pub type Result<T> = std::result::Result<T, FixBamError>;

/// Error type for fixbam operations
#[derive(Error, Debug)]
pub enum FixBamError {
    /// A record is flagged as neither the first nor the second end of its fragment
    #[error(
        "Record '{name}' is neither read 1 nor read 2 (flags: {flags:#06x}); \
         input must contain paired-end reads only"
    )]
    InvalidRecord {
        /// The read name of the offending record
        name: String,
        /// The raw SAM flags of the offending record
        flags: u16,
    },

    /// A fragment was seen again after its group had already been closed
    #[error(
        "Fragment '{name}' seen non-consecutively; input must be grouped by read name \
         (e.g. samtools sort -n)"
    )]
    FragmentNotContiguous {
        /// The read name that reappeared
        name: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "BAM", "Input BAM")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}
