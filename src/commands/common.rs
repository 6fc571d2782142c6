//! Option groups shared by commands, composed with `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use fixbam_lib::validation::{validate_compression_level, validate_file_exists};

/// Input/output options for commands that read a BAM and write a BAM.
#[derive(Debug, Clone, Args)]
pub struct BamIoOptions {
    /// Input BAM file, grouped by read name
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output BAM file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl BamIoOptions {
    /// Validates that the input exists and is not also the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist or equals the output path.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.input, "Input BAM")?;
        if self.input == self.output {
            anyhow::bail!("Input and output must differ: {}", self.input.display());
        }
        Ok(())
    }
}

/// BGZF threading options.
///
/// Record processing is always sequential; extra threads only (de)compress BGZF blocks.
#[derive(Debug, Clone, Args)]
pub struct ThreadingOptions {
    /// Number of BGZF (de)compression threads for each of the input and output
    #[arg(long = "threads", default_value_t = 1)]
    pub threads: usize,
}

impl ThreadingOptions {
    /// Threads to use, treating 0 as 1.
    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.threads.max(1)
    }

    /// Human readable description for the startup log.
    #[must_use]
    pub fn log_message(&self) -> String {
        match self.num_threads() {
            1 => "single-threaded BGZF".to_string(),
            n => format!("{n} BGZF threads"),
        }
    }
}

/// Options for output compression.
#[derive(Debug, Clone, Args)]
pub struct CompressionOptions {
    /// Compression level for output BAM (1-12).
    ///
    /// Level 1 is fastest with larger files.
    /// Level 12 produces smallest files but is slowest.
    #[arg(long, default_value_t = 1)]
    pub compression_level: u32,
}

impl CompressionOptions {
    /// Validates the compression level.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is outside 1-12.
    pub fn validate(&self) -> anyhow::Result<()> {
        Ok(validate_compression_level(self.compression_level)?)
    }
}
