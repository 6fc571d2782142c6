//! `fix-mates` command implementation.
//!
//! Re-pairs read 1 and read 2 records of each read-name group by position and rewrites the
//! read 2 mate position and template length from the read 1 it pairs with.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use fixbam_lib::bam_io::{create_bam_reader, create_bam_writer};
use fixbam_lib::fixer::{BamRecordSink, MateFixer};
use fixbam_lib::grouper::FragmentGroupIterator;
use fixbam_lib::header::add_pg_record;
use fixbam_lib::logging::{OperationTimer, log_fix_mates_summary};
use fixbam_lib::matcher::{MatchPolicy, MateMatcher};
use fixbam_lib::metrics::write_metrics;
use fixbam_lib::progress::ProgressTracker;
use fixbam_lib::sam::check_query_grouping;
use fixbam_lib::validation::validate_positive;

use super::command::Command;
use super::common::{BamIoOptions, CompressionOptions, ThreadingOptions};

/// Repairs mate position and template length of paired reads
#[derive(Parser, Debug)]
#[command(
    name = "fix-mates",
    about = "\x1b[38;5;173m[POST-ALIGNMENT]\x1b[0m \x1b[36mRepair mate information in name-grouped BAM files\x1b[0m",
    long_about = r#"
Re-pairs read 1 and read 2 records by position and repairs the mate information of read 2.

The input must be queryname sorted or query grouped, e.g.:

  samtools sort -n in.bam -o in.qname.bam

Within each group of records sharing a read name, every read 1 record is matched to the
first read 2 record (in input order) aligned to the same reference whose position equals
the read 1's mate position. The read 2 record gets its mate position set to the read 1's
position and its template length set to the negated read 1 template length. Each matched
pair is written read 1 first, then read 2. Read 1 records without a match and read 2
records never matched are dropped.

By default a read 2 record may pair with several read 1 records (`--match-policy reuse`),
in which case it is written once per pair. With `--match-policy consume` each read 2 record
is written at most once.

Every input record must be read 1 or read 2 of a paired read; any other record aborts the
run. Records of one read name that are not adjacent are treated as separate fragments
unless `--validate-grouping` is given, which makes that an error instead.
"#
)]
pub struct FixMates {
    /// Input/output BAM options
    #[command(flatten)]
    pub io: BamIoOptions,

    /// What to do with a read 2 record once it has been matched
    #[arg(short = 'p', long = "match-policy", value_enum, default_value_t = MatchPolicy::Reuse)]
    pub match_policy: MatchPolicy,

    /// Fail if a read name reappears after its group ended (uses memory per read name)
    #[arg(long = "validate-grouping", default_value = "false")]
    pub validate_grouping: bool,

    /// Optional output file for metrics
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,

    /// Log progress every this many fragments
    #[arg(long = "progress-interval", default_value_t = 1_000_000)]
    pub progress_interval: u64,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,

    /// Compression options for output BAM
    #[command(flatten)]
    pub compression: CompressionOptions,
}

impl Command for FixMates {
    fn execute(&self, command_line: &str) -> Result<()> {
        self.io.validate()?;
        self.compression.validate()?;
        validate_positive(self.progress_interval, "progress-interval")?;

        info!("FixMates");
        info!("  Input: {}", self.io.input.display());
        info!("  Output: {}", self.io.output.display());
        info!("  Match policy: {:?}", self.match_policy);
        info!("  Validate grouping: {}", self.validate_grouping);
        info!("  {}", self.threading.log_message());

        let timer = OperationTimer::new("Fixing mates");
        let threads = self.threading.num_threads();

        let (mut reader, header) = create_bam_reader(&self.io.input, threads)?;
        check_query_grouping(&header, &self.io.input);

        let output_header =
            add_pg_record(header.clone(), env!("CARGO_PKG_VERSION"), command_line)?;
        let mut writer = create_bam_writer(
            &self.io.output,
            &output_header,
            threads,
            self.compression.compression_level,
        )?;

        let records = reader.record_bufs(&header).map(|r| r.map_err(Into::into));
        let groups =
            FragmentGroupIterator::new(records).with_contiguity_check(self.validate_grouping);

        let progress =
            ProgressTracker::new(MateFixer::PROGRESS_MESSAGE).with_interval(self.progress_interval);
        let mut fixer = MateFixer::new(MateMatcher::new(self.match_policy)).with_progress(progress);

        {
            let mut sink = BamRecordSink::new(&mut writer, &output_header);
            fixer
                .run(groups, &mut sink)
                .with_context(|| format!("Failed to fix mates in: {}", self.io.input.display()))?;
        }

        writer
            .into_inner()
            .finish()
            .with_context(|| format!("Failed to finish output BAM: {}", self.io.output.display()))?;

        let metrics = fixer.into_metrics();
        log_fix_mates_summary(&metrics);

        if let Some(path) = &self.metrics {
            write_metrics(path, std::slice::from_ref(&metrics))?;
            info!("Wrote metrics to {}", path.display());
        }

        timer.log_completion(metrics.records_written);
        Ok(())
    }
}
