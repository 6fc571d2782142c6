//! Stream driver: match mates group by group and write the repaired pairs.
//!
//! [`MateFixer`] pulls [`FragmentGroup`]s from a grouping iterator, hands each to a
//! [`MateMatcher`] and writes every resulting pair, read 1 then read 2, to a [`RecordSink`].
//! Output order follows input order: groups in the order they were read, and within a group
//! the order the matcher produced. The first error stops the run; whatever was written before
//! it stays written.

use anyhow::{Context, Result};
use noodles::sam::Header;
use noodles::sam::alignment::RecordBuf;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use std::io::Write;

use crate::grouper::FragmentGroup;
use crate::matcher::MateMatcher;
use crate::metrics::FixMatesMetrics;
use crate::progress::ProgressTracker;
use crate::record::MateRecord;

/// Destination for repaired records.
pub trait RecordSink<R> {
    /// Writes one record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    fn write_record(&mut self, record: &R) -> Result<()>;
}

impl<R: Clone> RecordSink<R> for Vec<R> {
    fn write_record(&mut self, record: &R) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Writes records to a BAM writer using the header the writer was opened with.
pub struct BamRecordSink<'a, W: Write> {
    writer: &'a mut noodles::bam::io::Writer<W>,
    header: &'a Header,
}

impl<'a, W: Write> BamRecordSink<'a, W> {
    /// Wraps `writer`; `header` must be the header already written to it.
    pub fn new(writer: &'a mut noodles::bam::io::Writer<W>, header: &'a Header) -> Self {
        Self { writer, header }
    }
}

impl<W: Write> RecordSink<RecordBuf> for BamRecordSink<'_, W> {
    fn write_record(&mut self, record: &RecordBuf) -> Result<()> {
        self.writer.write_alignment_record(self.header, record).with_context(|| {
            format!("Failed to write record '{}'", String::from_utf8_lossy(record.fragment_id()))
        })
    }
}

/// Drives mate repair over a stream of fragment groups.
#[derive(Debug)]
pub struct MateFixer {
    matcher: MateMatcher,
    progress: ProgressTracker,
    metrics: FixMatesMetrics,
}

impl MateFixer {
    /// Message used for progress reports.
    pub const PROGRESS_MESSAGE: &'static str = "Processed fragments";

    /// Creates a driver that reports progress to the log every 1,000,000 fragments.
    #[must_use]
    pub fn new(matcher: MateMatcher) -> Self {
        Self {
            matcher,
            progress: ProgressTracker::new(Self::PROGRESS_MESSAGE),
            metrics: FixMatesMetrics::default(),
        }
    }

    /// Replaces the progress tracker.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressTracker) -> Self {
        self.progress = progress;
        self
    }

    /// Counts accumulated so far.
    #[must_use]
    pub fn metrics(&self) -> &FixMatesMetrics {
        &self.metrics
    }

    /// Consumes the driver, returning its counts.
    #[must_use]
    pub fn into_metrics(self) -> FixMatesMetrics {
        self.metrics
    }

    /// Matches and writes every group from `groups`.
    ///
    /// Pairs of a group are written before the next group is pulled, so on error every group
    /// preceding the failure has been fully written.
    ///
    /// # Errors
    /// Returns the first error yielded by `groups` or raised by `sink`.
    pub fn run<I, R, S>(&mut self, groups: I, sink: &mut S) -> Result<()>
    where
        I: IntoIterator<Item = Result<FragmentGroup<R>>>,
        R: MateRecord + Clone,
        S: RecordSink<R> + ?Sized,
    {
        for group in groups {
            let group = group?;
            let (firsts, seconds) = (group.first_count(), group.second_count());

            let matches = self.matcher.match_group(group);
            for pair in &matches.pairs {
                sink.write_record(&pair.first)?;
                sink.write_record(&pair.second)?;
            }

            self.metrics.record_group(firsts, seconds, &matches);
            self.progress.log_if_needed(1);
        }

        self.progress.log_final();
        Ok(())
    }
}
