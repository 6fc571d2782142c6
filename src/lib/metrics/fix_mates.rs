//! Metrics for the `fix-mates` command.

use serde::{Deserialize, Serialize};

use super::Metric;
use crate::matcher::GroupMatches;

/// Counts describing one run of mate repair.
///
/// Record counts refer to input records except `records_written`. With the reuse policy a
/// read 2 record may be written more than once, so `records_written` can exceed the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixMatesMetrics {
    /// Fragment groups processed
    pub fragments: u64,
    /// Read 1 records seen
    pub first_records: u64,
    /// Read 2 records seen
    pub second_records: u64,
    /// Pairs written
    pub pairs_written: u64,
    /// Records written (two per pair)
    pub records_written: u64,
    /// Read 1 records dropped because no read 2 matched
    pub unmatched_first_records: u64,
    /// Read 2 records dropped because no read 1 matched them
    pub unmatched_second_records: u64,
}

impl FixMatesMetrics {
    /// Adds the outcome of one fragment group.
    pub fn record_group<R>(&mut self, firsts: usize, seconds: usize, matches: &GroupMatches<R>) {
        self.fragments += 1;
        self.first_records += firsts as u64;
        self.second_records += seconds as u64;
        self.pairs_written += matches.pairs.len() as u64;
        self.records_written += 2 * matches.pairs.len() as u64;
        self.unmatched_first_records += matches.unmatched_firsts as u64;
        self.unmatched_second_records += matches.unmatched_seconds as u64;
    }
}

impl Metric for FixMatesMetrics {
    fn metric_name() -> &'static str {
        "mate fixing"
    }
}
