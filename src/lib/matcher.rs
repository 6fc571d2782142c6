//! Mate matching within a fragment group.
//!
//! For every read 1 record, the read 2 records aligned to the same reference are scanned in
//! encounter order for the first one whose position equals the read 1's mate position. The
//! match gets its mate position set to the read 1's position and its template length set to the
//! negated read 1 template length, and the two are emitted as a [`MatchedPair`]. Read 1 records
//! without a match, and read 2 records never matched, produce no output.
//!
//! With [`MatchPolicy::Reuse`] a read 2 record stays a candidate after it is matched, so several
//! read 1 records with the same mate position all pair with it. [`MatchPolicy::Consume`] removes
//! it from the candidates instead.

use clap::ValueEnum;

use crate::grouper::FragmentGroup;
use crate::record::MateRecord;

/// What happens to a read 2 record once it has been matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchPolicy {
    /// Keep it as a candidate for later read 1 records (it may be emitted more than once).
    #[default]
    Reuse,
    /// Remove it from the candidates so it is emitted at most once.
    Consume,
}

/// A read 1 record and the read 2 record repaired to point back at it.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair<R> {
    /// The read 1 record, unchanged
    pub first: R,
    /// The read 2 record with mate position and template length rewritten
    pub second: R,
}

/// Everything produced from one fragment group.
#[derive(Debug, Clone)]
pub struct GroupMatches<R> {
    /// Matched pairs in emission order
    pub pairs: Vec<MatchedPair<R>>,
    /// Read 1 records for which no read 2 matched
    pub unmatched_firsts: usize,
    /// Read 2 records never matched by any read 1 record
    pub unmatched_seconds: usize,
}

/// Re-pairs read 1 and read 2 records of a fragment group by position.
#[derive(Debug, Clone, Copy, Default)]
pub struct MateMatcher {
    policy: MatchPolicy,
}

impl MateMatcher {
    /// Creates a matcher with the given policy for already-matched read 2 records.
    #[must_use]
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// The policy this matcher applies.
    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Matches every read 1 record of `group` against the read 2 records on its reference.
    ///
    /// References are visited in the order their first read 1 record was seen, and read 1
    /// records within a reference in encounter order; pairs are returned in that order.
    pub fn match_group<R>(&self, group: FragmentGroup<R>) -> GroupMatches<R>
    where
        R: MateRecord + Clone,
    {
        let FragmentGroup { firsts, mut seconds, .. } = group;
        let mut pairs = Vec::new();
        let mut unmatched_firsts = 0;
        let mut unmatched_seconds = 0;

        for (reference_id, reference_firsts) in firsts {
            let mut candidates = seconds.take(reference_id);
            let mut used = vec![false; candidates.len()];

            for first in reference_firsts {
                let Some(i) = candidates.iter().position(|s| s.position() == first.mate_position())
                else {
                    unmatched_firsts += 1;
                    continue;
                };

                let candidate = &mut candidates[i];
                candidate.set_mate_position(first.position());
                candidate.set_fragment_length(first.fragment_length().saturating_neg());

                let second = match self.policy {
                    MatchPolicy::Reuse => {
                        used[i] = true;
                        candidate.clone()
                    }
                    MatchPolicy::Consume => {
                        used.remove(i);
                        candidates.remove(i)
                    }
                };
                pairs.push(MatchedPair { first, second });
            }

            unmatched_seconds += used.iter().filter(|&&u| !u).count();
        }

        // Read 2 records on references without any read 1 record were never candidates.
        unmatched_seconds += seconds.len();

        GroupMatches { pairs, unmatched_firsts, unmatched_seconds }
    }
}
