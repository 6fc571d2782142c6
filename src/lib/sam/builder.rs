//! Fluent construction of alignment records for tests and fixtures.
//!
//! ```rust
//! use fixbam_lib::sam::builder::RecordBuilder;
//!
//! let r2 = RecordBuilder::new()
//!     .name("frag1")
//!     .first_segment(false)
//!     .reference_sequence_id(0)
//!     .alignment_start(200)
//!     .mate_alignment_start(999)
//!     .template_length(-1)
//!     .build();
//!
//! assert!(r2.flags().is_last_segment());
//! ```

use noodles::core::Position;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::{QualityScores, RecordBuf, Sequence};

/// Base quality assigned when a sequence is given without qualities.
pub const DEFAULT_BASE_QUALITY: u8 = 30;

/// Builder for a single [`RecordBuf`].
///
/// Positions are 1-based. A CIGAR of `{len}M` is generated whenever a sequence is set on a
/// placed record.
#[derive(Debug)]
pub struct RecordBuilder {
    name: Option<Vec<u8>>,
    flags: Flags,
    reference_sequence_id: Option<usize>,
    alignment_start: Option<usize>,
    mapping_quality: Option<u8>,
    sequence: Vec<u8>,
    qualities: Vec<u8>,
    mate_reference_sequence_id: Option<usize>,
    mate_alignment_start: Option<usize>,
    template_length: Option<i32>,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            flags: Flags::empty(),
            reference_sequence_id: None,
            alignment_start: None,
            mapping_quality: Some(60),
            sequence: Vec::new(),
            qualities: Vec::new(),
            mate_reference_sequence_id: None,
            mate_alignment_start: None,
            template_length: None,
        }
    }

    /// Sets the read name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.as_bytes().to_vec());
        self
    }

    /// Sets all flags at once.
    #[must_use]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Marks the record as read 1 (`true`) or read 2 (`false`). Implies paired.
    #[must_use]
    pub fn first_segment(mut self, is_first: bool) -> Self {
        self.flags.set(Flags::SEGMENTED, true);
        self.flags.set(Flags::FIRST_SEGMENT, is_first);
        self.flags.set(Flags::LAST_SEGMENT, !is_first);
        self
    }

    /// Sets the reference sequence ID (0-based).
    #[must_use]
    pub fn reference_sequence_id(mut self, id: usize) -> Self {
        self.reference_sequence_id = Some(id);
        self
    }

    /// Sets the alignment start position (1-based).
    #[must_use]
    pub fn alignment_start(mut self, pos: usize) -> Self {
        self.alignment_start = Some(pos);
        self
    }

    /// Sets the sequence, filling qualities with [`DEFAULT_BASE_QUALITY`] if unset.
    #[must_use]
    pub fn sequence(mut self, seq: &str) -> Self {
        self.sequence = seq.as_bytes().to_vec();
        if self.qualities.is_empty() {
            self.qualities = vec![DEFAULT_BASE_QUALITY; seq.len()];
        }
        self
    }

    /// Sets the mate reference sequence ID (0-based).
    #[must_use]
    pub fn mate_reference_sequence_id(mut self, id: usize) -> Self {
        self.mate_reference_sequence_id = Some(id);
        self
    }

    /// Sets the mate alignment start position (1-based).
    #[must_use]
    pub fn mate_alignment_start(mut self, pos: usize) -> Self {
        self.mate_alignment_start = Some(pos);
        self
    }

    /// Sets the template length (insert size).
    #[must_use]
    pub fn template_length(mut self, tlen: i32) -> Self {
        self.template_length = Some(tlen);
        self
    }

    /// Builds the `RecordBuf`.
    ///
    /// # Panics
    ///
    /// Panics if a position of 0 was given.
    #[must_use]
    pub fn build(self) -> RecordBuf {
        let mut record = RecordBuf::default();

        if let Some(name) = self.name {
            *record.name_mut() = Some(name.into());
        }
        *record.flags_mut() = self.flags;

        *record.reference_sequence_id_mut() = self.reference_sequence_id;
        *record.alignment_start_mut() = self
            .alignment_start
            .map(|pos| Position::try_from(pos).expect("alignment_start must be >= 1"));

        *record.mate_reference_sequence_id_mut() = self.mate_reference_sequence_id;
        *record.mate_alignment_start_mut() = self
            .mate_alignment_start
            .map(|pos| Position::try_from(pos).expect("mate_alignment_start must be >= 1"));
        if let Some(tlen) = self.template_length {
            *record.template_length_mut() = tlen;
        }

        *record.mapping_quality_mut() = self.mapping_quality.and_then(MappingQuality::new);

        if !self.sequence.is_empty() && self.alignment_start.is_some() {
            *record.cigar_mut() = [Op::new(Kind::Match, self.sequence.len())].into_iter().collect();
        }
        *record.sequence_mut() = Sequence::from(self.sequence);
        *record.quality_scores_mut() = QualityScores::from(self.qualities);

        record
    }
}
