//! The view of an alignment record needed to repair mate information.
//!
//! Grouping and matching only look at six fields of a record: its fragment (read) name, the
//! reference it is aligned to, its own position, the position it believes its mate is at, its
//! template length and which end of the fragment it is. [`MateRecord`] exposes exactly those,
//! so the [`grouper`](crate::grouper) and [`matcher`](crate::matcher) work on any record type.
//! The BAM implementation is provided for noodles [`RecordBuf`].

use noodles::core::Position;
use noodles::sam::alignment::record_buf::RecordBuf;

use crate::errors::{FixBamError, Result};

/// Which end of a paired-end fragment a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndDesignator {
    /// Read 1 (SAM flag 0x40)
    First,
    /// Read 2 (SAM flag 0x80)
    Second,
}

/// An alignment record whose mate position and template length can be repaired.
pub trait MateRecord {
    /// The fragment (query) name shared by both ends of a pair.
    fn fragment_id(&self) -> &[u8];

    /// The reference sequence the record is aligned to, `None` when unplaced.
    fn reference_id(&self) -> Option<usize>;

    /// The leftmost mapped coordinate of the record.
    fn position(&self) -> Option<Position>;

    /// The record's current belief about its mate's leftmost coordinate.
    fn mate_position(&self) -> Option<Position>;

    /// The signed template length (insert size).
    fn fragment_length(&self) -> i32;

    /// Which end of the fragment this record is.
    ///
    /// # Errors
    ///
    /// Returns [`FixBamError::InvalidRecord`] if the record is neither read 1 nor read 2.
    fn end_designator(&self) -> Result<EndDesignator>;

    /// Overwrites the mate position.
    fn set_mate_position(&mut self, position: Option<Position>);

    /// Overwrites the template length.
    fn set_fragment_length(&mut self, length: i32);
}

impl MateRecord for RecordBuf {
    fn fragment_id(&self) -> &[u8] {
        self.name().map_or(&[][..], |n| <_ as AsRef<[u8]>>::as_ref(n))
    }

    fn reference_id(&self) -> Option<usize> {
        self.reference_sequence_id()
    }

    fn position(&self) -> Option<Position> {
        self.alignment_start()
    }

    fn mate_position(&self) -> Option<Position> {
        self.mate_alignment_start()
    }

    fn fragment_length(&self) -> i32 {
        self.template_length()
    }

    fn end_designator(&self) -> Result<EndDesignator> {
        let flags = self.flags();
        // Read 1 wins when both end flags are set.
        if flags.is_first_segment() {
            Ok(EndDesignator::First)
        } else if flags.is_last_segment() {
            Ok(EndDesignator::Second)
        } else {
            Err(FixBamError::InvalidRecord {
                name: String::from_utf8_lossy(self.fragment_id()).into_owned(),
                flags: u16::from(flags),
            })
        }
    }

    fn set_mate_position(&mut self, position: Option<Position>) {
        *self.mate_alignment_start_mut() = position;
    }

    fn set_fragment_length(&mut self, length: i32) {
        *self.template_length_mut() = length;
    }
}
