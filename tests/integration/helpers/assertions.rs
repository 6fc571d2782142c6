//! Assertions on repaired mate pairs.

#![allow(dead_code)]

use noodles::sam::alignment::record_buf::RecordBuf;

/// Asserts that `second` was repaired to point back at `first`.
///
/// # Panics
///
/// Panics if the records are not read 1 then read 2 with consistent mate fields.
pub fn assert_repaired_pair(first: &RecordBuf, second: &RecordBuf) {
    assert!(first.flags().is_first_segment(), "expected read 1, got {:?}", first.flags());
    assert!(second.flags().is_last_segment(), "expected read 2, got {:?}", second.flags());
    assert_eq!(first.name(), second.name(), "pair records must share a name");
    assert_eq!(
        second.mate_alignment_start(),
        first.alignment_start(),
        "read 2 mate position must be read 1 position for {:?}",
        second.name()
    );
    assert_eq!(
        second.template_length(),
        first.template_length().saturating_neg(),
        "read 2 template length must be negated read 1 length for {:?}",
        second.name()
    );
}

/// Asserts that `records` is a sequence of repaired read 1 / read 2 pairs.
///
/// # Panics
///
/// Panics if the count is odd or any pair is inconsistent.
pub fn assert_all_repaired(records: &[RecordBuf]) {
    assert_eq!(records.len() % 2, 0, "output must contain whole pairs");
    for pair in records.chunks(2) {
        assert_repaired_pair(&pair[0], &pair[1]);
    }
}
