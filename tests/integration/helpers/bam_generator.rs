//! Utilities for generating and reading test BAM data.

#![allow(dead_code)]

use fixbam_lib::sam::builder::RecordBuilder;
use noodles::bam;
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record_buf::RecordBuf;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Creates a queryname-sorted header with a single reference sequence.
pub fn create_minimal_header(ref_name: &str, ref_len: usize) -> Header {
    use bstr::BString;
    use noodles::sam::header::record::value::map::Map as HeaderRecordMap;
    use noodles::sam::header::record::value::map::header::tag::Tag as HeaderTag;
    use noodles::sam::header::record::value::{
        Map, map::Header as HeaderRecord, map::ReferenceSequence,
    };
    use std::num::NonZeroUsize;

    let HeaderTag::Other(sort_order_tag) = HeaderTag::from([b'S', b'O']) else { unreachable!() };

    let header_map = HeaderRecordMap::<HeaderRecord>::builder()
        .insert(sort_order_tag, "queryname")
        .build()
        .expect("valid header map");

    let reference_sequence = Map::<ReferenceSequence>::new(
        NonZeroUsize::new(ref_len).expect("reference length must be non-zero"),
    );

    Header::builder()
        .set_header(header_map)
        .add_reference_sequence(BString::from(ref_name), reference_sequence)
        .build()
}

/// Creates a mapped read 1 record on reference 0.
pub fn first_read(name: &str, pos: usize, mate_pos: usize, tlen: i32) -> RecordBuf {
    RecordBuilder::new()
        .name(name)
        .first_segment(true)
        .reference_sequence_id(0)
        .alignment_start(pos)
        .sequence("ACGTACGTAC")
        .mate_reference_sequence_id(0)
        .mate_alignment_start(mate_pos)
        .template_length(tlen)
        .build()
}

/// Creates a mapped read 2 record on reference 0.
pub fn second_read(name: &str, pos: usize, mate_pos: usize, tlen: i32) -> RecordBuf {
    RecordBuilder::new()
        .name(name)
        .first_segment(false)
        .reference_sequence_id(0)
        .alignment_start(pos)
        .sequence("TTGGCCAATT")
        .mate_reference_sequence_id(0)
        .mate_alignment_start(mate_pos)
        .template_length(tlen)
        .build()
}

/// Creates a record that is neither read 1 nor read 2.
pub fn unpaired_read(name: &str, pos: usize) -> RecordBuf {
    RecordBuilder::new()
        .name(name)
        .flags(Flags::empty())
        .reference_sequence_id(0)
        .alignment_start(pos)
        .sequence("ACGTACGTAC")
        .build()
}

/// Creates a correctly paired fragment whose read 2 mate fields are stale.
pub fn stale_pair(name: &str, pos: usize) -> Vec<RecordBuf> {
    vec![first_read(name, pos, pos + 100, 110), second_read(name, pos + 100, 1, 0)]
}

/// Writes `records` to a BAM file with the given header.
pub fn write_bam(path: &Path, header: &Header, records: &[RecordBuf]) {
    let mut writer =
        bam::io::Writer::new(fs::File::create(path).expect("Failed to create BAM file"));
    writer.write_header(header).expect("Failed to write header");
    for record in records {
        writer.write_alignment_record(header, record).expect("Failed to write record");
    }
    writer.finish(header).expect("Failed to finish BAM");
}

/// Reads the header and all records of a BAM file.
pub fn read_bam(path: &Path) -> (Header, Vec<RecordBuf>) {
    let mut reader =
        bam::io::reader::Builder.build_from_path(path).expect("Failed to open output BAM");
    let header = reader.read_header().expect("Failed to read header");
    let records = reader
        .record_bufs(&header)
        .collect::<std::io::Result<Vec<_>>>()
        .expect("Failed to read records");
    (header, records)
}

/// Runs `fixbam fix-mates` with the given input, output and extra arguments.
pub fn run_fix_mates(input: &Path, output: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fixbam"))
        .arg("fix-mates")
        .args(["--input", input.to_str().unwrap(), "--output", output.to_str().unwrap()])
        .args(extra)
        .output()
        .expect("Failed to run fixbam")
}

/// Read names of `records`, in order.
pub fn names(records: &[RecordBuf]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            r.name().map(|n| String::from_utf8_lossy(n.as_ref()).into_owned()).unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_minimal_header() {
        let header = create_minimal_header("chr1", 1000);
        assert_eq!(header.reference_sequences().len(), 1);
        assert!(header.header().is_some());
    }

    #[test]
    fn test_stale_pair() {
        let pair = stale_pair("frag", 100);
        assert!(pair[0].flags().is_first_segment());
        assert!(pair[1].flags().is_last_segment());
        assert_ne!(pair[1].mate_alignment_start(), pair[0].alignment_start());
    }
}
