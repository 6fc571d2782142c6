//! End-to-end CLI tests for the fix-mates command.

use fixbam_lib::metrics::FixMatesMetrics;
use fgoxide::io::DelimFile;
use noodles::core::Position;
use noodles::sam::header::record::value::map::program::tag;
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::{
    assert_all_repaired, create_minimal_header, first_read, names, read_bam, run_fix_mates,
    second_read, stale_pair, unpaired_read, write_bam,
};

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_fix_mates_repairs_simple_pair() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let output = temp_dir.path().join("output.bam");

    let header = create_minimal_header("chr1", 10_000);
    write_bam(
        &input,
        &header,
        &[first_read("frag1", 100, 200, 150), second_read("frag1", 200, 999, -1)],
    );

    let result = run_fix_mates(&input, &output, &[]);
    assert!(result.status.success(), "fix-mates failed: {}", stderr(&result));

    let (out_header, records) = read_bam(&output);
    assert_eq!(records.len(), 2);
    assert_all_repaired(&records);
    assert_eq!(records[1].mate_alignment_start(), Position::new(100));
    assert_eq!(records[1].template_length(), -150);
    assert_eq!(records[0].template_length(), 150);

    assert_eq!(out_header.reference_sequences().len(), 1);
    let programs = out_header.programs();
    let pg = programs.as_ref().get(b"fixbam".as_slice()).expect("fixbam @PG record");
    let command_line = pg.other_fields().get(&tag::COMMAND_LINE).expect("CL tag");
    assert!(String::from_utf8_lossy(command_line.as_ref()).contains("fix-mates"));
}

#[test]
fn test_fix_mates_drops_unmatched_reads() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let output = temp_dir.path().join("output.bam");

    let header = create_minimal_header("chr1", 10_000);
    let mut records = vec![first_read("frag2", 50, 500, 0), second_read("frag2", 400, 50, 0)];
    records.extend(stale_pair("frag3", 1000));
    write_bam(&input, &header, &records);

    let result = run_fix_mates(&input, &output, &[]);
    assert!(result.status.success(), "fix-mates failed: {}", stderr(&result));

    let (_, records) = read_bam(&output);
    assert_eq!(names(&records), ["frag3", "frag3"]);
    assert_all_repaired(&records);
}

#[rstest]
#[case::reuse("reuse", 4)]
#[case::consume("consume", 2)]
fn test_fix_mates_match_policy(#[case] policy: &str, #[case] expected_records: usize) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let output = temp_dir.path().join("output.bam");

    let header = create_minimal_header("chr1", 10_000);
    write_bam(
        &input,
        &header,
        &[
            first_read("frag", 5, 10, 20),
            first_read("frag", 7, 10, 30),
            second_read("frag", 10, 1, 0),
        ],
    );

    let result = run_fix_mates(&input, &output, &["--match-policy", policy]);
    assert!(result.status.success(), "fix-mates failed: {}", stderr(&result));

    let (_, records) = read_bam(&output);
    assert_eq!(records.len(), expected_records);
    assert_all_repaired(&records);
    assert_eq!(records[0].alignment_start(), Position::new(5));
}

#[test]
fn test_fix_mates_aborts_on_unpaired_record() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let output = temp_dir.path().join("output.bam");

    let header = create_minimal_header("chr1", 10_000);
    let mut records = [stale_pair("a", 100), stale_pair("b", 300), stale_pair("c", 500)].concat();
    records.push(unpaired_read("d", 700));
    records.extend(stale_pair("e", 900));
    write_bam(&input, &header, &records);

    let result = run_fix_mates(&input, &output, &[]);
    assert!(!result.status.success());
    let err = stderr(&result);
    assert!(err.contains("'d' is neither read 1 nor read 2"), "unexpected stderr: {err}");

    let (_, written) = read_bam(&output);
    assert_eq!(names(&written), ["a", "a", "b", "b", "c", "c"]);
}

#[test]
fn test_fix_mates_writes_metrics() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let output = temp_dir.path().join("output.bam");
    let metrics_path = temp_dir.path().join("metrics.tsv");

    let header = create_minimal_header("chr1", 10_000);
    let mut records = [stale_pair("a", 100), stale_pair("b", 300)].concat();
    records.push(first_read("c", 500, 9000, 0));
    write_bam(&input, &header, &records);

    let result = run_fix_mates(&input, &output, &["--metrics", metrics_path.to_str().unwrap()]);
    assert!(result.status.success(), "fix-mates failed: {}", stderr(&result));

    let metrics: Vec<FixMatesMetrics> = DelimFile::default().read_tsv(&metrics_path).unwrap();
    assert_eq!(
        metrics,
        vec![FixMatesMetrics {
            fragments: 3,
            first_records: 3,
            second_records: 2,
            pairs_written: 2,
            records_written: 4,
            unmatched_first_records: 1,
            unmatched_second_records: 0,
        }]
    );
}

#[test]
fn test_fix_mates_validate_grouping() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let header = create_minimal_header("chr1", 10_000);

    let records = vec![
        first_read("a", 100, 200, 110),
        first_read("b", 300, 400, 110),
        second_read("a", 200, 1, 0),
    ];
    write_bam(&input, &header, &records);

    let lenient = temp_dir.path().join("lenient.bam");
    let result = run_fix_mates(&input, &lenient, &[]);
    assert!(result.status.success(), "fix-mates failed: {}", stderr(&result));
    let (_, written) = read_bam(&lenient);
    assert!(written.is_empty());

    let strict = temp_dir.path().join("strict.bam");
    let result = run_fix_mates(&input, &strict, &["--validate-grouping"]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("'a' seen non-consecutively"));
}

#[test]
fn test_fix_mates_output_is_stable_when_rerun() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let once = temp_dir.path().join("once.bam");
    let twice = temp_dir.path().join("twice.bam");

    let header = create_minimal_header("chr1", 10_000);
    write_bam(&input, &header, &[stale_pair("a", 100), stale_pair("b", 300)].concat());

    assert!(run_fix_mates(&input, &once, &[]).status.success());
    assert!(run_fix_mates(&once, &twice, &[]).status.success());

    let (_, first_pass) = read_bam(&once);
    let (second_header, second_pass) = read_bam(&twice);
    assert_eq!(first_pass, second_pass);
    assert!(second_header.programs().as_ref().contains_key(b"fixbam.1".as_slice()));
}

#[test]
fn test_fix_mates_multithreaded_matches_single_threaded() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let single = temp_dir.path().join("single.bam");
    let multi = temp_dir.path().join("multi.bam");

    let header = create_minimal_header("chr1", 100_000);
    let records: Vec<_> =
        (0..500).flat_map(|i| stale_pair(&format!("frag{i:04}"), 100 + i * 10)).collect();
    write_bam(&input, &header, &records);

    assert!(run_fix_mates(&input, &single, &[]).status.success());
    let result = run_fix_mates(&input, &multi, &["--threads", "4", "--compression-level", "6"]);
    assert!(result.status.success(), "fix-mates failed: {}", stderr(&result));

    let (_, single_records) = read_bam(&single);
    let (_, multi_records) = read_bam(&multi);
    assert_eq!(single_records.len(), 1000);
    assert_eq!(single_records, multi_records);
}

#[test]
fn test_fix_mates_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("missing.bam");
    let output = temp_dir.path().join("output.bam");

    let result = run_fix_mates(&input, &output, &[]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("File does not exist"));
    assert!(!output.exists());
}

#[rstest]
#[case::compression_too_low(&["--compression-level", "0"], "compression-level")]
#[case::compression_too_high(&["--compression-level", "13"], "compression-level")]
#[case::zero_progress_interval(&["--progress-interval", "0"], "progress-interval")]
fn test_fix_mates_rejects_invalid_parameters(#[case] args: &[&str], #[case] parameter: &str) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let output = temp_dir.path().join("output.bam");
    write_bam(&input, &create_minimal_header("chr1", 1000), &stale_pair("a", 100));

    let result = run_fix_mates(&input, &output, args);
    assert!(!result.status.success());
    assert!(stderr(&result).contains(parameter));
    assert!(!output.exists());
}
