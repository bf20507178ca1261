//! End-to-end tests for the stitch-diff command.

use std::fs;
use tempfile::TempDir;

use crate::helpers::{SamLineBuilder, minimal_header, parse_report, run_errprof, write_gzip, write_sam};

const ALIGNMENTS: &str = "\
ID: read1 1:N:0:1
READ1: ACGTACGT--
READ2: --GTTCGTAA

ID: read2
READ1: AAAA
READ2: AAAA
";

#[test]
fn test_extracts_differences() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("alignments.txt");
    let output = temp_dir.path().join("diffs.txt");
    fs::write(&input, ALIGNMENTS).unwrap();

    let result = run_errprof(&[
        "stitch-diff",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(fs::read_to_string(&output).unwrap(), "read1\t2\tA\t!\tT\t!\n");
}

#[test]
fn test_include_matches_from_gzip() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("alignments.txt.gz");
    let output = temp_dir.path().join("diffs.txt");
    write_gzip(&input, "ID: r\nSUBJ: ACG\nQUER: ATG\n");

    let result = run_errprof(&[
        "stitch-diff",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--include-matches",
    ]);
    assert!(result.status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "r\t0\tA\t!\tA\t!\nr\t1\tC\t!\tT\t!\nr\t2\tG\t!\tG\t!\n"
    );
}

#[test]
fn test_output_feeds_count_errors() {
    let temp_dir = TempDir::new().unwrap();
    let alignments = temp_dir.path().join("alignments.txt");
    let diffs = temp_dir.path().join("diffs.txt");
    let sam = temp_dir.path().join("stitched.sam");
    let report = temp_dir.path().join("errors.txt");

    // the mates disagree at stitched positions 1 and 3
    fs::write(&alignments, "ID: s1\nREAD1: ACGTACGTAC\nREAD2: ATGCACGTAC\n").unwrap();
    write_sam(&sam, &minimal_header("chr1", 1000), &[SamLineBuilder::new("s1").md("1A8").build()]);

    let result = run_errprof(&[
        "stitch-diff",
        "-i",
        alignments.to_str().unwrap(),
        "-o",
        diffs.to_str().unwrap(),
    ]);
    assert!(result.status.success());

    let result = run_errprof(&[
        "count-errors",
        "-i",
        sam.to_str().unwrap(),
        "-o",
        report.to_str().unwrap(),
        "-s",
        diffs.to_str().unwrap(),
    ]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let sections = parse_report(&fs::read_to_string(&report).unwrap());
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0].totals(), [8, 0, 0, 0]);
    assert_eq!(sections[2].totals(), [1, 1, 0, 0]);
}
