//! End-to-end tests for the count-errors command.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::helpers::{
    SamLineBuilder, minimal_header, parse_report, run_errprof, write_gzip, write_sam,
};

fn count_errors(input: &Path, output: &Path, extra: &[&str]) -> std::process::Output {
    let mut args = vec![
        "count-errors",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run_errprof(&args)
}

#[test]
fn test_basic_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("errors.txt");

    let records = vec![
        SamLineBuilder::new("perfect").build(),
        // one substitution at read position 3
        SamLineBuilder::new("sub").md("3A6").build(),
        // an insertion and an ambiguous base at Q20
        SamLineBuilder::new("ins")
            .cigar("4M1I5M")
            .sequence("ACGTTNCGTA")
            .quality(20)
            .md("4A4")
            .build(),
    ];
    write_sam(&input, &minimal_header("chr1", 1000), &records);

    let result = count_errors(&input, &output, &[]);
    assert!(result.status.success(), "count-errors failed: {}", String::from_utf8_lossy(&result.stderr));

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    assert_eq!(sections.len(), 1);
    let table = &sections[0];
    assert!(table.title.is_none());
    assert_eq!(table.rows.len(), 41);

    assert_eq!(table.row(40).counts, [19, 1, 0, 0]);
    assert_eq!(table.row(40).rates, vec!["0.050000000", "0.000000000", "0.000000000"]);
    // ACGT T N C G T A against 4A4: the N is both ambiguous and a mismatch, counted as N
    let q20 = &table.row(20);
    assert_eq!(q20.counts[2], 1);
    assert_eq!(q20.counts.iter().sum::<u64>(), 10);

    assert!(table.row(0).rates.is_empty());
    assert_eq!(table.row(0).counts, [0, 0, 0, 0]);
}

#[test]
fn test_filtered_and_duplicate_records_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("errors.txt");

    let records = vec![
        SamLineBuilder::new("r1").flag(0x41).build(),
        SamLineBuilder::new("r1").flag(0x41).md("0T9").build(),
        SamLineBuilder::new("r1").flag(0x81).build(),
        SamLineBuilder::new("r2").flag(0x4).md("0T9").build(),
        SamLineBuilder::new("r3").flag(0x100).md("0T9").build(),
        SamLineBuilder::new("r4").flag(0x800).md("0T9").build(),
    ];
    write_sam(&input, &minimal_header("chr1", 1000), &records);

    let result = count_errors(&input, &output, &[]);
    assert!(result.status.success());

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    assert_eq!(sections[0].totals(), [20, 0, 0, 0]);
}

#[test]
fn test_malformed_records_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("errors.txt");

    let records = vec![
        "truncated\t0\tchr1".to_string(),
        SamLineBuilder::new("no_md").no_md().build(),
        SamLineBuilder::new("bad_md").md("12").build(),
        SamLineBuilder::new("past_end").position(995).build(),
        SamLineBuilder::new("good").build(),
    ];
    write_sam(&input, &minimal_header("chr1", 1000), &records);

    let result = count_errors(&input, &output, &[]);
    assert!(result.status.success());

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    assert_eq!(sections[0].totals(), [10, 0, 0, 0]);
}

#[test]
fn test_mate_lengths_without_stitch_file_count_every_base() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("errors.txt");

    // substitutions at positions 2 and 8; the window [0, 5) only limits stitch attribution
    let records = vec![SamLineBuilder::new("r1").md("2T5C1").build()];
    write_sam(&input, &minimal_header("chr1", 1000), &records);

    let result = count_errors(&input, &output, &["-l", "5"]);
    assert!(result.status.success());

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].totals(), [8, 2, 0, 0]);
}

#[test]
fn test_mate_lengths_route_trimmed_tail_to_unstitched() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let diffs = temp_dir.path().join("diffs.txt");
    let output = temp_dir.path().join("errors.txt");

    write_sam(&input, &minimal_header("chr1", 1000), &[SamLineBuilder::new("s1").md("8C1").build()]);
    // position 8 disagrees between mates but lies outside the window [0, 5)
    fs::write(&diffs, "s1\t1\tC\t!\tT\t!\ns1\t8\tA\t!\tG\t!\n").unwrap();

    let result = count_errors(&input, &output, &["-l", "5", "-s", diffs.to_str().unwrap()]);
    assert!(result.status.success());

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    assert_eq!(sections[0].totals(), [8, 1, 0, 0]);
    assert_eq!(sections[2].totals(), [1, 0, 0, 0]);
}

#[test]
fn test_stitched_report_has_four_sections() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let diffs = temp_dir.path().join("diffs.txt");
    let output = temp_dir.path().join("errors.txt");

    write_sam(
        &input,
        &minimal_header("chr1", 1000),
        &[SamLineBuilder::new("s1").md("1A8").build(), SamLineBuilder::new("plain").build()],
    );
    fs::write(&diffs, "s1\t0\tA\t!\tA\t!\ns1\t1\tC\t!\tT\t!\ns1\t2\tG\t!\tN\t!\n").unwrap();

    let result = count_errors(&input, &output, &["-s", diffs.to_str().unwrap()]);
    assert!(result.status.success());

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    let titles: Vec<_> = sections.iter().map(|s| s.title.clone().unwrap()).collect();
    assert_eq!(
        titles,
        ["Unstitched ends:", "Stitch matches:", "Stitch mismatches:", "Stitch mismatches due to Ns:"]
    );
    assert_eq!(sections[0].totals(), [17, 0, 0, 0]);
    assert_eq!(sections[1].totals(), [1, 0, 0, 0]);
    assert_eq!(sections[2].totals(), [0, 1, 0, 0]);
    assert_eq!(sections[3].totals(), [1, 0, 0, 0]);
}

#[test]
fn test_gzip_input_and_metrics() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam.gz");
    let output = temp_dir.path().join("errors.txt");
    let metrics = temp_dir.path().join("errors.metrics.txt");

    let mut text = minimal_header("chr1", 1000);
    text.push_str(&SamLineBuilder::new("r1").md("5A4").build());
    text.push('\n');
    write_gzip(&input, &text);

    let result = count_errors(&input, &output, &["-m", metrics.to_str().unwrap()]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    assert_eq!(sections[0].totals(), [9, 1, 0, 0]);

    let metrics_text = fs::read_to_string(&metrics).unwrap();
    let mut lines = metrics_text.lines();
    assert!(lines.next().unwrap().starts_with("bucket\tqual\tmatch"));
    assert!(
        metrics_text
            .lines()
            .any(|l| l == "unstitched\t40\t9\t1\t0\t0\t0.100000000\t0.000000000\t0.000000000")
    );
}

#[test]
fn test_quality_above_max_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("errors.txt");

    write_sam(&input, &minimal_header("chr1", 1000), &[SamLineBuilder::new("r1").build()]);

    let result = count_errors(&input, &output, &["-q", "30"]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Quality score 40"));
    assert!(!output.exists());
}

#[test]
fn test_custom_max_quality_sets_row_count() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("errors.txt");

    write_sam(
        &input,
        &minimal_header("chr1", 1000),
        &[SamLineBuilder::new("r1").quality(41).build()],
    );

    let result = count_errors(&input, &output, &["-q", "41"]);
    assert!(result.status.success());

    let sections = parse_report(&fs::read_to_string(&output).unwrap());
    assert_eq!(sections[0].rows.len(), 42);
    assert_eq!(sections[0].row(41).counts, [10, 0, 0, 0]);
}
