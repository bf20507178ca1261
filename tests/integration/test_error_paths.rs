//! Error handling for invalid inputs and arguments.

use std::fs;
use tempfile::TempDir;

use crate::helpers::run_errprof;

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.txt");
    let result = run_errprof(&[
        "count-errors",
        "-i",
        "/nonexistent/input.sam",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("does not exist"), "{}", stderr(&result));
    assert!(!output.exists());
}

#[test]
fn test_missing_stitch_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("out.txt");
    fs::write(&input, "@HD\tVN:1.6\n").unwrap();

    let result = run_errprof(&[
        "count-errors",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-s",
        "/nonexistent/diffs.txt",
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("Stitch difference"));
}

#[test]
fn test_malformed_stitch_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let diffs = temp_dir.path().join("diffs.txt");
    let output = temp_dir.path().join("out.txt");
    fs::write(&input, "@HD\tVN:1.6\n").unwrap();
    fs::write(&diffs, "r1\tx\tA\t!\tC\t!\n").unwrap();

    let result = run_errprof(&[
        "count-errors",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-s",
        diffs.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("line 1"), "{}", stderr(&result));
    assert!(!output.exists());
}

#[test]
fn test_invalid_arguments() {
    for args in [
        vec!["count-errors", "-i", "in.sam", "-o", "out.txt", "-l", "0,x"],
        vec!["count-errors", "-i", "in.sam", "-o", "out.txt", "-w", "sideways"],
        vec!["count-errors", "-i", "in.sam"],
        vec!["stitch-diff", "-o", "out.txt"],
    ] {
        let result = run_errprof(&args);
        assert!(!result.status.success(), "expected failure for {args:?}");
    }
}

#[test]
fn test_invalid_diff_tag() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    fs::write(&input, "@HD\tVN:1.6\n").unwrap();
    let result = run_errprof(&[
        "count-errors",
        "-i",
        input.to_str().unwrap(),
        "-o",
        "-",
        "--diff-tag",
        "M",
    ]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("diff-tag"));
}

#[test]
fn test_max_quality_above_sam_limit() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    fs::write(&input, "@HD\tVN:1.6\n").unwrap();
    let result = run_errprof(&["count-errors", "-i", input.to_str().unwrap(), "-o", "-", "-q", "94"]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("max-quality"));
}
