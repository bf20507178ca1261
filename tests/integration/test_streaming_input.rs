//! Integration tests for streaming input and output (stdin/stdout pipes).
//!
//! These tests spawn cat processes whose stdout is piped to errprof commands.
//! The child processes are cleaned up when their stdout is consumed.
#![allow(clippy::zombie_processes)]

use std::fs;
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::helpers::{SamLineBuilder, minimal_header, write_sam};

fn create_test_sam(path: &std::path::Path) {
    let records: Vec<String> = (0..50)
        .map(|i| {
            let md = if i % 5 == 0 { "4T5" } else { "10" };
            SamLineBuilder::new(&format!("read{i}")).quality(30 + (i % 10) as u8).md(md).build()
        })
        .collect();
    write_sam(path, &minimal_header("chr1", 1000), &records);
}

/// The report from piped input matches the report from the file.
#[test]
fn test_count_errors_with_piped_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.sam");
    let from_file = temp_dir.path().join("from_file.txt");
    let from_pipe = temp_dir.path().join("from_pipe.txt");
    create_test_sam(&input);

    let status = Command::new(env!("CARGO_BIN_EXE_errprof"))
        .args(["count-errors", "-i", input.to_str().unwrap(), "-o", from_file.to_str().unwrap()])
        .status()
        .expect("Failed to run count-errors with file input");
    assert!(status.success(), "count-errors with file input failed");

    let cat_child = Command::new("cat")
        .arg(input.to_str().unwrap())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn cat");

    let status = Command::new(env!("CARGO_BIN_EXE_errprof"))
        .args(["count-errors", "-i", "-", "-o", from_pipe.to_str().unwrap()])
        .stdin(cat_child.stdout.expect("Failed to get cat stdout"))
        .status()
        .expect("Failed to run count-errors with piped input");
    assert!(status.success(), "count-errors with piped input failed");

    let expected = fs::read_to_string(&from_file).unwrap();
    assert_eq!(fs::read_to_string(&from_pipe).unwrap(), expected);
    assert!(expected.contains("\n30\t45\t5\t0\t0\t"));
}

/// Reports and difference rows can be written to stdout.
#[test]
fn test_output_to_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.sam");
    let alignments = temp_dir.path().join("alignments.txt");
    create_test_sam(&input);
    fs::write(&alignments, "ID: r\nREAD1: ACGT\nREAD2: AGGT\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_errprof"))
        .args(["count-errors", "-i", input.to_str().unwrap(), "-o", "-"])
        .output()
        .expect("Failed to run count-errors");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("qual\tmatch\tsub\tins\tN\tsubRate\tinsRate\tNRate\n"));
    assert_eq!(stdout.lines().count(), 42);

    let output = Command::new(env!("CARGO_BIN_EXE_errprof"))
        .args(["stitch-diff", "-i", alignments.to_str().unwrap(), "-o", "-"])
        .output()
        .expect("Failed to run stitch-diff");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "r\t1\tC\t!\tG\t!\n");
}
