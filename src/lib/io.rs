//! Opening of text inputs and outputs.
//!
//! Files are opened through [`fgoxide::io::Io`], which transparently handles gzip when the
//! path ends in `.gz`. The paths `-`, `/dev/stdin` and `/dev/stdout` select the standard
//! streams.

use anyhow::{Context, Result};
use fgoxide::io::Io;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Buffer size for readers and writers.
pub const BUFFER_SIZE: usize = 1024 * 1024;

/// Gzip level used when an output path ends in `.gz`.
const COMPRESSION_LEVEL: u32 = 5;

/// Check if a path refers to stdin.
///
/// # Example
/// ```
/// use errprof_lib::io::is_stdin_path;
///
/// assert!(is_stdin_path("-"));
/// assert!(is_stdin_path("/dev/stdin"));
/// assert!(!is_stdin_path("input.sam"));
/// ```
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdin"
}

/// Check if a path refers to stdout.
pub fn is_stdout_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdout"
}

/// Opens a buffered reader over a file, a gzipped file, or stdin.
///
/// # Errors
/// Returns an error if the file cannot be opened
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead + Send>> {
    let path_ref = path.as_ref();
    if is_stdin_path(path_ref) {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, io::stdin())));
    }
    let fgio = Io::new(COMPRESSION_LEVEL, BUFFER_SIZE);
    let reader = fgio
        .new_reader(&path_ref)
        .with_context(|| format!("Failed to open {} for reading", path_ref.display()))?;
    Ok(reader)
}

/// Opens a buffered writer to a file, a gzipped file, or stdout.
///
/// # Errors
/// Returns an error if the file cannot be created
pub fn open_output<P: AsRef<Path>>(path: P) -> Result<Box<dyn Write + Send>> {
    let path_ref = path.as_ref();
    if is_stdout_path(path_ref) {
        return Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, io::stdout())));
    }
    let fgio = Io::new(COMPRESSION_LEVEL, BUFFER_SIZE);
    let writer = fgio
        .new_writer(&path_ref)
        .with_context(|| format!("Failed to open {} for writing", path_ref.display()))?;
    Ok(Box::new(writer))
}
