//! Extraction of stitch differences from SeqPrep pairwise alignment dumps.
//!
//! A dump consists of blocks such as:
//!
//! ```text
//! ID: read1 extra
//! READ1: ACGTAC--
//! READ2: --GTTCGA
//! ```
//!
//! (`SUBJ:`/`QUER:` are accepted in place of `READ1:`/`READ2:`). For each block the
//! columns where both mates have a base are compared, and one row per differing column is
//! written in the stitch difference format read by [`crate::stitch::StitchIndex`].

use std::io::{self, BufRead, Write};

const ID_LABEL: &str = "ID:";
const FIRST_LABELS: [&str; 2] = ["READ1:", "SUBJ:"];
const SECOND_LABELS: [&str; 2] = ["READ2:", "QUER:"];

const GAP: u8 = b'-';
const BLANK: u8 = b' ';

/// One compared column of a stitched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDiff {
    /// Position relative to the first column covered by both mates
    pub position: usize,
    /// Base reported by the first mate
    pub first: u8,
    /// Base reported by the second mate
    pub second: u8,
}

/// Counts from one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Alignment blocks processed
    pub blocks: u64,
    /// Rows written
    pub rows: u64,
}

/// Compares two aligned strings over the columns covered by both mates.
///
/// Leading and trailing columns where either mate has a gap are dropped; positions count
/// from the first remaining column. Columns with a blank on either side are never reported;
/// agreeing columns are reported only with `include_matches`.
///
/// # Example
/// ```
/// use errprof_lib::seqprep::column_differences;
///
/// let diffs = column_differences(b"ACGTAC--", b"--GTTCGA", false);
/// assert_eq!(diffs.len(), 1);
/// assert_eq!((diffs[0].position, diffs[0].first, diffs[0].second), (2, b'A', b'T'));
/// ```
#[must_use]
pub fn column_differences(first: &[u8], second: &[u8], include_matches: bool) -> Vec<ColumnDiff> {
    let width = first.len().min(second.len());
    let covered = |i: usize| first[i] != GAP && second[i] != GAP;

    let Some(lead) = (0..width).find(|&i| covered(i)) else {
        return Vec::new();
    };
    let tail = (lead..width).rev().find(|&i| covered(i)).unwrap_or(lead);

    (lead..=tail)
        .filter(|&i| first[i] != BLANK && second[i] != BLANK)
        .filter(|&i| include_matches || first[i] != second[i])
        .map(|i| ColumnDiff { position: i - lead, first: first[i], second: second[i] })
        .collect()
}

/// Returns the aligned text following `label` and its separator, if the line starts with
/// one of `labels`.
fn aligned_text<'a>(line: &'a str, labels: &[&str]) -> Option<&'a str> {
    labels
        .iter()
        .find(|label| line.starts_with(*label))
        .map(|label| line.get(label.len() + 1..).unwrap_or(""))
}

/// Reads a SeqPrep alignment dump and writes one stitch difference row per reported column.
///
/// A block is complete when its second-mate line is read; its identifier and first-mate
/// text are then reset.
///
/// # Errors
/// Returns an error if reading or writing fails
pub fn extract_differences<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    include_matches: bool,
) -> io::Result<ExtractStats> {
    let mut stats = ExtractStats::default();
    let mut read = String::new();
    let mut first = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();

        if let Some(rest) = line.strip_prefix(ID_LABEL) {
            read = rest.split_whitespace().next().unwrap_or("").to_string();
        } else if let Some(text) = aligned_text(line, &FIRST_LABELS) {
            first = text.to_string();
        } else if let Some(second) = aligned_text(line, &SECOND_LABELS) {
            for diff in column_differences(first.as_bytes(), second.as_bytes(), include_matches) {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t!\t{}\t!",
                    read,
                    diff.position,
                    char::from(diff.first),
                    char::from(diff.second)
                )?;
                stats.rows += 1;
            }
            stats.blocks += 1;
            read.clear();
            first.clear();
        }
    }

    Ok(stats)
}
