//! External stitch classifications.
//!
//! A stitch difference file records, for reads whose mates were merged, the positions that
//! both mates covered and the base each mate reported there. Each row is
//! `read<TAB>position<TAB>base1<TAB>!<TAB>base2<TAB>!` with the position given relative to
//! the stitched read in its forward orientation.

use ahash::AHashMap;
use log::debug;
use std::io::BufRead;
use std::path::Path;

use errprof_metrics::ProfileBucket;
use errprof_sam::is_no_call;

use crate::errors::{ErrprofError, Result};
use crate::io::open_input;

/// Minimum number of fields on a stitch difference row.
const MIN_FIELDS: usize = 5;

/// How the two mates compared at a stitched position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StitchBucket {
    /// Both mates reported the same base
    Match,
    /// The mates reported different bases
    Mismatch,
    /// At least one mate reported the ambiguity code
    Ambiguous,
}

impl StitchBucket {
    /// Classifies a pair of reported bases.
    ///
    /// # Example
    /// ```
    /// use errprof_lib::stitch::StitchBucket;
    ///
    /// assert_eq!(StitchBucket::classify("A", "a"), StitchBucket::Match);
    /// assert_eq!(StitchBucket::classify("A", "C"), StitchBucket::Mismatch);
    /// assert_eq!(StitchBucket::classify("N", "C"), StitchBucket::Ambiguous);
    /// ```
    #[must_use]
    pub fn classify(first: &str, second: &str) -> Self {
        let ambiguous = |b: &str| matches!(b.as_bytes(), [c] if is_no_call(*c));
        if ambiguous(first) || ambiguous(second) {
            Self::Ambiguous
        } else if first.eq_ignore_ascii_case(second) {
            Self::Match
        } else {
            Self::Mismatch
        }
    }

    /// The count table this outcome is aggregated into.
    #[must_use]
    pub const fn profile_bucket(self) -> ProfileBucket {
        match self {
            Self::Match => ProfileBucket::StitchMatch,
            Self::Mismatch => ProfileBucket::StitchMismatch,
            Self::Ambiguous => ProfileBucket::StitchAmbiguous,
        }
    }
}

/// One stitched position of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchEntry {
    /// 0-based position in the forward orientation of the stitched read
    pub position: usize,
    /// Outcome at that position
    pub bucket: StitchBucket,
}

/// Stitch outcomes keyed by read name; read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct StitchIndex {
    entries: AHashMap<String, Vec<StitchEntry>>,
    rows: usize,
}

impl StitchIndex {
    /// Loads a stitch difference file (plain, gzipped, or `-` for stdin).
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or a row is malformed
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let reader = open_input(path_ref)?;
        Ok(Self::from_reader(reader, &path_ref.display().to_string())?)
    }

    /// Loads stitch outcomes from a reader. `source` names the input in error messages.
    ///
    /// Blank lines are ignored.
    ///
    /// # Errors
    /// Returns [`ErrprofError::InvalidFileFormat`] naming the line number of the first row
    /// with fewer than five fields, a non-numeric position, or an empty base.
    pub fn from_reader<R: BufRead>(reader: R, source: &str) -> Result<Self> {
        let mut index = Self::default();
        for (line_idx, line) in reader.lines().enumerate() {
            let line_number = line_idx + 1;
            let line = line.map_err(|e| invalid(source, line_number, &e.to_string()))?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < MIN_FIELDS {
                return Err(invalid(
                    source,
                    line_number,
                    &format!("expected at least {MIN_FIELDS} fields, found {}", fields.len()),
                ));
            }
            let position = fields[1].parse::<usize>().map_err(|_| {
                invalid(source, line_number, &format!("invalid position '{}'", fields[1]))
            })?;
            let (first, second) = (fields[2], fields[4]);
            if first.is_empty() || second.is_empty() {
                return Err(invalid(source, line_number, "empty base"));
            }

            let bucket = StitchBucket::classify(first, second);
            index.entries.entry(fields[0].to_string()).or_default().push(StitchEntry { position, bucket });
            index.rows += 1;
        }
        Ok(index)
    }

    /// Number of reads with at least one entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows loaded.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Entries for a read, in file order.
    #[must_use]
    pub fn get(&self, read: &str) -> Option<&[StitchEntry]> {
        self.entries.get(read).map(Vec::as_slice)
    }

    /// Projects a read's stitch outcomes onto its read positions.
    ///
    /// Reverse-strand reads have positions mirrored as `read_len - position - 1`. Positions
    /// falling outside the read are ignored. When two entries land on the same position the
    /// later one in file order wins.
    #[must_use]
    pub fn overlay(&self, read: &str, reverse: bool, read_len: usize) -> Vec<Option<StitchBucket>> {
        let mut buckets = vec![None; read_len];
        for entry in self.get(read).unwrap_or_default() {
            if entry.position >= read_len {
                debug!(
                    "Ignoring stitch position {} outside read '{}' of length {}",
                    entry.position, read, read_len
                );
                continue;
            }
            let position = if reverse { read_len - entry.position - 1 } else { entry.position };
            buckets[position] = Some(entry.bucket);
        }
        buckets
    }
}

fn invalid(source: &str, line_number: usize, reason: &str) -> ErrprofError {
    ErrprofError::InvalidFileFormat {
        file_type: "stitch difference".to_string(),
        path: source.to_string(),
        reason: format!("line {line_number}: {reason}"),
    }
}
