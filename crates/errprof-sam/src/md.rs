//! Difference-string (MD tag) tokenizing and walking.
//!
//! The difference string describes the alignment in reference coordinates: digit runs count
//! matching bases, literal base runs are substituted reference bases, and `^`-prefixed runs
//! are deleted reference bases. Inserted read bases are invisible to it, so the walker has to
//! step over positions that the CIGAR decoder already marked as insertions.

use crate::diff::{BaseClass, DiffArray};
use crate::error::{FormatError, Result};

/// One run of a difference string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdToken<'a> {
    /// Number of consecutive matching reference bases (may be zero)
    Matches(usize),
    /// Consecutive substituted reference bases
    Substitution(&'a [u8]),
    /// Consecutive deleted reference bases (without the leading `^`)
    Deletion(&'a [u8]),
}

/// Splits a difference string into runs.
///
/// # Errors
///
/// Returns [`FormatError::InvalidDifferenceString`] for an empty string, a bare `^`, a
/// non-alphabetic base, or a match count that overflows.
pub fn tokenize(md: &str) -> Result<Vec<MdToken<'_>>> {
    let invalid = |reason: &str| FormatError::InvalidDifferenceString {
        md: md.to_string(),
        reason: reason.to_string(),
    };

    let bytes = md.as_bytes();
    if bytes.is_empty() {
        return Err(invalid("empty"));
    }

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        let b = bytes[i];
        if b.is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let count = md[start..i].parse::<usize>().map_err(|_| invalid("match count overflow"))?;
            tokens.push(MdToken::Matches(count));
        } else if b == b'^' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i == start + 1 {
                return Err(invalid("deletion without bases"));
            }
            tokens.push(MdToken::Deletion(&bytes[start + 1..i]));
        } else if b.is_ascii_alphabetic() {
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            tokens.push(MdToken::Substitution(&bytes[start..i]));
        } else {
            return Err(invalid(&format!("unexpected character '{}'", char::from(b))));
        }
    }

    Ok(tokens)
}

/// What the walker learned about the reference side of the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MdSummary {
    /// Reference bases covered by match and substitution runs
    pub aligned_bases: usize,
    /// Reference bases covered by deletion runs
    pub deleted_bases: usize,
    /// Number of substituted positions marked on the read
    pub substitutions: usize,
}

/// Walks the difference string over `diffs`, marking substituted positions.
///
/// `diffs` must already carry the insertion marks from the CIGAR. The read cursor skips
/// inserted positions without consuming match counts, and skips them before placing each
/// substitution. Deletions consume no read positions.
///
/// # Errors
///
/// - [`FormatError::DifferenceOverrun`] if the walk runs past the end of the read.
/// - [`FormatError::DeletionAfterSubstitution`] if a deletion directly follows substituted
///   bases with no match count in between.
/// - [`FormatError::DifferenceLengthMismatch`] if the reference bases described do not equal
///   the number of non-inserted read positions.
pub fn apply_differences(diffs: &mut DiffArray, md: &str) -> Result<MdSummary> {
    let read_len = diffs.len();
    let overrun = || FormatError::DifferenceOverrun { md: md.to_string(), read_len };

    let mut summary = MdSummary::default();
    let mut loc = 0;
    let mut previous: Option<MdToken<'_>> = None;

    for token in tokenize(md)? {
        match token {
            MdToken::Matches(mut remaining) => {
                summary.aligned_bases += remaining;
                while remaining > 0 {
                    if loc >= read_len {
                        return Err(overrun());
                    }
                    if !diffs.is_insertion(loc) {
                        remaining -= 1;
                    }
                    loc += 1;
                }
            }
            MdToken::Substitution(bases) => {
                for _ in bases {
                    while diffs.is_insertion(loc) {
                        loc += 1;
                    }
                    if loc >= read_len {
                        return Err(overrun());
                    }
                    diffs.set(loc, BaseClass::Substitution);
                    loc += 1;
                }
                summary.aligned_bases += bases.len();
                summary.substitutions += bases.len();
            }
            MdToken::Deletion(bases) => {
                if matches!(previous, Some(MdToken::Substitution(_))) {
                    return Err(FormatError::DeletionAfterSubstitution { md: md.to_string() });
                }
                summary.deleted_bases += bases.len();
            }
        }
        previous = Some(token);
    }

    let aligned_len = read_len - diffs.count(BaseClass::Insertion);
    if summary.aligned_bases != aligned_len {
        return Err(FormatError::DifferenceLengthMismatch {
            md: md.to_string(),
            md_len: summary.aligned_bases,
            aligned_len,
        });
    }

    Ok(summary)
}
