#![deny(unsafe_code)]

//! SAM text record parsing and per-base alignment difference reconstruction.
//!
//! This crate turns one SAM alignment line into a [`DiffArray`]: a classification of every
//! read position as a match, substitution, insertion or ambiguous base. Two independent
//! encodings of the alignment are reconciled to get there:
//!
//! - the CIGAR, which knows where inserted read bases are ([`cigar`])
//! - the MD difference string, which knows which reference bases were substituted
//!   or deleted but cannot see insertions ([`md`])
//!
//! # Example
//!
//! ```
//! use errprof_sam::{AlignmentRecord, BaseClass, classify};
//!
//! let line = "r1\t0\tchr1\t1\t60\t5M2I5M\t*\t0\t0\tACGTACCGTACN\tIIIIIIIIIIII\tMD:Z:5T4";
//! let record = AlignmentRecord::parse(line).unwrap();
//! let classified = classify(&record, *b"MD").unwrap();
//!
//! assert_eq!(classified.diffs.len(), 12);
//! assert_eq!(classified.diffs[5], BaseClass::Insertion);
//! assert_eq!(classified.diffs[7], BaseClass::Substitution);
//! assert_eq!(classified.diffs[11], BaseClass::Ambiguous);
//! ```

pub mod cigar;
pub mod diff;
pub mod error;
pub mod md;
pub mod record;

pub use diff::{BaseClass, DiffArray, NO_CALL_BASE, is_no_call};
pub use error::{FormatError, Result};
pub use md::MdSummary;
pub use record::AlignmentRecord;

/// Default key of the difference-string tag.
pub const MD_TAG: [u8; 2] = *b"MD";

/// A fully classified record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Per-position classification, one entry per read base
    pub diffs: DiffArray,
    /// Reference bases spanned by the alignment
    pub reference_length: usize,
    /// Reference-side totals gathered while walking the difference string
    pub summary: MdSummary,
}

/// Classifies every read position of a record.
///
/// Applies, in order: insertion marks from the CIGAR, substitution marks from the
/// difference string found under `diff_tag`, then ambiguous-base marks from the sequence.
///
/// # Errors
///
/// Returns a [`FormatError`] if the record has no sequence, lacks the difference tag, or if
/// the CIGAR and difference string are malformed or disagree with each other.
pub fn classify(record: &AlignmentRecord<'_>, diff_tag: [u8; 2]) -> Result<Classification> {
    let sequence = record.require_sequence()?;
    let md = record.require_tag(diff_tag)?;

    let ops = cigar::parse_cigar(record.cigar())?;
    let mut diffs = cigar::decode_insertions(record.cigar(), &ops, sequence.len())?;
    let summary = md::apply_differences(&mut diffs, md)?;

    let cigar_deleted = cigar::deleted_bases(record.cigar(), &ops)?;
    if cigar_deleted != summary.deleted_bases {
        return Err(FormatError::DeletionLengthMismatch {
            cigar_len: cigar_deleted,
            md_len: summary.deleted_bases,
        });
    }

    let reference_length = cigar::reference_length(record.cigar(), &ops)?;
    diffs.mark_ambiguous(sequence);

    Ok(Classification { diffs, reference_length, summary })
}
