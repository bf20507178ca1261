//! Per-record format errors.
//!
//! Every variant describes a problem confined to a single alignment record. Callers are
//! expected to log the error and skip the record rather than abort the whole run.

use thiserror::Error;

/// Result type alias for per-record parsing and classification.
pub type Result<T> = std::result::Result<T, FormatError>;

/// A malformed or internally inconsistent alignment record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The line has fewer than the eleven mandatory SAM fields.
    #[error("Expected at least 11 tab-delimited fields, found {found}")]
    TooFewFields {
        /// Number of fields present on the line
        found: usize,
    },

    /// A mandatory field could not be parsed.
    #[error("Invalid {field} field: '{value}'")]
    InvalidField {
        /// Name of the field (e.g. "FLAG", "POS")
        field: &'static str,
        /// The raw value that failed to parse
        value: String,
    },

    /// The record does not carry the requested auxiliary tag.
    #[error("Cannot find {tag} tag in SAM record")]
    MissingTag {
        /// Two-letter tag key
        tag: String,
    },

    /// The operation string is empty, unparsable, or has a zero-length run.
    #[error("Malformed CIGAR '{cigar}'")]
    InvalidCigar {
        /// The offending operation string
        cigar: String,
    },

    /// The operation string uses an operation this tool cannot place on the read.
    #[error("Unsupported CIGAR operation '{op}' in '{cigar}'")]
    UnsupportedCigarOp {
        /// Operation character
        op: char,
        /// The offending operation string
        cigar: String,
    },

    /// Match and insertion runs do not add up to the read length.
    #[error("CIGAR '{cigar}' describes {cigar_len} read bases but the read has {read_len}")]
    CigarLengthMismatch {
        /// The offending operation string
        cigar: String,
        /// Read bases consumed by the operation string
        cigar_len: usize,
        /// Actual length of the read sequence
        read_len: usize,
    },

    /// The difference string contains characters outside its alphabet.
    #[error("Malformed difference string '{md}': {reason}")]
    InvalidDifferenceString {
        /// The offending difference string
        md: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Walking the difference string ran past the last read position.
    #[error("Difference string '{md}' runs past the end of a {read_len} base read")]
    DifferenceOverrun {
        /// The offending difference string
        md: String,
        /// Read length
        read_len: usize,
    },

    /// The difference string and the operation string disagree on the aligned length.
    #[error("Difference string '{md}' covers {md_len} reference bases but the CIGAR aligns {aligned_len}")]
    DifferenceLengthMismatch {
        /// The offending difference string
        md: String,
        /// Reference bases described by matches and substitutions
        md_len: usize,
        /// Read positions that are not insertions
        aligned_len: usize,
    },

    /// A deleted run directly follows substituted bases without a separating match count.
    #[error("Deletion not separated from substitution in difference string '{md}'")]
    DeletionAfterSubstitution {
        /// The offending difference string
        md: String,
    },

    /// Total deleted bases differ between the operation string and difference string.
    #[error("CIGAR deletes {cigar_len} reference bases but the difference string deletes {md_len}")]
    DeletionLengthMismatch {
        /// Deleted bases in the operation string
        cigar_len: usize,
        /// Deleted bases in the difference string
        md_len: usize,
    },

    /// The record has no stored sequence.
    #[error("Record has no sequence")]
    MissingSequence,

    /// The quality string is absent or does not cover the sequence.
    #[error("Quality string length {qual_len} does not match sequence length {seq_len}")]
    QualityLengthMismatch {
        /// Sequence length
        seq_len: usize,
        /// Quality string length (0 when absent)
        qual_len: usize,
    },

    /// The alignment runs past the end of its reference sequence.
    #[error("Alignment ends at {end} but reference '{reference}' has length {length}")]
    PastReferenceEnd {
        /// Reference sequence name
        reference: String,
        /// 1-based inclusive alignment end
        end: usize,
        /// Reference length from the header
        length: usize,
    },
}
