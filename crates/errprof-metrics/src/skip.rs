//! Tracking of records that were read but not profiled.

use errprof_sam::FormatError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why a record did not contribute to the error profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkipReason {
    /// Unmapped, secondary or supplementary alignment
    NotPrimaryAlignment,
    /// Same read name and mate bits already profiled
    DuplicateRead,
    /// Too few fields, unparsable fields, or missing sequence/qualities
    MalformedRecord,
    /// Difference-string tag absent
    MissingDifferenceTag,
    /// CIGAR and difference string malformed or in disagreement
    InconsistentAlignment,
    /// Alignment extends beyond the reference length in the header
    PastReferenceEnd,
}

impl SkipReason {
    /// Returns a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotPrimaryAlignment => "Unmapped, secondary or supplementary alignment",
            Self::DuplicateRead => "Duplicate record for the same read and mate",
            Self::MalformedRecord => "Poorly formatted SAM record",
            Self::MissingDifferenceTag => "Record lacks the difference-string tag",
            Self::InconsistentAlignment => "CIGAR and difference string do not agree",
            Self::PastReferenceEnd => "Alignment extends past the reference end",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<&FormatError> for SkipReason {
    fn from(error: &FormatError) -> Self {
        match error {
            FormatError::TooFewFields { .. }
            | FormatError::InvalidField { .. }
            | FormatError::MissingSequence
            | FormatError::QualityLengthMismatch { .. } => Self::MalformedRecord,
            FormatError::MissingTag { .. } => Self::MissingDifferenceTag,
            FormatError::InvalidCigar { .. }
            | FormatError::UnsupportedCigarOp { .. }
            | FormatError::CigarLengthMismatch { .. }
            | FormatError::InvalidDifferenceString { .. }
            | FormatError::DifferenceOverrun { .. }
            | FormatError::DifferenceLengthMismatch { .. }
            | FormatError::DeletionAfterSubstitution { .. }
            | FormatError::DeletionLengthMismatch { .. } => Self::InconsistentAlignment,
            FormatError::PastReferenceEnd { .. } => Self::PastReferenceEnd,
        }
    }
}

/// Per-reason tallies of skipped records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipCounts {
    counts: BTreeMap<SkipReason, u64>,
}

impl SkipCounts {
    /// Creates empty tallies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one skipped record.
    pub fn increment(&mut self, reason: SkipReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    /// Count for one reason.
    #[must_use]
    pub fn get(&self, reason: SkipReason) -> u64 {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    /// Total skipped records.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Non-zero tallies in reason order.
    pub fn iter(&self) -> impl Iterator<Item = (SkipReason, u64)> + '_ {
        self.counts.iter().map(|(&reason, &count)| (reason, count))
    }
}

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use errprof_metrics::skip::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(123), "123");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
