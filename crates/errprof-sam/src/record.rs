//! Lightweight, borrowed view of a SAM text record.
//!
//! Records are parsed straight from a tab-delimited line without copying. Only the fields
//! needed for error profiling are interpreted; the rest are kept as raw slices.

use noodles::core::Position;
use noodles::sam::alignment::record::Flags;

use crate::error::{FormatError, Result};

/// Number of mandatory SAM fields.
pub const MANDATORY_FIELDS: usize = 11;

/// Value of an unavailable SAM field.
const MISSING: &str = "*";

/// One alignment line of a SAM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord<'a> {
    name: &'a str,
    flags: Flags,
    reference_name: &'a str,
    alignment_start: Option<Position>,
    cigar: &'a str,
    sequence: &'a [u8],
    quality_scores: &'a [u8],
    tags: Vec<&'a str>,
}

impl<'a> AlignmentRecord<'a> {
    /// Parses a SAM alignment line (without the trailing newline).
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::TooFewFields`] if the line has fewer than eleven fields and
    /// [`FormatError::InvalidField`] if FLAG or POS is not a number.
    pub fn parse(line: &'a str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&'a str> = line.split('\t').collect();
        if fields.len() < MANDATORY_FIELDS {
            return Err(FormatError::TooFewFields { found: fields.len() });
        }

        let flags = fields[1]
            .parse::<u16>()
            .map(Flags::from)
            .map_err(|_| FormatError::InvalidField { field: "FLAG", value: fields[1].to_string() })?;

        let alignment_start = fields[3]
            .parse::<usize>()
            .map(Position::new)
            .map_err(|_| FormatError::InvalidField { field: "POS", value: fields[3].to_string() })?;

        Ok(Self {
            name: fields[0],
            flags,
            reference_name: fields[2],
            alignment_start,
            cigar: fields[5],
            sequence: fields[9].as_bytes(),
            quality_scores: fields[10].as_bytes(),
            tags: fields[MANDATORY_FIELDS..].to_vec(),
        })
    }

    /// Read name (QNAME).
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Flag bits.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Reference sequence name (RNAME).
    #[must_use]
    pub fn reference_name(&self) -> &'a str {
        self.reference_name
    }

    /// 1-based leftmost position, `None` when POS is 0.
    #[must_use]
    pub fn alignment_start(&self) -> Option<Position> {
        self.alignment_start
    }

    /// Raw CIGAR text.
    #[must_use]
    pub fn cigar(&self) -> &'a str {
        self.cigar
    }

    /// Read bases as stored in the record.
    #[must_use]
    pub fn sequence(&self) -> &'a [u8] {
        self.sequence
    }

    /// Quality characters as stored in the record.
    #[must_use]
    pub fn quality_scores(&self) -> &'a [u8] {
        self.quality_scores
    }

    /// True if the sequence was stored reverse complemented.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.flags.is_reverse_complemented()
    }

    /// True for records that should never be profiled: unmapped, secondary or supplementary.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.flags.is_unmapped() || self.flags.is_secondary() || self.flags.is_supplementary()
    }

    /// The first/last segment bits (0x40 and 0x80) that distinguish mates of one template.
    #[must_use]
    pub fn segment_bits(&self) -> u16 {
        u16::from(self.flags & (Flags::FIRST_SEGMENT | Flags::LAST_SEGMENT))
    }

    /// True if this is the last segment of a template (read 2).
    #[must_use]
    pub fn is_last_segment(&self) -> bool {
        self.flags.is_last_segment() && !self.flags.is_first_segment()
    }

    /// Value of an auxiliary tag, e.g. the `Z` payload of `MD:Z:10A5`.
    #[must_use]
    pub fn tag(&self, tag: [u8; 2]) -> Option<&'a str> {
        self.tags.iter().find_map(|field| {
            let mut parts = field.splitn(3, ':');
            let key = parts.next()?;
            let _type = parts.next()?;
            let value = parts.next()?;
            (key.as_bytes() == tag).then_some(value)
        })
    }

    /// Like [`Self::tag`], but a missing tag is a format error.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingTag`] when the record does not carry `tag`.
    pub fn require_tag(&self, tag: [u8; 2]) -> Result<&'a str> {
        self.tag(tag).ok_or_else(|| FormatError::MissingTag {
            tag: String::from_utf8_lossy(&tag).into_owned(),
        })
    }

    /// Returns the sequence, or an error if it is `*`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingSequence`] when the record stores no bases.
    pub fn require_sequence(&self) -> Result<&'a [u8]> {
        if self.sequence == MISSING.as_bytes() || self.sequence.is_empty() {
            return Err(FormatError::MissingSequence);
        }
        Ok(self.sequence)
    }

    /// Returns the quality string, or an error if it does not cover the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::QualityLengthMismatch`] when the quality string is `*` or has
    /// a different length than the sequence.
    pub fn require_quality_scores(&self) -> Result<&'a [u8]> {
        let qual_len =
            if self.quality_scores == MISSING.as_bytes() { 0 } else { self.quality_scores.len() };
        if qual_len != self.sequence.len() {
            return Err(FormatError::QualityLengthMismatch {
                seq_len: self.sequence.len(),
                qual_len,
            });
        }
        Ok(self.quality_scores)
    }
}
