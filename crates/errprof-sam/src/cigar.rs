//! Operation-string (CIGAR) decoding.
//!
//! Only the operations that can be placed on a read without clipping are supported:
//! match/mismatch runs (`M`, `=`, `X`), insertions (`I`), deletions (`D`) and hard clips
//! (`H`, which consume nothing). Soft clips, skips and padding are rejected because the
//! difference string has no way to describe them.

use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;

use crate::diff::{BaseClass, DiffArray};
use crate::error::{FormatError, Result};

/// Parses a CIGAR string into operations.
///
/// Unlike a lenient parser, every operation must carry an explicit non-zero length and
/// the string must not end in a dangling count.
///
/// # Errors
///
/// Returns [`FormatError::InvalidCigar`] for `*`, empty strings, unknown operation
/// characters, missing or zero lengths, or trailing digits.
pub fn parse_cigar(cigar: &str) -> Result<Vec<Op>> {
    let invalid = || FormatError::InvalidCigar { cigar: cigar.to_string() };

    if cigar.is_empty() || cigar == "*" {
        return Err(invalid());
    }

    let mut ops = Vec::new();
    let mut len: Option<usize> = None;

    for ch in cigar.bytes() {
        if ch.is_ascii_digit() {
            let digit = usize::from(ch - b'0');
            let next = len.unwrap_or(0).checked_mul(10).and_then(|n| n.checked_add(digit));
            len = Some(next.ok_or_else(invalid)?);
            continue;
        }

        let kind = match ch {
            b'M' => Kind::Match,
            b'I' => Kind::Insertion,
            b'D' => Kind::Deletion,
            b'N' => Kind::Skip,
            b'S' => Kind::SoftClip,
            b'H' => Kind::HardClip,
            b'P' => Kind::Pad,
            b'=' => Kind::SequenceMatch,
            b'X' => Kind::SequenceMismatch,
            _ => return Err(invalid()),
        };

        match len.take() {
            Some(n) if n > 0 => ops.push(Op::new(kind, n)),
            _ => return Err(invalid()),
        }
    }

    if len.is_some() {
        return Err(invalid());
    }

    Ok(ops)
}

/// Builds the initial [`DiffArray`] for a read, marking inserted positions.
///
/// All other positions are [`BaseClass::Match`]. Deletions consume no read positions and
/// leave no trace in the array.
///
/// # Errors
///
/// Returns [`FormatError::UnsupportedCigarOp`] for soft clips, skips or padding,
/// [`FormatError::InvalidCigar`] when the read-consuming runs overflow, and
/// [`FormatError::CigarLengthMismatch`] when the match and insertion runs do not add up
/// to exactly `read_len`.
pub fn decode_insertions(cigar: &str, ops: &[Op], read_len: usize) -> Result<DiffArray> {
    for op in ops {
        match op.kind() {
            Kind::SoftClip => return Err(unsupported('S', cigar)),
            Kind::Skip => return Err(unsupported('N', cigar)),
            Kind::Pad => return Err(unsupported('P', cigar)),
            _ => {}
        }
    }

    let consumed = checked_total(cigar, ops, |kind| {
        matches!(
            kind,
            Kind::Match | Kind::SequenceMatch | Kind::SequenceMismatch | Kind::Insertion
        )
    })?;

    if consumed != read_len {
        return Err(FormatError::CigarLengthMismatch {
            cigar: cigar.to_string(),
            cigar_len: consumed,
            read_len,
        });
    }

    let mut diffs = DiffArray::new(read_len);
    let mut pos = 0;
    for op in ops {
        match op.kind() {
            Kind::Insertion => {
                for i in pos..pos + op.len() {
                    diffs.set(i, BaseClass::Insertion);
                }
                pos += op.len();
            }
            Kind::Match | Kind::SequenceMatch | Kind::SequenceMismatch => pos += op.len(),
            _ => {}
        }
    }

    Ok(diffs)
}

/// Total number of reference bases deleted by the alignment.
///
/// # Errors
///
/// Returns [`FormatError::InvalidCigar`] if the deletion runs overflow.
pub fn deleted_bases(cigar: &str, ops: &[Op]) -> Result<usize> {
    checked_total(cigar, ops, |kind| kind == Kind::Deletion)
}

/// Number of reference bases spanned by the alignment.
///
/// # Errors
///
/// Returns [`FormatError::InvalidCigar`] if the reference-consuming runs overflow.
pub fn reference_length(cigar: &str, ops: &[Op]) -> Result<usize> {
    checked_total(cigar, ops, |kind| {
        matches!(
            kind,
            Kind::Match
                | Kind::SequenceMatch
                | Kind::SequenceMismatch
                | Kind::Deletion
                | Kind::Skip
        )
    })
}

/// Sums the lengths of the operations whose kind satisfies `include`.
fn checked_total(cigar: &str, ops: &[Op], include: impl Fn(Kind) -> bool) -> Result<usize> {
    ops.iter()
        .filter(|op| include(op.kind()))
        .try_fold(0usize, |total, op| total.checked_add(op.len()))
        .ok_or_else(|| FormatError::InvalidCigar { cigar: cigar.to_string() })
}

fn unsupported(op: char, cigar: &str) -> FormatError {
    FormatError::UnsupportedCigarOp { op, cigar: cigar.to_string() }
}
