//! Per-read-position base classification.
//!
//! A [`DiffArray`] holds one [`BaseClass`] per base of the read. It starts out as all
//! [`BaseClass::Match`] and is overwritten in a fixed order:
//!
//! 1. insertions, from the CIGAR ([`crate::cigar::decode_insertions`])
//! 2. substitutions, from the difference string ([`crate::md::apply_differences`])
//! 3. ambiguous bases, from the read sequence ([`DiffArray::mark_ambiguous`])
//!
//! The substitution walk depends on the insertion marks, and ambiguous bases always win.

use std::fmt;
use std::ops::Index;

/// Ambiguity code for an indeterminate base call.
pub const NO_CALL_BASE: u8 = b'N';

/// Lowercase ambiguity code.
pub const NO_CALL_BASE_LOWER: u8 = b'n';

/// Returns true if the base is the ambiguity code (either case).
#[inline]
#[must_use]
pub const fn is_no_call(base: u8) -> bool {
    base == NO_CALL_BASE || base == NO_CALL_BASE_LOWER
}

/// Classification of a single read position relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BaseClass {
    /// Aligned base agreeing with the reference
    #[default]
    Match,
    /// Aligned base disagreeing with the reference
    Substitution,
    /// Read base with no reference counterpart
    Insertion,
    /// Read base reported as the ambiguity code
    Ambiguous,
}

impl BaseClass {
    /// Number of classes; the width of a count row.
    pub const COUNT: usize = 4;

    /// All classes in column order.
    pub const ALL: [BaseClass; Self::COUNT] =
        [Self::Match, Self::Substitution, Self::Insertion, Self::Ambiguous];

    /// Column index of this class within a count row.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Match => 0,
            Self::Substitution => 1,
            Self::Insertion => 2,
            Self::Ambiguous => 3,
        }
    }

    /// Short column label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Substitution => "sub",
            Self::Insertion => "ins",
            Self::Ambiguous => "N",
        }
    }
}

impl fmt::Display for BaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-length array of per-position classifications for one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffArray {
    classes: Vec<BaseClass>,
}

impl DiffArray {
    /// Creates an array of `len` positions, all [`BaseClass::Match`].
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { classes: vec![BaseClass::Match; len] }
    }

    /// Number of read positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True for a zero-length read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classification at `pos`, or `None` past the end.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<BaseClass> {
        self.classes.get(pos).copied()
    }

    /// Overwrites the classification at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn set(&mut self, pos: usize, class: BaseClass) {
        self.classes[pos] = class;
    }

    /// True if `pos` is in bounds and marked as an insertion.
    #[inline]
    #[must_use]
    pub fn is_insertion(&self, pos: usize) -> bool {
        matches!(self.classes.get(pos), Some(BaseClass::Insertion))
    }

    /// Number of positions with the given classification.
    #[must_use]
    pub fn count(&self, class: BaseClass) -> usize {
        self.classes.iter().filter(|&&c| c == class).count()
    }

    /// Marks every position whose read base is the ambiguity code as [`BaseClass::Ambiguous`].
    ///
    /// Runs last and overrides any earlier classification. `sequence` must be the same
    /// length as the array; extra bases on either side are ignored.
    pub fn mark_ambiguous(&mut self, sequence: &[u8]) {
        for (class, &base) in self.classes.iter_mut().zip(sequence) {
            if is_no_call(base) {
                *class = BaseClass::Ambiguous;
            }
        }
    }

    /// Iterates over classifications in read order.
    pub fn iter(&self) -> impl Iterator<Item = BaseClass> + '_ {
        self.classes.iter().copied()
    }

    /// Borrows the classifications as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[BaseClass] {
        &self.classes
    }
}

impl Index<usize> for DiffArray {
    type Output = BaseClass;

    fn index(&self, pos: usize) -> &Self::Output {
        &self.classes[pos]
    }
}
