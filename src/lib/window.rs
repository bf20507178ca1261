//! Informative-window resolution.
//!
//! When reads were produced from mates of known original length, only part of each
//! alignment is informative: bases beyond the original mate length come from adapter or
//! from the other mate. The window is expressed in read coordinates (the orientation in
//! which the sequence is stored in the record), so reverse-strand alignments have their
//! window mirrored onto the 3' end of the stored sequence.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::errors::ErrprofError;

/// Expected original lengths of the two mates. Zero means "no trimming".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MateLengths {
    /// Original length of the first mate
    pub r1: usize,
    /// Original length of the second mate
    pub r2: usize,
}

impl MateLengths {
    /// Creates mate lengths.
    #[must_use]
    pub const fn new(r1: usize, r2: usize) -> Self {
        Self { r1, r2 }
    }

    /// Returns `(own, opposite)` for a read of the given mate.
    #[must_use]
    pub const fn for_mate(self, last_segment: bool) -> (usize, usize) {
        if last_segment { (self.r2, self.r1) } else { (self.r1, self.r2) }
    }
}

impl FromStr for MateLengths {
    type Err = ErrprofError;

    /// Parses `R1` or `R1,R2`; a single value is used for both mates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |value: &str| {
            value.trim().parse::<usize>().map_err(|_| ErrprofError::InvalidParameter {
                parameter: "mate-lengths".to_string(),
                reason: format!("Expected R1[,R2] as non-negative integers, got: '{s}'"),
            })
        };
        match s.split_once(',') {
            Some((r1, r2)) => Ok(Self::new(parse(r1)?, parse(r2)?)),
            None => {
                let len = parse(s)?;
                Ok(Self::new(len, len))
            }
        }
    }
}

impl fmt::Display for MateLengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.r1, self.r2)
    }
}

/// How the informative window is derived from the mate lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WindowMode {
    /// Clamp to the read's own original mate length.
    #[default]
    Mate,
    /// Additionally require coverage by the opposite mate (the stitched overlap).
    Overlap,
}

/// A half-open `[start, end)` range of read positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InformativeWindow {
    /// First informative position
    pub start: usize,
    /// One past the last informative position
    pub end: usize,
}

impl InformativeWindow {
    /// The whole read.
    #[must_use]
    pub const fn full(read_len: usize) -> Self {
        Self { start: 0, end: read_len }
    }

    /// A window covering nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    /// True if `position` lies inside the window.
    #[must_use]
    pub const fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end
    }

    /// Number of positions in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the window covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Computes the informative window of a read.
///
/// Without mate lengths the whole read is informative. Otherwise the forward-strand window
/// is `[lower, min(own, L))`, where `lower` is `0` in [`WindowMode::Mate`] and
/// `max(L - opposite, 0)` in [`WindowMode::Overlap`]; reverse-strand reads get the mirror
/// image `[L - end, L - start)`. An inverted window collapses to empty.
///
/// # Example
/// ```
/// use errprof_lib::window::{resolve_window, InformativeWindow, MateLengths, WindowMode};
///
/// let lengths = Some(MateLengths::new(50, 50));
/// let window = resolve_window(60, lengths, false, false, WindowMode::Mate);
/// assert_eq!(window, InformativeWindow { start: 0, end: 50 });
///
/// let window = resolve_window(60, lengths, true, false, WindowMode::Mate);
/// assert_eq!(window, InformativeWindow { start: 10, end: 60 });
/// ```
#[must_use]
pub fn resolve_window(
    read_len: usize,
    lengths: Option<MateLengths>,
    reverse: bool,
    last_segment: bool,
    mode: WindowMode,
) -> InformativeWindow {
    let Some(lengths) = lengths else {
        return InformativeWindow::full(read_len);
    };
    let (own, opposite) = lengths.for_mate(last_segment);

    let end = if own == 0 { read_len } else { own.min(read_len) };
    let start = match mode {
        WindowMode::Overlap if opposite > 0 => read_len.saturating_sub(opposite),
        _ => 0,
    };
    if start >= end {
        return InformativeWindow::empty();
    }

    if reverse {
        InformativeWindow { start: read_len - end, end: read_len - start }
    } else {
        InformativeWindow { start, end }
    }
}
