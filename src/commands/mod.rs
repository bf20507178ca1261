//! CLI command implementations for errprof.
//!
//! # Commands
//! - [`count_errors`] - Count errors by base quality in a SAM file
//! - [`stitch_diff`] - Extract stitch differences from SeqPrep alignments

#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod count_errors;
pub mod stitch_diff;
