//! Custom error types for errprof operations.

use errprof_sam::FormatError;
use thiserror::Error;

/// Result type alias for errprof operations
pub type Result<T> = std::result::Result<T, ErrprofError>;

/// Error type for errprof operations
#[derive(Error, Debug)]
pub enum ErrprofError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "SAM", "stitch difference")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// A quality value outside the configured range; aborts the whole run
    #[error(
        "Quality score {quality} outside of range [0, {max_quality}] in read '{read}' at position {position}"
    )]
    QualityOutOfRange {
        /// Decoded quality value (character code minus 33)
        quality: i16,
        /// Configured maximum quality
        max_quality: u8,
        /// Read name
        read: String,
        /// 0-based read position
        position: usize,
    },

    /// Per-record format problem
    #[error(transparent)]
    Format(#[from] FormatError),
}
