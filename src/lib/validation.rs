//! Input validation utilities
//!
//! Common validation functions for command-line parameters, file paths and SAM tags with
//! consistent error messages. All failures are reported as [`ErrprofError`] values and are
//! checked before any record is processed.

use crate::errors::{ErrprofError, Result};
use crate::io::is_stdin_path;
use std::path::Path;

/// Highest quality value representable in a SAM quality string (`~` minus 33).
pub const MAX_SAM_QUALITY: u8 = 93;

/// Validate that a file exists
///
/// Standard-input paths (`-`, `/dev/stdin`) always pass.
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input SAM")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use errprof_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.sam", "Input SAM");
/// assert!(result.is_err());
/// assert!(validate_file_exists("-", "Input SAM").is_ok());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !is_stdin_path(path_ref) && !path_ref.exists() {
        return Err(ErrprofError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that a SAM tag is exactly 2 characters
///
/// # Returns
/// A 2-byte array representing the tag
///
/// # Errors
/// Returns an error if the tag is not exactly 2 ASCII characters
///
/// # Example
/// ```
/// use errprof_lib::validation::validate_tag;
///
/// let tag = validate_tag("MD", "difference tag").unwrap();
/// assert_eq!(tag, [b'M', b'D']);
///
/// let result = validate_tag("MDZ", "difference tag");
/// assert!(result.is_err());
/// ```
pub fn validate_tag(tag: &str, name: &str) -> Result<[u8; 2]> {
    match tag.as_bytes() {
        &[a, b] if a.is_ascii_alphanumeric() && b.is_ascii_alphanumeric() => Ok([a, b]),
        _ => Err(ErrprofError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Tag must be exactly 2 characters, got: '{tag}'"),
        }),
    }
}

/// Validate that a maximum quality fits in the SAM quality range [0, 93]
///
/// # Errors
/// Returns an error if the quality exceeds [`MAX_SAM_QUALITY`]
///
/// # Example
/// ```
/// use errprof_lib::validation::validate_max_quality;
///
/// validate_max_quality(40, "max-quality").unwrap();
/// assert!(validate_max_quality(94, "max-quality").is_err());
/// ```
pub fn validate_max_quality(quality: u8, name: &str) -> Result<()> {
    if quality > MAX_SAM_QUALITY {
        return Err(ErrprofError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be between 0 and {MAX_SAM_QUALITY}, got: {quality}"),
        });
    }
    Ok(())
}
