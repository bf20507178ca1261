//! Integration tests for the errprof binary.
//!
//! These tests run the compiled commands end to end on generated SAM and SeqPrep files.

mod helpers;
mod test_count_errors_command;
mod test_error_paths;
mod test_stitch_diff_command;
mod test_streaming_input;
