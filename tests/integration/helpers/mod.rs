//! Helper utilities for integration tests.

pub mod report;
pub mod sam_generator;

use std::process::{Command, Output};

pub use report::*;
pub use sam_generator::*;

/// Runs the errprof binary with the given arguments.
pub fn run_errprof(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_errprof"))
        .args(args)
        .output()
        .expect("Failed to run errprof")
}
