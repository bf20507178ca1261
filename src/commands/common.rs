//! Common CLI options shared across commands.
//!
//! Shared argument structures composed into command structs with `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use errprof_lib::validation::validate_file_exists;

/// Input/output options for commands that read one text file and write another.
#[derive(Debug, Clone, Args)]
pub struct TextIoOptions {
    /// Input file ('-' for stdin; '.gz' files are decompressed)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file ('-' for stdout; '.gz' files are compressed)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl TextIoOptions {
    /// Validates that the input file exists (skipped for stdin paths).
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist.
    pub fn validate(&self, description: &str) -> anyhow::Result<()> {
        validate_file_exists(&self.input, description)?;
        Ok(())
    }
}
