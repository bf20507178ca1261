//! Extract stitch differences from a SeqPrep alignment dump.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use errprof_lib::io::{open_input, open_output};
use errprof_lib::logging::OperationTimer;
use errprof_lib::seqprep::extract_differences;
use errprof_metrics::format_count;

use crate::commands::command::Command;
use crate::commands::common::TextIoOptions;

/// Write the positions where stitched mates disagree, for use with `count-errors -s`.
#[derive(Debug, Parser)]
#[command(
    name = "stitch-diff",
    about = "\x1b[38;5;72m[PROFILING]\x1b[0m      \x1b[36mExtract stitch differences from SeqPrep alignments\x1b[0m",
    long_about = r#"
Extract the positions where two stitched mates disagree from a SeqPrep alignment dump.

The input consists of blocks with an ID: line followed by the aligned first mate (READ1: or
SUBJ:) and second mate (READ2: or QUER:). Columns outside the region covered by both mates
are ignored. For every covered column where the mates report different bases, one row is
written:

  read  position  base1  !  base2  !

Positions count from the first column covered by both mates. With --include-matches,
agreeing columns are written as well.

Example usage:
  errprof stitch-diff -i seqprep_alignments.txt.gz -o diffs.txt
"#
)]
pub struct StitchDiff {
    /// Input alignment dump and output difference file options
    #[command(flatten)]
    pub io: TextIoOptions,

    /// Also write columns where both mates agree
    #[arg(long = "include-matches", default_value = "false")]
    pub include_matches: bool,
}

impl Command for StitchDiff {
    fn execute(&self) -> Result<()> {
        self.io.validate("SeqPrep alignment")?;

        let timer = OperationTimer::new("Extracting stitch differences");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());

        let reader = open_input(&self.io.input)?;
        let mut writer = open_output(&self.io.output)?;
        let stats = extract_differences(reader, &mut writer, self.include_matches)
            .and_then(|stats| writer.flush().map(|()| stats))
            .with_context(|| format!("Failed to extract differences from {}", self.io.input.display()))?;

        info!("Reads analyzed: {}", format_count(stats.blocks));
        info!("Rows written: {}", format_count(stats.rows));
        timer.log_completion(stats.blocks);
        Ok(())
    }
}
