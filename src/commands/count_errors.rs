//! Tabulate sequencing errors by base quality from aligned reads.
//!
//! Every base of every primary alignment is classified as a match, substitution, insertion
//! or ambiguous call by reconciling the CIGAR with the difference-string tag, and counted in
//! a table indexed by base quality. With a stitch difference file, bases are further split by
//! how the two stitched mates compared at that position.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use errprof_lib::io::{open_input, open_output};
use errprof_lib::logging::{OperationTimer, log_profile_summary};
use errprof_lib::profiler::{DEFAULT_MAX_QUALITY, ErrorProfiler, ProfilerConfig};
use errprof_lib::report::write_report;
use errprof_lib::stitch::StitchIndex;
use errprof_lib::validation::{validate_file_exists, validate_max_quality, validate_tag};
use errprof_lib::window::{MateLengths, WindowMode};
use errprof_metrics::{format_count, write_metrics_auto};

use crate::commands::command::Command;
use crate::commands::common::TextIoOptions;

/// Count matches, substitutions, insertions and ambiguous bases by quality score.
#[derive(Debug, Parser)]
#[command(
    name = "count-errors",
    about = "\x1b[38;5;72m[PROFILING]\x1b[0m      \x1b[36mCount errors by base quality in a SAM file\x1b[0m",
    long_about = r#"
Count matches, substitutions, insertions and ambiguous bases by base quality in a SAM file.

Each primary alignment is classified base by base using its CIGAR and its difference-string
tag (MD by default). Unmapped, secondary and supplementary records are ignored, as are repeated
records for the same read and mate. Records that are malformed, or whose CIGAR and difference
string disagree, are logged and skipped.

The output has one row per quality value from 0 to --max-quality:

  qual  match  sub  ins  N  subRate  insRate  NRate

Rates are omitted for qualities with no bases. A quality above --max-quality is a fatal error.

With --stitch-diffs, bases of stitched reads are reported in four sections: unstitched ends,
stitch matches, stitch mismatches, and stitch mismatches due to Ns. With --mate-lengths
R1[,R2], only the part of each read within its original mate length is attributed to a stitch
outcome; bases beyond it are always counted as unstitched ends.

Example usage:
  errprof count-errors -i aligned.sam -o errors.txt
  errprof count-errors -i stitched.sam.gz -o errors.txt -l 150,150 -s diffs.txt
"#
)]
pub struct CountErrors {
    /// Input SAM and output report options
    #[command(flatten)]
    pub io: TextIoOptions,

    /// Original mate lengths R1[,R2] limiting stitch attribution (0 = no trimming)
    #[arg(short = 'l', long = "mate-lengths")]
    pub mate_lengths: Option<MateLengths>,

    /// Stitch difference file; splits counts by stitch outcome
    #[arg(short = 's', long = "stitch-diffs")]
    pub stitch_diffs: Option<PathBuf>,

    /// Highest quality value tabulated
    #[arg(short = 'q', long = "max-quality", default_value_t = DEFAULT_MAX_QUALITY)]
    pub max_quality: u8,

    /// How the informative window is derived from the mate lengths
    #[arg(short = 'w', long = "window-mode", value_enum, default_value_t = WindowMode::Mate)]
    pub window_mode: WindowMode,

    /// Tag holding the difference string
    #[arg(long = "diff-tag", default_value = "MD")]
    pub diff_tag: String,

    /// Optional long-format metrics file with one row per bucket and quality
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,
}

impl CountErrors {
    fn config(&self) -> Result<ProfilerConfig> {
        Ok(ProfilerConfig {
            mate_lengths: self.mate_lengths,
            window_mode: self.window_mode,
            max_quality: self.max_quality,
            diff_tag: validate_tag(&self.diff_tag, "diff-tag")?,
        })
    }
}

impl Command for CountErrors {
    fn execute(&self) -> Result<()> {
        self.io.validate("Input SAM")?;
        if let Some(path) = &self.stitch_diffs {
            validate_file_exists(path, "Stitch difference")?;
        }
        validate_max_quality(self.max_quality, "max-quality")?;
        let config = self.config()?;

        let timer = OperationTimer::new("Counting errors");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());
        if let Some(lengths) = self.mate_lengths {
            info!("Mate lengths: {lengths} ({:?} window)", self.window_mode);
        }
        info!("Maximum quality: {}", self.max_quality);

        let stitch = match &self.stitch_diffs {
            Some(path) => {
                let index = StitchIndex::from_path(path)?;
                info!(
                    "Loaded {} stitch positions for {} reads from {}",
                    format_count(index.rows() as u64),
                    format_count(index.len() as u64),
                    path.display()
                );
                Some(index)
            }
            None => None,
        };

        let mut profiler = ErrorProfiler::new(config, stitch);
        let reader = open_input(&self.io.input)?;
        profiler
            .run(reader)
            .with_context(|| format!("Failed to profile {}", self.io.input.display()))?;

        let buckets = profiler.buckets();
        let (profile, stats) = profiler.finish();

        let mut writer = open_output(&self.io.output)?;
        write_report(&mut writer, &profile, buckets)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to write report: {}", self.io.output.display()))?;

        if let Some(path) = &self.metrics {
            write_metrics_auto(path, &profile.to_metrics(buckets))?;
            info!("Wrote metrics to {}", path.display());
        }

        log_profile_summary(&stats, &profile, buckets);
        timer.log_completion(stats.records_read);
        Ok(())
    }
}
