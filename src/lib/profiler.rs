//! Quality-stratified error profiling of SAM records.
//!
//! [`ErrorProfiler`] owns all state of one profiling pass: the count tables, the set of
//! reads already seen, reference lengths from the header and the optional stitch index.
//! Records are processed one at a time. Problems confined to one record are logged and the
//! record is skipped; a quality value outside the configured range aborts the pass.

use ahash::{AHashMap, AHashSet};
use anyhow::Context;
use log::{debug, warn};
use noodles::sam;
use std::io::BufRead;

use errprof_metrics::{ErrorProfile, ProfileBucket, SkipCounts, SkipReason};
use errprof_sam::{AlignmentRecord, Classification, FormatError, MD_TAG, classify};

use crate::errors::{ErrprofError, Result};
use crate::progress::ProgressTracker;
use crate::stitch::{StitchBucket, StitchIndex};
use crate::window::{MateLengths, WindowMode, resolve_window};

/// Offset of the Sanger (Phred+33) quality encoding.
pub const QUALITY_OFFSET: u8 = 33;

/// Default highest quality value tabulated.
pub const DEFAULT_MAX_QUALITY: u8 = 40;

/// Settings for a profiling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilerConfig {
    /// Original mate lengths defining the informative window, if known
    pub mate_lengths: Option<MateLengths>,
    /// How the informative window is derived
    pub window_mode: WindowMode,
    /// Highest quality value tabulated; higher values are fatal
    pub max_quality: u8,
    /// Key of the difference-string tag
    pub diff_tag: [u8; 2],
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            mate_lengths: None,
            window_mode: WindowMode::default(),
            max_quality: DEFAULT_MAX_QUALITY,
            diff_tag: MD_TAG,
        }
    }
}

/// Record counts of a profiling pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStats {
    /// Alignment lines read
    pub records_read: u64,
    /// Records whose bases were counted
    pub records_analyzed: u64,
    /// Records not counted, by reason
    pub skipped: SkipCounts,
}

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Every base was counted
    Analyzed,
    /// The record was not counted
    Skipped(SkipReason),
}

/// Reads the raw `@` header lines at the start of a SAM stream, leaving the reader
/// positioned at the first alignment line.
///
/// # Errors
/// Returns an error if reading fails
pub fn read_raw_header<R: BufRead>(reader: &mut R) -> anyhow::Result<Vec<u8>> {
    let mut raw = Vec::new();
    while reader.fill_buf().context("Failed to read SAM header")?.first() == Some(&b'@') {
        reader.read_until(b'\n', &mut raw).context("Failed to read SAM header")?;
    }
    Ok(raw)
}

/// Parses raw header lines with the noodles SAM reader.
///
/// # Errors
/// Returns an error if the header is not valid SAM
pub fn parse_header(raw: &[u8]) -> anyhow::Result<sam::Header> {
    let header = sam::io::Reader::new(raw).read_header().context("Failed to parse SAM header")?;
    Ok(header)
}

/// Reads and parses the `@` header lines at the start of a SAM stream, leaving the reader
/// positioned at the first alignment line.
///
/// # Errors
/// Returns an error if the header cannot be read or parsed
pub fn read_header<R: BufRead>(reader: &mut R) -> anyhow::Result<sam::Header> {
    let raw = read_raw_header(reader)?;
    parse_header(&raw)
}

/// State of one error-profiling pass.
#[derive(Debug)]
pub struct ErrorProfiler {
    config: ProfilerConfig,
    stitch: Option<StitchIndex>,
    reference_lengths: AHashMap<String, usize>,
    seen: AHashSet<(String, u16)>,
    profile: ErrorProfile,
    stats: ProfileStats,
}

impl ErrorProfiler {
    /// Creates a profiler. Supplying a stitch index enables one table per stitch outcome.
    #[must_use]
    pub fn new(config: ProfilerConfig, stitch: Option<StitchIndex>) -> Self {
        let profile = ErrorProfile::new(config.max_quality);
        Self {
            config,
            stitch,
            reference_lengths: AHashMap::new(),
            seen: AHashSet::new(),
            profile,
            stats: ProfileStats::default(),
        }
    }

    /// Records the reference sequence lengths declared in a header.
    pub fn set_reference_lengths(&mut self, header: &sam::Header) {
        self.reference_lengths = header
            .reference_sequences()
            .iter()
            .map(|(name, reference)| (name.to_string(), reference.length().get()))
            .collect();
        debug!("Loaded lengths of {} reference sequences", self.reference_lengths.len());
    }

    /// True when counts are split by stitch outcome.
    #[must_use]
    pub fn is_multi_bucket(&self) -> bool {
        self.stitch.is_some()
    }

    /// The buckets that are reported, in report order.
    #[must_use]
    pub fn buckets(&self) -> &'static [ProfileBucket] {
        if self.is_multi_bucket() { &ProfileBucket::ALL } else { &[ProfileBucket::Unstitched] }
    }

    /// Counts gathered so far.
    #[must_use]
    pub fn profile(&self) -> &ErrorProfile {
        &self.profile
    }

    /// Record statistics gathered so far.
    #[must_use]
    pub fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    /// Consumes the profiler, returning the counts and statistics.
    #[must_use]
    pub fn finish(self) -> (ErrorProfile, ProfileStats) {
        (self.profile, self.stats)
    }

    /// Processes a SAM stream: the header, then every alignment line.
    ///
    /// Only `@SQ` lengths are taken from the header. A header that noodles rejects is logged
    /// and ignored, in which case alignment ends are not checked against the reference.
    ///
    /// # Errors
    /// Returns an error on I/O failure or a quality value outside the configured range
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> anyhow::Result<()> {
        let raw = read_raw_header(&mut reader)?;
        match parse_header(&raw) {
            Ok(header) => self.set_reference_lengths(&header),
            Err(e) => warn!("Ignoring SAM header, reference ends will not be checked: {e:#}"),
        }

        let mut progress = ProgressTracker::new("Processed records");
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).context("Failed to read SAM record")? == 0 {
                break;
            }
            let record = line.strip_suffix(b"\n").unwrap_or(&line);
            let record = record.strip_suffix(b"\r").unwrap_or(record);
            if record.is_empty() || record.first() == Some(&b'@') {
                continue;
            }
            self.process_bytes(record)?;
            progress.record(1);
        }
        progress.log_final();
        Ok(())
    }

    /// Processes one alignment line given as raw bytes. Lines that are not valid UTF-8 are
    /// skipped as malformed.
    ///
    /// # Errors
    /// Returns [`ErrprofError::QualityOutOfRange`] if a base quality exceeds the configured
    /// range.
    pub fn process_bytes(&mut self, line: &[u8]) -> Result<RecordOutcome> {
        match std::str::from_utf8(line) {
            Ok(line) => self.process_line(line),
            Err(e) => {
                self.stats.records_read += 1;
                warn!("Skipping SAM record {} with invalid UTF-8: {e}", self.stats.records_read);
                Ok(self.skip(SkipReason::MalformedRecord))
            }
        }
    }

    /// Parses and processes one alignment line.
    ///
    /// # Errors
    /// Returns [`ErrprofError::QualityOutOfRange`] if a base quality exceeds the configured
    /// range. Malformed lines are skipped, not returned as errors.
    pub fn process_line(&mut self, line: &str) -> Result<RecordOutcome> {
        match AlignmentRecord::parse(line) {
            Ok(record) => self.process_record(&record),
            Err(e) => {
                self.stats.records_read += 1;
                warn!("Skipping poorly formatted SAM record {}: {e}", self.stats.records_read);
                Ok(self.skip(SkipReason::from(&e)))
            }
        }
    }

    /// Processes one parsed record.
    ///
    /// # Errors
    /// Returns [`ErrprofError::QualityOutOfRange`] if a base quality exceeds the configured
    /// range.
    pub fn process_record(&mut self, record: &AlignmentRecord<'_>) -> Result<RecordOutcome> {
        self.stats.records_read += 1;

        if record.is_filtered() {
            return Ok(self.skip(SkipReason::NotPrimaryAlignment));
        }

        let segment = record.segment_bits();
        if !self.seen.insert((record.name().to_string(), segment)) {
            warn!("Skipping duplicate for read {}, {}", record.name(), segment);
            return Ok(self.skip(SkipReason::DuplicateRead));
        }

        let (classification, qualities) = match self.classify(record) {
            Ok(classified) => classified,
            Err(e) => {
                warn!("Skipping read {}: {e}", record.name());
                return Ok(self.skip(SkipReason::from(&e)));
            }
        };

        self.count_bases(record, &classification, qualities)?;
        self.stats.records_analyzed += 1;
        Ok(RecordOutcome::Analyzed)
    }

    fn skip(&mut self, reason: SkipReason) -> RecordOutcome {
        self.stats.skipped.increment(reason);
        RecordOutcome::Skipped(reason)
    }

    /// Builds the per-base classification and checks the record against the header.
    fn classify<'r>(
        &self,
        record: &AlignmentRecord<'r>,
    ) -> errprof_sam::Result<(Classification, &'r [u8])> {
        let classification = classify(record, self.config.diff_tag)?;
        let qualities = record.require_quality_scores()?;

        if let (Some(start), Some(&length)) =
            (record.alignment_start(), self.reference_lengths.get(record.reference_name()))
        {
            let end = usize::from(start)
                .checked_add(classification.reference_length.saturating_sub(1))
                .ok_or_else(|| FormatError::InvalidCigar { cigar: record.cigar().to_string() })?;
            if end > length {
                return Err(FormatError::PastReferenceEnd {
                    reference: record.reference_name().to_string(),
                    end,
                    length,
                });
            }
        }

        Ok((classification, qualities))
    }

    fn count_bases(
        &mut self,
        record: &AlignmentRecord<'_>,
        classification: &Classification,
        qualities: &[u8],
    ) -> Result<()> {
        let max_quality = self.config.max_quality;
        for (position, &q) in qualities.iter().enumerate() {
            let quality = i16::from(q) - i16::from(QUALITY_OFFSET);
            if quality < 0 || quality > i16::from(max_quality) {
                return Err(ErrprofError::QualityOutOfRange {
                    quality,
                    max_quality,
                    read: record.name().to_string(),
                    position,
                });
            }
        }

        let diffs = &classification.diffs;
        let window = resolve_window(
            diffs.len(),
            self.config.mate_lengths,
            record.is_reverse(),
            record.is_last_segment(),
            self.config.window_mode,
        );
        let overlay = self
            .stitch
            .as_ref()
            .map(|index| index.overlay(record.name(), record.is_reverse(), diffs.len()));

        for (position, (class, &q)) in diffs.iter().zip(qualities).enumerate() {
            let bucket = match &overlay {
                Some(overlay) if window.contains(position) => {
                    overlay[position].map_or(ProfileBucket::Unstitched, StitchBucket::profile_bucket)
                }
                _ => ProfileBucket::Unstitched,
            };
            self.profile.table_mut(bucket).increment(q - QUALITY_OFFSET, class);
        }
        Ok(())
    }
}
