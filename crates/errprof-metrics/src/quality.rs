//! Quality-stratified base classification counts.
//!
//! A [`CountTable`] has one row per quality value from 0 to the configured maximum; each row
//! counts matches, substitutions, insertions and ambiguous bases seen at that quality. An
//! [`ErrorProfile`] holds one table per [`ProfileBucket`].

use errprof_sam::BaseClass;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Metric, format_rate};

/// Counts of each [`BaseClass`] at a single quality value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseCounts {
    counts: [u64; BaseClass::COUNT],
}

impl BaseCounts {
    /// Adds one observation of `class`.
    pub fn increment(&mut self, class: BaseClass) {
        self.counts[class.index()] += 1;
    }

    /// Count for `class`.
    #[must_use]
    pub fn get(&self, class: BaseClass) -> u64 {
        self.counts[class.index()]
    }

    /// Sum over all classes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Fraction of the row total made up by `class`, or `None` for an empty row.
    #[must_use]
    pub fn rate(&self, class: BaseClass) -> Option<f64> {
        let total = self.total();
        #[expect(clippy::cast_precision_loss, reason = "base counts never exceed 2^53")]
        let rate = (total > 0).then(|| self.get(class) as f64 / total as f64);
        rate
    }
}

/// Counts indexed by quality value, then by base class.
///
/// Counts only ever increase; rates are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    rows: Vec<BaseCounts>,
}

impl CountTable {
    /// Creates an empty table covering qualities `0..=max_quality`.
    #[must_use]
    pub fn new(max_quality: u8) -> Self {
        Self { rows: vec![BaseCounts::default(); usize::from(max_quality) + 1] }
    }

    /// Highest quality value the table covers.
    #[must_use]
    pub fn max_quality(&self) -> u8 {
        u8::try_from(self.rows.len() - 1).unwrap_or(u8::MAX)
    }

    /// Adds one observation of `class` at `quality`.
    ///
    /// # Panics
    ///
    /// Panics if `quality` exceeds [`Self::max_quality`]; callers validate qualities first.
    pub fn increment(&mut self, quality: u8, class: BaseClass) {
        self.rows[usize::from(quality)].increment(class);
    }

    /// Counts at `quality`, or `None` above the maximum.
    #[must_use]
    pub fn row(&self, quality: u8) -> Option<&BaseCounts> {
        self.rows.get(usize::from(quality))
    }

    /// Iterates over `(quality, counts)` in increasing quality order.
    pub fn rows(&self) -> impl Iterator<Item = (u8, &BaseCounts)> + '_ {
        (0..=self.max_quality()).zip(self.rows.iter())
    }

    /// Total observations across all rows.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.rows.iter().map(BaseCounts::total).sum()
    }

    /// Total observations of `class` across all rows.
    #[must_use]
    pub fn class_total(&self, class: BaseClass) -> u64 {
        self.rows.iter().map(|r| r.get(class)).sum()
    }

    /// True if nothing has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Destination table for a counted base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileBucket {
    /// Bases with no stitching outcome, or outside the informative window
    Unstitched,
    /// Bases where both stitched mates agreed
    StitchMatch,
    /// Bases where the stitched mates disagreed
    StitchMismatch,
    /// Bases where a stitched mate reported the ambiguity code
    StitchAmbiguous,
}

impl ProfileBucket {
    /// All buckets in report order.
    pub const ALL: [ProfileBucket; 4] =
        [Self::Unstitched, Self::StitchMatch, Self::StitchMismatch, Self::StitchAmbiguous];

    const fn index(self) -> usize {
        match self {
            Self::Unstitched => 0,
            Self::StitchMatch => 1,
            Self::StitchMismatch => 2,
            Self::StitchAmbiguous => 3,
        }
    }

    /// Short identifier used in long-format metrics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unstitched => "unstitched",
            Self::StitchMatch => "stitch_match",
            Self::StitchMismatch => "stitch_mismatch",
            Self::StitchAmbiguous => "stitch_mismatch_n",
        }
    }

    /// Section heading used in the text report.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Unstitched => "Unstitched ends:",
            Self::StitchMatch => "Stitch matches:",
            Self::StitchMismatch => "Stitch mismatches:",
            Self::StitchAmbiguous => "Stitch mismatches due to Ns:",
        }
    }
}

/// One [`CountTable`] per [`ProfileBucket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorProfile {
    tables: [CountTable; 4],
}

impl ErrorProfile {
    /// Creates empty tables covering qualities `0..=max_quality`.
    #[must_use]
    pub fn new(max_quality: u8) -> Self {
        Self { tables: std::array::from_fn(|_| CountTable::new(max_quality)) }
    }

    /// Highest quality value covered.
    #[must_use]
    pub fn max_quality(&self) -> u8 {
        self.tables[0].max_quality()
    }

    /// The table for `bucket`.
    #[must_use]
    pub fn table(&self, bucket: ProfileBucket) -> &CountTable {
        &self.tables[bucket.index()]
    }

    /// Mutable access to the table for `bucket`.
    pub fn table_mut(&mut self, bucket: ProfileBucket) -> &mut CountTable {
        &mut self.tables[bucket.index()]
    }

    /// Long-format rows for the given buckets, in bucket then quality order.
    #[must_use]
    pub fn to_metrics(&self, buckets: &[ProfileBucket]) -> Vec<QualityErrorMetric> {
        buckets
            .iter()
            .flat_map(|&bucket| {
                self.table(bucket)
                    .rows()
                    .map(move |(qual, counts)| QualityErrorMetric::from_counts(bucket, qual, counts))
            })
            .collect()
    }
}

/// Writes a rate with the same fixed precision as the text report; `None` is an empty field.
#[allow(clippy::ref_option)] // signature required by serde
fn serialize_rate<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(rate) => serializer.serialize_str(&format_rate(*rate)),
        None => serializer.serialize_none(),
    }
}

fn deserialize_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// One (bucket, quality) row of an error profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityErrorMetric {
    /// Bucket name (see [`ProfileBucket::name`])
    pub bucket: String,
    /// Quality value
    pub qual: u8,
    /// Matching bases
    #[serde(rename = "match")]
    pub matches: u64,
    /// Substituted bases
    pub sub: u64,
    /// Inserted bases
    pub ins: u64,
    /// Ambiguous bases
    pub n: u64,
    /// Substitutions over row total, empty when the row is empty
    #[serde(serialize_with = "serialize_rate", deserialize_with = "deserialize_rate")]
    pub sub_rate: Option<f64>,
    /// Insertions over row total, empty when the row is empty
    #[serde(serialize_with = "serialize_rate", deserialize_with = "deserialize_rate")]
    pub ins_rate: Option<f64>,
    /// Ambiguous bases over row total, empty when the row is empty
    #[serde(serialize_with = "serialize_rate", deserialize_with = "deserialize_rate")]
    pub n_rate: Option<f64>,
}

impl QualityErrorMetric {
    /// Builds a row from a table's counts.
    #[must_use]
    pub fn from_counts(bucket: ProfileBucket, qual: u8, counts: &BaseCounts) -> Self {
        Self {
            bucket: bucket.name().to_string(),
            qual,
            matches: counts.get(BaseClass::Match),
            sub: counts.get(BaseClass::Substitution),
            ins: counts.get(BaseClass::Insertion),
            n: counts.get(BaseClass::Ambiguous),
            sub_rate: counts.rate(BaseClass::Substitution),
            ins_rate: counts.rate(BaseClass::Insertion),
            n_rate: counts.rate(BaseClass::Ambiguous),
        }
    }
}

impl Metric for QualityErrorMetric {
    fn metric_name() -> &'static str {
        "quality error"
    }
}
