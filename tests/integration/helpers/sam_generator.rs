//! Utilities for generating test SAM text programmatically.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Builder for one SAM alignment line.
///
/// Defaults describe a forward-strand, unpaired primary alignment of `ACGTACGTAC` with ten
/// matching bases at Q40 and `MD:Z:10`.
#[derive(Debug, Clone)]
pub struct SamLineBuilder {
    name: String,
    flag: u16,
    reference: String,
    position: usize,
    cigar: String,
    sequence: String,
    qualities: Option<String>,
    tags: Vec<String>,
    md: Option<String>,
}

impl Default for SamLineBuilder {
    fn default() -> Self {
        Self {
            name: "read".to_string(),
            flag: 0,
            reference: "chr1".to_string(),
            position: 1,
            cigar: "10M".to_string(),
            sequence: "ACGTACGTAC".to_string(),
            qualities: None,
            tags: Vec::new(),
            md: Some("10".to_string()),
        }
    }
}

impl SamLineBuilder {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    pub fn flag(mut self, flag: u16) -> Self {
        self.flag = flag;
        self
    }

    pub fn reference(mut self, reference: &str) -> Self {
        self.reference = reference.to_string();
        self
    }

    pub fn position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn cigar(mut self, cigar: &str) -> Self {
        self.cigar = cigar.to_string();
        self
    }

    pub fn sequence(mut self, sequence: &str) -> Self {
        self.sequence = sequence.to_string();
        self
    }

    /// Sets every base quality to `quality` (Phred, encoded with offset 33).
    pub fn quality(mut self, quality: u8) -> Self {
        let encoded = char::from(quality + 33);
        self.qualities = Some(std::iter::repeat_n(encoded, self.sequence.len()).collect());
        self
    }

    /// Sets the raw quality string.
    pub fn qualities(mut self, qualities: &str) -> Self {
        self.qualities = Some(qualities.to_string());
        self
    }

    pub fn md(mut self, md: &str) -> Self {
        self.md = Some(md.to_string());
        self
    }

    pub fn no_md(mut self) -> Self {
        self.md = None;
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn build(&self) -> String {
        let qualities = self.qualities.clone().unwrap_or_else(|| "I".repeat(self.sequence.len()));
        let mut fields = vec![
            self.name.clone(),
            self.flag.to_string(),
            self.reference.clone(),
            self.position.to_string(),
            "60".to_string(),
            self.cigar.clone(),
            "*".to_string(),
            "0".to_string(),
            "0".to_string(),
            self.sequence.clone(),
            qualities,
        ];
        fields.extend(self.tags.iter().cloned());
        if let Some(md) = &self.md {
            fields.push(format!("MD:Z:{md}"));
        }
        fields.join("\t")
    }
}

/// A minimal header declaring one reference sequence.
pub fn minimal_header(reference: &str, length: usize) -> String {
    format!("@HD\tVN:1.6\tSO:unsorted\n@SQ\tSN:{reference}\tLN:{length}\n")
}

/// Writes a SAM file with a header and the given records.
pub fn write_sam(path: &Path, header: &str, records: &[String]) {
    let mut text = header.to_string();
    for record in records {
        text.push_str(record);
        text.push('\n');
    }
    fs::write(path, text).expect("Failed to write SAM file");
}

/// Writes a gzip-compressed copy of `text`.
pub fn write_gzip(path: &Path, text: &str) {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let file = fs::File::create(path).expect("Failed to create gzip file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(text.as_bytes()).expect("Failed to write gzip data");
    encoder.finish().expect("Failed to finish gzip stream");
}
