//! Parsing of rendered error reports for assertions.

#![allow(dead_code)]

/// One row of a rendered count table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub qual: u8,
    pub counts: [u64; 4],
    /// Rate columns exactly as printed; empty when the row total is zero.
    pub rates: Vec<String>,
}

/// One titled (or untitled) table of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: Option<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    pub fn row(&self, qual: u8) -> &ReportRow {
        self.rows.iter().find(|r| r.qual == qual).expect("Quality row missing")
    }

    /// Column totals of match, sub, ins and N.
    pub fn totals(&self) -> [u64; 4] {
        let mut totals = [0; 4];
        for row in &self.rows {
            for (total, count) in totals.iter_mut().zip(row.counts) {
                *total += count;
            }
        }
        totals
    }
}

/// Parses a report into its sections, checking each table header.
pub fn parse_report(text: &str) -> Vec<ReportSection> {
    text.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| {
            let mut lines = block.lines().peekable();
            let title = match lines.peek() {
                Some(line) if !line.starts_with("qual\t") => lines.next().map(str::to_string),
                _ => None,
            };
            let header = lines.next().expect("Missing table header");
            assert_eq!(header, "qual\tmatch\tsub\tins\tN\tsubRate\tinsRate\tNRate");
            let rows = lines
                .map(|line| {
                    let fields: Vec<&str> = line.split('\t').collect();
                    assert!(fields.len() == 5 || fields.len() == 8, "Bad row: {line}");
                    let count = |i: usize| fields[i].parse::<u64>().expect("Bad count");
                    ReportRow {
                        qual: fields[0].parse().expect("Bad quality"),
                        counts: [count(1), count(2), count(3), count(4)],
                        rates: fields[5..].iter().map(|s| (*s).to_string()).collect(),
                    }
                })
                .collect();
            ReportSection { title, rows }
        })
        .collect()
}
