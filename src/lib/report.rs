//! Text rendering of error profiles.
//!
//! Each table has the header `qual match sub ins N subRate insRate NRate` and one row per
//! quality value from 0 to the maximum. Rates are printed with nine decimals and omitted
//! entirely for rows with no observations. When several buckets are reported, each table is
//! preceded by its title and tables are separated by a blank line.

use std::io::{self, Write};

use errprof_metrics::{CountTable, ErrorProfile, ProfileBucket, format_rate};
use errprof_sam::BaseClass;

/// Column names of a rendered table.
pub const TABLE_HEADER: [&str; 8] =
    ["qual", "match", "sub", "ins", "N", "subRate", "insRate", "NRate"];

/// Writes one count table.
///
/// # Errors
/// Returns an error if the writer fails
pub fn write_table<W: Write>(writer: &mut W, table: &CountTable) -> io::Result<()> {
    writeln!(writer, "{}", TABLE_HEADER.join("\t"))?;
    for (qual, counts) in table.rows() {
        write!(writer, "{qual}")?;
        for class in BaseClass::ALL {
            write!(writer, "\t{}", counts.get(class))?;
        }
        for class in [BaseClass::Substitution, BaseClass::Insertion, BaseClass::Ambiguous] {
            if let Some(rate) = counts.rate(class) {
                write!(writer, "\t{}", format_rate(rate))?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes the tables for `buckets` in order. Titles are written only when more than one
/// bucket is reported.
///
/// # Errors
/// Returns an error if the writer fails
pub fn write_report<W: Write>(
    writer: &mut W,
    profile: &ErrorProfile,
    buckets: &[ProfileBucket],
) -> io::Result<()> {
    let titled = buckets.len() > 1;
    for (i, &bucket) in buckets.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        if titled {
            writeln!(writer, "{}", bucket.title())?;
        }
        write_table(writer, profile.table(bucket))?;
    }
    Ok(())
}
