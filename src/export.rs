//! CSV and JSON export of result tables.
//!
//! File names follow `{artifact}_{symbol}_{date}[_exp_{expiry}].csv`, e.g.
//! `option_chain_NIFTY_2023-01-02_exp_2023-01-05.csv`. Whole-segment
//! bhavcopies use `{segment}_bhav_{date}.csv`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::types::enums::Segment;

/// Output format for exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

/// Export file name for a per-symbol artifact.
pub fn file_name(artifact: &str, symbol: &str, date: NaiveDate, expiry: Option<NaiveDate>) -> String {
    match expiry {
        Some(expiry) => format!("{artifact}_{symbol}_{date}_exp_{expiry}.csv"),
        None => format!("{artifact}_{symbol}_{date}.csv"),
    }
}

/// Export file name for a whole-segment bhavcopy.
pub fn bhavcopy_file_name(segment: Segment, date: NaiveDate) -> String {
    format!("{segment}_bhav_{date}.csv")
}

/// Write `rows` as CSV with a header row.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serialize `rows` into a CSV string.
pub fn to_csv_string<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize `rows` as a pretty-printed JSON array.
pub fn to_json_string<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Write `rows` to `path` in the given format.
pub fn save<T: Serialize>(path: impl AsRef<Path>, rows: &[T], format: Format) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    match format {
        Format::Csv => write_csv(&mut file, rows)?,
        Format::Json => file.write_all(to_json_string(rows)?.as_bytes())?,
    }
    tracing::info!(path = %path.display(), rows = rows.len(), "Exported table");
    Ok(())
}
