//! Bhavcopy endpoints — cash (with delivery) and F&O settlement files.

use std::io::{Cursor, Read};

use chrono::NaiveDate;

use crate::client::NseClient;
use crate::constants::paths;
use crate::error::{BhavError, Result};
use crate::types::bhavcopy::{DerivativeRecord, EquityRecord, parse_derivatives, parse_equities};

impl NseClient {
    /// Retrieve the full cash bhavcopy, including delivery figures.
    ///
    /// **Path:** `/products/content/sec_bhavdata_full_DDMMYYYY.csv`
    pub async fn get_equity_bhavcopy(&self, date: NaiveDate) -> Result<Vec<EquityRecord>> {
        let body = self.get_bytes(&equity_path(date)).await?;
        parse_equities(&body)
    }

    /// Retrieve the F&O bhavcopy.
    ///
    /// **Path:** `/content/historical/DERIVATIVES/YYYY/MON/foDDMONYYYYbhav.csv.zip`
    pub async fn get_derivatives_bhavcopy(&self, date: NaiveDate) -> Result<Vec<DerivativeRecord>> {
        let body = self.get_bytes(&derivatives_path(date)).await?;
        let csv = extract_csv(&body)?;
        tracing::debug!(%date, zipped = body.len(), unzipped = csv.len(), "Extracted F&O bhavcopy");
        parse_derivatives(&csv)
    }
}

/// Archive path of the cash bhavcopy for `date`.
pub fn equity_path(date: NaiveDate) -> String {
    paths::EQUITY_BHAVCOPY.replace("{date}", &date.format("%d%m%Y").to_string())
}

/// Archive path of the F&O bhavcopy for `date`.
pub fn derivatives_path(date: NaiveDate) -> String {
    let month = date.format("%b").to_string().to_uppercase();
    paths::DERIVATIVES_BHAVCOPY
        .replace("{year}", &date.format("%Y").to_string())
        .replace("{month}", &month)
        .replace("{date}", &format!("{}{}{}", date.format("%d"), month, date.format("%Y")))
}

/// Contents of the first `.csv` member of a ZIP archive.
///
/// Fails with [`BhavError::NoData`] when the archive holds no CSV.
pub fn extract_csv(zipped: &[u8]) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(zipped))?;
    for i in 0..archive.len() {
        let mut member = archive.by_index(i)?;
        if member.is_dir() || !member.name().to_ascii_lowercase().ends_with(".csv") {
            continue;
        }
        let mut csv = Vec::with_capacity(member.size() as usize);
        member.read_to_end(&mut csv)?;
        return Ok(csv);
    }
    Err(BhavError::NoData("archive holds no CSV file".into()))
}
