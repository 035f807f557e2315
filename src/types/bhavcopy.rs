//! Bhavcopy record types — cash and F&O settlement rows.
//!
//! Rows are read through intermediate `Raw*` structs that mirror the file
//! columns, then converted into typed records. Required columns are checked
//! against the header before any row is read.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{BHAV_DATE_FORMAT, DERIVATIVE_COLUMNS, EQUITY_COLUMNS};
use crate::error::{BhavError, Result};
use crate::types::enums::{InstrumentKind, OptionType};

// ---------------------------------------------------------------------------
// Derivatives
// ---------------------------------------------------------------------------

/// One row of the F&O bhavcopy for a single trade date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivativeRecord {
    pub instrument: InstrumentKind,
    pub symbol: String,
    pub expiry: NaiveDate,
    /// Strike price; `None` for futures.
    pub strike: Option<f64>,
    /// Call or put; `None` for futures.
    pub option_type: Option<OptionType>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Contracts traded.
    pub contracts: u64,
    pub open_interest: u64,
    pub change_in_oi: i64,
    /// Trade date.
    pub date: NaiveDate,
}

impl DerivativeRecord {
    /// `true` when the row is a stock or index future.
    pub fn is_future(&self) -> bool {
        self.instrument.is_future()
    }

    /// `true` when the row is a stock or index option.
    pub fn is_option(&self) -> bool {
        self.instrument.is_option()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawDerivativeRow {
    instrument: String,
    symbol: String,
    expiry_dt: String,
    strike_pr: f64,
    option_typ: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    contracts: u64,
    open_int: u64,
    chg_in_oi: i64,
    timestamp: String,
}

impl TryFrom<RawDerivativeRow> for DerivativeRecord {
    type Error = BhavError;

    fn try_from(raw: RawDerivativeRow) -> Result<Self> {
        let instrument: InstrumentKind = raw.instrument.parse()?;
        let (strike, option_type) = if instrument.is_option() {
            let option_type =
                OptionType::from_code(&raw.option_typ).ok_or_else(|| BhavError::Parse {
                    field: "OPTION_TYP",
                    value: raw.option_typ.clone(),
                })?;
            (Some(raw.strike_pr), Some(option_type))
        } else {
            (None, None)
        };

        Ok(Self {
            instrument,
            symbol: raw.symbol,
            expiry: parse_bhav_date("EXPIRY_DT", &raw.expiry_dt)?,
            strike,
            option_type,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            contracts: raw.contracts,
            open_interest: raw.open_int,
            change_in_oi: raw.chg_in_oi,
            date: parse_bhav_date("TIMESTAMP", &raw.timestamp)?,
        })
    }
}

/// Parse an F&O bhavcopy CSV body.
pub fn parse_derivatives(data: &[u8]) -> Result<Vec<DerivativeRecord>> {
    read_rows::<RawDerivativeRow>(data, DERIVATIVE_COLUMNS)?
        .into_iter()
        .map(DerivativeRecord::try_from)
        .collect()
}

// ---------------------------------------------------------------------------
// Equities
// ---------------------------------------------------------------------------

/// One row of the full cash bhavcopy (with delivery figures).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityRecord {
    pub symbol: String,
    /// Series code, e.g. `EQ`, `BE`.
    pub series: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Total traded quantity.
    pub volume: u64,
    /// Deliverable quantity; `None` for series without delivery data.
    pub delivery_qty: Option<u64>,
    /// Deliverable quantity as a percentage of traded quantity.
    pub delivery_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawEquityRow {
    symbol: String,
    series: String,
    date1: String,
    open_price: f64,
    high_price: f64,
    low_price: f64,
    close_price: f64,
    ttl_trd_qnty: u64,
    deliv_qty: String,
    deliv_per: String,
}

impl TryFrom<RawEquityRow> for EquityRecord {
    type Error = BhavError;

    fn try_from(raw: RawEquityRow) -> Result<Self> {
        Ok(Self {
            date: parse_bhav_date("DATE1", &raw.date1)?,
            symbol: raw.symbol,
            series: raw.series,
            open: raw.open_price,
            high: raw.high_price,
            low: raw.low_price,
            close: raw.close_price,
            volume: raw.ttl_trd_qnty,
            delivery_qty: parse_optional("DELIV_QTY", &raw.deliv_qty)?,
            delivery_pct: parse_optional("DELIV_PER", &raw.deliv_per)?,
        })
    }
}

/// Parse a full cash bhavcopy CSV body.
pub fn parse_equities(data: &[u8]) -> Result<Vec<EquityRecord>> {
    read_rows::<RawEquityRow>(data, EQUITY_COLUMNS)?
        .into_iter()
        .map(EquityRecord::try_from)
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_rows<T: DeserializeOwned>(data: &[u8], required: &[&str]) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| (*col).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(BhavError::Schema { missing });
    }

    let rows = rdr.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    Ok(rows)
}

fn parse_bhav_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), BHAV_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d"))
        .map_err(|_| BhavError::Parse {
            field,
            value: value.to_owned(),
        })
}

/// Blank and `-` cells mean "not applicable".
fn parse_optional<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<Option<T>> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| BhavError::Parse {
        field,
        value: value.to_owned(),
    })
}
