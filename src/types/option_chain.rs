#![allow(missing_docs)]
//! Option Chain types — strike rows, chain, expiry set, max-pain results.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::bhavcopy::DerivativeRecord;

// ---------------------------------------------------------------------------
// Option Leg
// ---------------------------------------------------------------------------

/// Settlement data for one call or put at a given strike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionLeg {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub contracts: u64,
    pub open_interest: u64,
    pub change_in_oi: i64,
}

impl From<&DerivativeRecord> for OptionLeg {
    fn from(rec: &DerivativeRecord) -> Self {
        Self {
            open: rec.open,
            high: rec.high,
            low: rec.low,
            close: rec.close,
            contracts: rec.contracts,
            open_interest: rec.open_interest,
            change_in_oi: rec.change_in_oi,
        }
    }
}

// ---------------------------------------------------------------------------
// Strike Row
// ---------------------------------------------------------------------------

/// Call and put data at a given strike price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrikeRow {
    pub strike: f64,
    /// Call leg (absent if no CE traded at this strike).
    pub call: Option<OptionLeg>,
    /// Put leg (absent if no PE traded at this strike).
    pub put: Option<OptionLeg>,
}

impl StrikeRow {
    /// Call open interest, zero when the leg is absent.
    pub fn call_oi(&self) -> u64 {
        self.call.as_ref().map_or(0, |leg| leg.open_interest)
    }

    /// Put open interest, zero when the leg is absent.
    pub fn put_oi(&self) -> u64 {
        self.put.as_ref().map_or(0, |leg| leg.open_interest)
    }
}

// ---------------------------------------------------------------------------
// Option Chain
// ---------------------------------------------------------------------------

/// Option chain for one symbol, expiry and trade date.
///
/// `rows` are sorted by ascending strike with one row per strike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionChain {
    pub symbol: String,
    pub date: NaiveDate,
    pub expiry: NaiveDate,
    pub rows: Vec<StrikeRow>,
    /// Close of the nearest-expiry future.
    pub futures_price: f64,
    /// Traded strike closest to `futures_price`.
    pub atm_strike: f64,
}

impl OptionChain {
    /// Traded strikes in ascending order.
    pub fn strikes(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.strike)
    }

    /// Flatten into CALL/PUT columns per strike for display or export.
    pub fn table(&self) -> Vec<ChainTableRow> {
        self.rows.iter().map(ChainTableRow::from).collect()
    }
}

/// One display row of an option chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainTableRow {
    pub call_close: Option<f64>,
    pub call_contracts: Option<u64>,
    pub call_open_interest: Option<u64>,
    pub call_change_in_oi: Option<i64>,
    pub strike: f64,
    pub put_close: Option<f64>,
    pub put_contracts: Option<u64>,
    pub put_open_interest: Option<u64>,
    pub put_change_in_oi: Option<i64>,
}

impl From<&StrikeRow> for ChainTableRow {
    fn from(row: &StrikeRow) -> Self {
        let call = row.call.as_ref();
        let put = row.put.as_ref();
        Self {
            call_close: call.map(|l| l.close),
            call_contracts: call.map(|l| l.contracts),
            call_open_interest: call.map(|l| l.open_interest),
            call_change_in_oi: call.map(|l| l.change_in_oi),
            strike: row.strike,
            put_close: put.map(|l| l.close),
            put_contracts: put.map(|l| l.contracts),
            put_open_interest: put.map(|l| l.open_interest),
            put_change_in_oi: put.map(|l| l.change_in_oi),
        }
    }
}

// ---------------------------------------------------------------------------
// Expiry Set
// ---------------------------------------------------------------------------

/// Distinct option expiries for a symbol on a date, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpirySet(Vec<NaiveDate>);

impl ExpirySet {
    /// Build from arbitrary dates; sorts and deduplicates.
    pub fn new(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        dates.dedup();
        Self(dates)
    }

    /// Nearest expiry.
    pub fn nearest(&self) -> Option<NaiveDate> {
        self.0.first().copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.binary_search(&date).is_ok()
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ExpirySet {
    type Item = NaiveDate;
    type IntoIter = std::vec::IntoIter<NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Max Pain
// ---------------------------------------------------------------------------

/// Aggregate option-writer loss if the underlying settled at `strike`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PainPoint {
    pub strike: f64,
    pub loss: f64,
}

/// Strike minimising writer loss, with the loss at that strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaxPain {
    pub strike: f64,
    pub loss: f64,
}
