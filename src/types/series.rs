#![allow(missing_docs)]
//! Daily series types — date ranges, per-day rows, assembled series.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{BhavError, Result};

// ---------------------------------------------------------------------------
// Date Range
// ---------------------------------------------------------------------------

/// Inclusive, validated range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Validate against today's local date.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        Self::checked(from, to, Local::now().date_naive())
    }

    /// Fails with [`BhavError::InvalidDateRange`] when `to < from` or
    /// `to > today`.
    pub fn checked(from: NaiveDate, to: NaiveDate, today: NaiveDate) -> Result<Self> {
        if to < from || to > today {
            return Err(BhavError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Monday–Friday dates in the range, ascending. Exchange holidays are
    /// not excluded.
    pub fn weekdays(&self) -> Vec<NaiveDate> {
        self.from
            .iter_days()
            .take_while(|d| *d <= self.to)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Daily Series
// ---------------------------------------------------------------------------

/// A row that belongs to exactly one trade date.
pub trait DatedRow {
    fn date(&self) -> NaiveDate;
}

/// A day that contributed no row, with the error that caused it.
#[derive(Debug)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub error: BhavError,
}

/// Rows ordered by ascending date, at most one per date, plus the days that
/// were skipped.
#[derive(Debug)]
pub struct DailySeries<R> {
    pub symbol: String,
    pub rows: Vec<R>,
    pub skipped: Vec<SkippedDay>,
}

impl<R: DatedRow> DailySeries<R> {
    /// Sorts rows by date and drops any later row repeating a date.
    pub fn new(symbol: impl Into<String>, mut rows: Vec<R>, skipped: Vec<SkippedDay>) -> Self {
        rows.sort_by_key(DatedRow::date);
        rows.dedup_by_key(|row| row.date());
        Self {
            symbol: symbol.into(),
            rows,
            skipped,
        }
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(DatedRow::date).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Per-day rows
// ---------------------------------------------------------------------------

/// Cash-market price and delivery figures for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub delivery_qty: Option<u64>,
    pub delivery_pct: Option<f64>,
}

/// Nearest-future prices and cumulative open interest for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OiRow {
    pub date: NaiveDate,
    pub expiry: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub contracts: u64,
    pub open_interest: u64,
    pub change_in_oi: i64,
}

/// Nearest-future prices and put/call ratio for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PcrRow {
    pub date: NaiveDate,
    /// Expiry of the future the prices come from.
    pub expiry: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub contracts: u64,
    pub open_interest: u64,
    /// Expiry of the option chain the ratio is computed over.
    pub option_expiry: NaiveDate,
    pub pcr: f64,
}

impl DatedRow for DeliveryRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl DatedRow for OiRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl DatedRow for PcrRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
