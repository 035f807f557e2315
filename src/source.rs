//! The market-data seam every analytics component is built against.
//!
//! [`MarketDataSource`] is implemented by [`NseClient`](crate::client::NseClient)
//! for live archive data and by [`MemorySource`] for fixtures and offline use.
//! Components take the source as an explicit constructor argument; there is
//! no process-wide client.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;

use chrono::NaiveDate;

use crate::client::NseClient;
use crate::error::{BhavError, Result};
use crate::types::bhavcopy::{DerivativeRecord, EquityRecord};
use crate::types::enums::IndexName;
use crate::types::series::DateRange;

/// Point-in-time tabular snapshots keyed by trade date.
///
/// Every call may legitimately fail with [`BhavError::NoData`] for a
/// non-trading day; callers treat that as a per-day, recoverable failure.
pub trait MarketDataSource {
    /// Cash-market settlement rows for `date`.
    fn equity_bhavcopy(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<EquityRecord>>> + Send;

    /// F&O settlement rows for `date`.
    fn derivatives_bhavcopy(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DerivativeRecord>>> + Send;

    /// Trading days in `range`, ascending.
    fn trading_days(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<NaiveDate>>> + Send;

    /// Constituent symbols of an index universe.
    fn symbols_for_index(
        &self,
        index: IndexName,
    ) -> impl Future<Output = Result<BTreeSet<String>>> + Send;
}

// ---------------------------------------------------------------------------
// NseClient
// ---------------------------------------------------------------------------

impl MarketDataSource for NseClient {
    async fn equity_bhavcopy(&self, date: NaiveDate) -> Result<Vec<EquityRecord>> {
        self.get_equity_bhavcopy(date).await
    }

    async fn derivatives_bhavcopy(&self, date: NaiveDate) -> Result<Vec<DerivativeRecord>> {
        self.get_derivatives_bhavcopy(date).await
    }

    /// Weekdays of the range. The archive publishes no holiday calendar, so
    /// exchange holidays come back as [`BhavError::NoData`] when fetched.
    async fn trading_days(&self, range: DateRange) -> Result<Vec<NaiveDate>> {
        Ok(range.weekdays())
    }

    async fn symbols_for_index(&self, index: IndexName) -> Result<BTreeSet<String>> {
        self.get_index_symbols(index).await
    }
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// In-memory [`MarketDataSource`] backed by preloaded snapshots.
///
/// Dates without a loaded snapshot answer [`BhavError::NoData`], the same
/// way the archive answers for a holiday. The trading calendar is the set
/// of dates passed to [`with_trading_days`](Self::with_trading_days), or,
/// if none were given, every date that has a snapshot of either kind.
///
/// # Example
///
/// ```
/// use nse_bhav::source::MemorySource;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
/// let source = MemorySource::new().with_derivatives(day, Vec::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    equities: BTreeMap<NaiveDate, Vec<EquityRecord>>,
    derivatives: BTreeMap<NaiveDate, Vec<DerivativeRecord>>,
    calendar: Option<BTreeSet<NaiveDate>>,
    indices: HashMap<IndexName, BTreeSet<String>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cash bhavcopy for `date`.
    pub fn with_equities(mut self, date: NaiveDate, rows: Vec<EquityRecord>) -> Self {
        self.equities.insert(date, rows);
        self
    }

    /// Load an F&O bhavcopy for `date`.
    pub fn with_derivatives(mut self, date: NaiveDate, rows: Vec<DerivativeRecord>) -> Self {
        self.derivatives.insert(date, rows);
        self
    }

    /// Fix the trading calendar explicitly.
    pub fn with_trading_days(mut self, days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.calendar = Some(days.into_iter().collect());
        self
    }

    /// Register an index universe.
    pub fn with_index(
        mut self,
        index: IndexName,
        symbols: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.indices
            .insert(index, symbols.into_iter().map(Into::into).collect());
        self
    }

    fn calendar(&self) -> BTreeSet<NaiveDate> {
        match &self.calendar {
            Some(days) => days.clone(),
            None => self
                .equities
                .keys()
                .chain(self.derivatives.keys())
                .copied()
                .collect(),
        }
    }
}

impl MarketDataSource for MemorySource {
    async fn equity_bhavcopy(&self, date: NaiveDate) -> Result<Vec<EquityRecord>> {
        self.equities
            .get(&date)
            .cloned()
            .ok_or_else(|| BhavError::NoData(format!("no cash bhavcopy for {date}")))
    }

    async fn derivatives_bhavcopy(&self, date: NaiveDate) -> Result<Vec<DerivativeRecord>> {
        self.derivatives
            .get(&date)
            .cloned()
            .ok_or_else(|| BhavError::NoData(format!("no F&O bhavcopy for {date}")))
    }

    async fn trading_days(&self, range: DateRange) -> Result<Vec<NaiveDate>> {
        Ok(self
            .calendar()
            .into_iter()
            .filter(|d| range.contains(*d))
            .collect())
    }

    async fn symbols_for_index(&self, index: IndexName) -> Result<BTreeSet<String>> {
        self.indices
            .get(&index)
            .cloned()
            .ok_or_else(|| BhavError::NoData(format!("no constituents loaded for {index:?}")))
    }
}
