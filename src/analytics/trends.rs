//! Per-day metrics for the delivery, open-interest and PCR trends.
//!
//! Each metric is a [`DailyMetric`] for the
//! [`TimeSeriesAssembler`](crate::analytics::series::TimeSeriesAssembler),
//! backed by a pure function over one day's snapshot.

use chrono::NaiveDate;

use crate::analytics::chain::{build_chain, futures_reference};
use crate::analytics::metrics::{OiScope, cumulative_open_interest, put_call_ratio};
use crate::analytics::series::DailyMetric;
use crate::constants::EQUITY_SERIES;
use crate::error::{BhavError, Result};
use crate::source::MarketDataSource;
use crate::types::bhavcopy::{DerivativeRecord, EquityRecord};
use crate::types::series::{DeliveryRow, OiRow, PcrRow};

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// Delivery row for `symbol` in `series` from a cash snapshot.
pub fn delivery_row(snapshot: &[EquityRecord], symbol: &str, series: &str) -> Result<DeliveryRow> {
    let rec = snapshot
        .iter()
        .find(|rec| rec.symbol == symbol && rec.series == series)
        .ok_or_else(|| BhavError::NoData(format!("no {symbol} {series} row in cash bhavcopy")))?;

    Ok(DeliveryRow {
        date: rec.date,
        open: rec.open,
        high: rec.high,
        low: rec.low,
        close: rec.close,
        volume: rec.volume,
        delivery_qty: rec.delivery_qty,
        delivery_pct: rec.delivery_pct,
    })
}

/// Daily price, volume and delivery percentage.
#[derive(Debug, Clone)]
pub struct DeliveryTrend {
    /// Series code to read, normally `EQ`.
    pub series: String,
}

impl Default for DeliveryTrend {
    fn default() -> Self {
        Self {
            series: EQUITY_SERIES.to_owned(),
        }
    }
}

impl DailyMetric for DeliveryTrend {
    type Row = DeliveryRow;

    async fn compute<S: MarketDataSource>(
        &self,
        source: &S,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<DeliveryRow> {
        let snapshot = source.equity_bhavcopy(date).await?;
        delivery_row(&snapshot, symbol, &self.series)
    }
}

// ---------------------------------------------------------------------------
// Open interest
// ---------------------------------------------------------------------------

/// Nearest-future prices with cumulative futures OI.
pub fn oi_row(
    snapshot: &[DerivativeRecord],
    symbol: &str,
    date: NaiveDate,
    scope: OiScope,
) -> Result<OiRow> {
    let future = futures_reference(snapshot, symbol, date)?;
    let cumulative = cumulative_open_interest(snapshot, symbol, date, scope)?;

    Ok(OiRow {
        date,
        expiry: future.expiry,
        open: future.open,
        high: future.high,
        low: future.low,
        close: future.close,
        contracts: future.contracts,
        open_interest: cumulative.open_interest,
        change_in_oi: cumulative.change_in_oi,
    })
}

/// Daily nearest-future OHLC with cumulative open interest.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenInterestTrend {
    pub scope: OiScope,
}

impl DailyMetric for OpenInterestTrend {
    type Row = OiRow;

    async fn compute<S: MarketDataSource>(
        &self,
        source: &S,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<OiRow> {
        let snapshot = source.derivatives_bhavcopy(date).await?;
        oi_row(&snapshot, symbol, date, self.scope)
    }
}

// ---------------------------------------------------------------------------
// Put/call ratio
// ---------------------------------------------------------------------------

/// Nearest-future prices with the PCR of the nearest option expiry.
pub fn pcr_row(snapshot: &[DerivativeRecord], symbol: &str, date: NaiveDate) -> Result<PcrRow> {
    let future = futures_reference(snapshot, symbol, date)?;
    let chain = build_chain(snapshot, symbol, date, None)?;
    let pcr = put_call_ratio(&chain)?;

    Ok(PcrRow {
        date,
        expiry: future.expiry,
        open: future.open,
        high: future.high,
        low: future.low,
        close: future.close,
        contracts: future.contracts,
        open_interest: future.open_interest,
        option_expiry: chain.expiry,
        pcr,
    })
}

/// Daily nearest-future OHLC with the put/call ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcrTrend;

impl DailyMetric for PcrTrend {
    type Row = PcrRow;

    async fn compute<S: MarketDataSource>(
        &self,
        source: &S,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<PcrRow> {
        let snapshot = source.derivatives_bhavcopy(date).await?;
        pcr_row(&snapshot, symbol, date)
    }
}
