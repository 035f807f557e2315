//! Option chain assembly from an F&O snapshot.
//!
//! The pure functions here work on one day's [`DerivativeRecord`]s;
//! [`OptionChainBuilder`] adds the single source fetch in front of them.

use chrono::NaiveDate;

use crate::analytics::ensure_not_future;
use crate::analytics::expiry::option_expiries;
use crate::error::{BhavError, Result};
use crate::source::MarketDataSource;
use crate::types::bhavcopy::DerivativeRecord;
use crate::types::enums::OptionType;
use crate::types::option_chain::{OptionChain, OptionLeg, StrikeRow};

/// Call/put rows for `symbol` traded on `date` and expiring on `expiry`, one
/// per strike, ascending.
///
/// Needs no futures data, so it serves callers that only want the legs.
/// Rows stamped with any other trade date are ignored.
pub fn option_rows(
    snapshot: &[DerivativeRecord],
    symbol: &str,
    date: NaiveDate,
    expiry: NaiveDate,
) -> Result<Vec<StrikeRow>> {
    let mut legs: Vec<(f64, OptionType, OptionLeg)> = snapshot
        .iter()
        .filter(|rec| rec.is_option() && rec.date == date)
        .filter(|rec| rec.symbol == symbol && rec.expiry == expiry)
        .filter_map(|rec| Some((rec.strike?, rec.option_type?, OptionLeg::from(rec))))
        .collect();

    if legs.is_empty() {
        return Err(BhavError::NoData(format!(
            "no {symbol} options expiring {expiry} on {date}"
        )));
    }
    legs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut rows: Vec<StrikeRow> = Vec::new();
    for (strike, option_type, leg) in legs {
        if rows.last().map_or(true, |row| row.strike != strike) {
            rows.push(StrikeRow {
                strike,
                call: None,
                put: None,
            });
        }
        let Some(row) = rows.last_mut() else {
            continue;
        };
        let slot = match option_type {
            OptionType::Call => &mut row.call,
            OptionType::Put => &mut row.put,
        };
        if slot.is_some() {
            tracing::warn!(symbol, strike, ?option_type, "Duplicate option leg ignored");
            continue;
        }
        *slot = Some(leg);
    }
    Ok(rows)
}

/// The future with the earliest expiry for `symbol` traded on `date`.
pub fn nearest_future<'s>(
    snapshot: &'s [DerivativeRecord],
    symbol: &str,
    date: NaiveDate,
) -> Option<&'s DerivativeRecord> {
    snapshot
        .iter()
        .filter(|rec| rec.is_future() && rec.symbol == symbol && rec.date == date)
        .min_by_key(|rec| rec.expiry)
}

/// Nearest future, or [`BhavError::MissingFuturesReference`].
pub fn futures_reference<'s>(
    snapshot: &'s [DerivativeRecord],
    symbol: &str,
    date: NaiveDate,
) -> Result<&'s DerivativeRecord> {
    nearest_future(snapshot, symbol, date).ok_or_else(|| BhavError::MissingFuturesReference {
        symbol: symbol.to_owned(),
        date,
    })
}

/// Strike closest to `price`; the lower strike wins a tie.
pub fn atm_strike(rows: &[StrikeRow], price: f64) -> Option<f64> {
    rows.iter()
        .map(|row| row.strike)
        .min_by(|a, b| (a - price).abs().total_cmp(&(b - price).abs()))
}

/// Assemble the option chain for `symbol` on `date`.
///
/// `expiry` defaults to the nearest option expiry in the snapshot. Only rows
/// whose trade date is `date` take part, so both legs of a strike and the
/// futures reference always come from the same day.
pub fn build_chain(
    snapshot: &[DerivativeRecord],
    symbol: &str,
    date: NaiveDate,
    expiry: Option<NaiveDate>,
) -> Result<OptionChain> {
    let expiry = match expiry {
        Some(expiry) => expiry,
        None => option_expiries(snapshot, symbol, date)?
            .nearest()
            .ok_or_else(|| BhavError::NoData(format!("no option expiries for {symbol}")))?,
    };

    let rows = option_rows(snapshot, symbol, date, expiry)?;
    let futures_price = futures_reference(snapshot, symbol, date)?.close;
    let atm_strike = atm_strike(&rows, futures_price)
        .ok_or_else(|| BhavError::NoData(format!("no strikes for {symbol}")))?;

    Ok(OptionChain {
        symbol: symbol.to_owned(),
        date,
        expiry,
        rows,
        futures_price,
        atm_strike,
    })
}

/// Builds option chains through a [`MarketDataSource`].
#[derive(Debug)]
pub struct OptionChainBuilder<'a, S> {
    source: &'a S,
}

impl<'a, S: MarketDataSource> OptionChainBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Chain for `symbol` on `date`, for `expiry` or the nearest one.
    pub async fn build(
        &self,
        symbol: &str,
        date: NaiveDate,
        expiry: Option<NaiveDate>,
    ) -> Result<OptionChain> {
        ensure_not_future(date)?;
        let snapshot = self.source.derivatives_bhavcopy(date).await?;
        let chain = build_chain(&snapshot, symbol, date, expiry)?;
        tracing::debug!(
            symbol,
            %date,
            expiry = %chain.expiry,
            strikes = chain.rows.len(),
            atm = chain.atm_strike,
            "Built option chain"
        );
        Ok(chain)
    }
}
