//! Expiry resolution — distinct option expiries for a symbol on a date.

use chrono::NaiveDate;

use crate::analytics::ensure_not_future;
use crate::error::{BhavError, Result};
use crate::source::MarketDataSource;
use crate::types::bhavcopy::DerivativeRecord;
use crate::types::option_chain::ExpirySet;

/// Option expiries of `symbol` traded on `date`, ascending.
///
/// Fails with [`BhavError::NoData`] when the symbol has no option rows for
/// that date.
pub fn option_expiries(
    snapshot: &[DerivativeRecord],
    symbol: &str,
    date: NaiveDate,
) -> Result<ExpirySet> {
    let expiries: Vec<NaiveDate> = snapshot
        .iter()
        .filter(|rec| rec.is_option() && rec.symbol == symbol && rec.date == date)
        .map(|rec| rec.expiry)
        .collect();

    if expiries.is_empty() {
        return Err(BhavError::NoData(format!("no option records for {symbol} on {date}")));
    }
    Ok(ExpirySet::new(expiries))
}

/// Lists available option expiries through a [`MarketDataSource`].
#[derive(Debug)]
pub struct ExpiryResolver<'a, S> {
    source: &'a S,
}

impl<'a, S: MarketDataSource> ExpiryResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Expiries of `symbol` traded on `date`.
    pub async fn resolve(&self, symbol: &str, date: NaiveDate) -> Result<ExpirySet> {
        ensure_not_future(date)?;
        let snapshot = self.source.derivatives_bhavcopy(date).await?;
        let expiries = option_expiries(&snapshot, symbol, date)?;
        tracing::debug!(symbol, %date, count = expiries.len(), "Resolved expiries");
        Ok(expiries)
    }
}
