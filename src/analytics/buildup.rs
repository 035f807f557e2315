//! Futures build-up: price change vs. open-interest change between two days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::source::MarketDataSource;
use crate::types::bhavcopy::DerivativeRecord;
use crate::types::buildup::{Buildup, BuildupReport, BuildupRow};
use crate::types::series::DateRange;

#[derive(Debug, Clone, Copy)]
struct FuturesSummary {
    nearest_expiry: NaiveDate,
    nearest_close: f64,
    total_oi: u64,
}

fn summarize(snapshot: &[DerivativeRecord]) -> BTreeMap<&str, FuturesSummary> {
    let mut out: BTreeMap<&str, FuturesSummary> = BTreeMap::new();
    for rec in snapshot.iter().filter(|rec| rec.is_future()) {
        out.entry(rec.symbol.as_str())
            .and_modify(|s| {
                s.total_oi += rec.open_interest;
                if rec.expiry < s.nearest_expiry {
                    s.nearest_expiry = rec.expiry;
                    s.nearest_close = rec.close;
                }
            })
            .or_insert(FuturesSummary {
                nearest_expiry: rec.expiry,
                nearest_close: rec.close,
                total_oi: rec.open_interest,
            });
    }
    out
}

/// Compare `current` against `previous` for every underlying with futures
/// on both days.
///
/// Price change uses each day's nearest future; OI change sums all futures
/// expiries. Symbols with a zero base close or OI are left out.
pub fn futures_buildup(current: &[DerivativeRecord], previous: &[DerivativeRecord]) -> BuildupReport {
    let before = summarize(previous);
    let rows = summarize(current)
        .into_iter()
        .filter_map(|(symbol, now)| {
            let then = before.get(symbol)?;
            if then.nearest_close == 0.0 || then.total_oi == 0 {
                return None;
            }
            let pch_close = now.nearest_close / then.nearest_close - 1.0;
            let pch_oi = now.total_oi as f64 / then.total_oi as f64 - 1.0;
            Some(BuildupRow {
                symbol: symbol.to_owned(),
                pch_close,
                pch_oi,
                kind: Buildup::classify(pch_close, pch_oi),
            })
        })
        .collect();
    BuildupReport { rows }
}

/// Fetches two F&O snapshots and compares them.
#[derive(Debug)]
pub struct BuildupScanner<'a, S> {
    source: &'a S,
}

impl<'a, S: MarketDataSource> BuildupScanner<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Build-up from `from` to `to`. Fails with
    /// [`BhavError::InvalidDateRange`](crate::error::BhavError::InvalidDateRange)
    /// when `to < from` or `to` is after today.
    pub async fn scan(&self, from: NaiveDate, to: NaiveDate) -> Result<BuildupReport> {
        let range = DateRange::new(from, to)?;
        let previous = self.source.derivatives_bhavcopy(range.from()).await?;
        let current = self.source.derivatives_bhavcopy(range.to()).await?;
        let report = futures_buildup(&current, &previous);
        tracing::debug!(%from, %to, symbols = report.rows.len(), "Computed futures build-up");
        Ok(report)
    }
}
