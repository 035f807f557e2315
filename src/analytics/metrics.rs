//! Derived metrics over option chains and futures snapshots.
//!
//! - [`point_loss`] / [`pain_curve`] / [`max_pain`] — option-writer loss
//!   at hypothetical settlement strikes
//! - [`put_call_ratio`] — aggregate put OI over aggregate call OI
//! - [`cumulative_open_interest`] — futures OI and change in OI for a symbol

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::chain::nearest_future;
use crate::error::{BhavError, Result};
use crate::types::bhavcopy::DerivativeRecord;
use crate::types::option_chain::{MaxPain, OptionChain, PainPoint, StrikeRow};

// ---------------------------------------------------------------------------
// Max pain
// ---------------------------------------------------------------------------

/// Aggregate loss to option writers if the underlying settles at `settlement`.
///
/// Calls struck below `settlement` and puts struck above it are in the
/// money; an absent leg contributes nothing.
pub fn point_loss(chain: &OptionChain, settlement: f64) -> f64 {
    rows_point_loss(&chain.rows, settlement)
}

fn rows_point_loss(rows: &[StrikeRow], settlement: f64) -> f64 {
    rows.iter()
        .map(|row| {
            let call = if row.strike < settlement {
                (settlement - row.strike) * row.call_oi() as f64
            } else {
                0.0
            };
            let put = if row.strike > settlement {
                (row.strike - settlement) * row.put_oi() as f64
            } else {
                0.0
            };
            call + put
        })
        .sum()
}

/// Point loss at every traded strike, ascending by strike.
///
/// O(k²) in the number of strikes; a single expiry rarely has more than a
/// couple of hundred.
pub fn pain_curve(chain: &OptionChain) -> Vec<PainPoint> {
    chain
        .rows
        .iter()
        .map(|row| PainPoint {
            strike: row.strike,
            loss: rows_point_loss(&chain.rows, row.strike),
        })
        .collect()
}

/// Traded strike with the lowest point loss; the lowest strike wins a tie.
pub fn max_pain(chain: &OptionChain) -> Result<MaxPain> {
    pain_curve(chain)
        .into_iter()
        .reduce(|best, point| if point.loss < best.loss { point } else { best })
        .map(|point| MaxPain {
            strike: point.strike,
            loss: point.loss,
        })
        .ok_or_else(|| {
            BhavError::NoData(format!(
                "empty option chain for {} expiring {}",
                chain.symbol, chain.expiry
            ))
        })
}

// ---------------------------------------------------------------------------
// Put/call ratio
// ---------------------------------------------------------------------------

/// Total call and put open interest across the chain.
pub fn open_interest_totals(chain: &OptionChain) -> (u64, u64) {
    chain.rows.iter().fold((0, 0), |(calls, puts), row| {
        (calls + row.call_oi(), puts + row.put_oi())
    })
}

/// Put open interest divided by call open interest.
///
/// Fails with [`BhavError::UndefinedRatio`] when call open interest is zero.
pub fn put_call_ratio(chain: &OptionChain) -> Result<f64> {
    let (calls, puts) = open_interest_totals(chain);
    if calls == 0 {
        return Err(BhavError::UndefinedRatio {
            symbol: chain.symbol.clone(),
            date: chain.date,
        });
    }
    Ok(puts as f64 / calls as f64)
}

// ---------------------------------------------------------------------------
// Cumulative open interest
// ---------------------------------------------------------------------------

/// Which futures expiries [`cumulative_open_interest`] sums over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OiScope {
    /// Only the nearest futures expiry.
    #[default]
    NearestExpiry,
    /// Every traded futures expiry.
    AllExpiries,
}

/// Summed futures open interest for one symbol on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeOi {
    /// Nearest futures expiry.
    pub expiry: NaiveDate,
    pub open_interest: u64,
    pub change_in_oi: i64,
}

/// Sum `OPEN_INT` and `CHG_IN_OI` over the symbol's stock and index futures
/// traded on `date`.
pub fn cumulative_open_interest(
    snapshot: &[DerivativeRecord],
    symbol: &str,
    date: NaiveDate,
    scope: OiScope,
) -> Result<CumulativeOi> {
    let expiry = nearest_future(snapshot, symbol, date)
        .map(|rec| rec.expiry)
        .ok_or_else(|| BhavError::NoData(format!("no futures records for {symbol} on {date}")))?;

    let (open_interest, change_in_oi) = snapshot
        .iter()
        .filter(|rec| rec.is_future() && rec.symbol == symbol && rec.date == date)
        .filter(|rec| scope == OiScope::AllExpiries || rec.expiry == expiry)
        .fold((0u64, 0i64), |(oi, chg), rec| {
            (oi + rec.open_interest, chg + rec.change_in_oi)
        });

    Ok(CumulativeOi {
        expiry,
        open_interest,
        change_in_oi,
    })
}
