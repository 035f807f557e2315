//! Option-chain and payoff analytics.
//!
//! The pipeline runs expiry resolution → option-chain assembly → derived
//! metrics, per day, and folds per-day results across a date range.
//!
//! ## Modules
//!
//! | Module | Entry point | Description |
//! |---|---|---|
//! | [`expiry`] | [`ExpiryResolver`] | Distinct option expiries, ascending |
//! | [`chain`] | [`OptionChainBuilder`] | Calls/puts per strike, futures reference, ATM |
//! | [`metrics`] | [`max_pain`], [`put_call_ratio`] | Point loss, PCR, cumulative OI |
//! | [`series`] | [`TimeSeriesAssembler`] | Best-effort fold across trading days |
//! | [`trends`] | [`PcrTrend`], [`OpenInterestTrend`], [`DeliveryTrend`] | Per-day rows |
//! | [`buildup`] | [`BuildupScanner`] | Long/short build-up, unwinding, covering |
//! | [`delivery`] | [`DeliveryScreener`] | Highest/lowest delivery % in an index |
//!
//! Every component that fetches data borrows a
//! [`MarketDataSource`](crate::source::MarketDataSource) at construction.
//! The pure snapshot functions are exported alongside for callers that
//! already hold the rows.

use chrono::{Local, NaiveDate};

use crate::error::{BhavError, Result};

pub mod buildup;
pub mod chain;
pub mod delivery;
pub mod expiry;
pub mod metrics;
pub mod series;
pub mod trends;

pub use buildup::BuildupScanner;
pub use chain::OptionChainBuilder;
pub use delivery::DeliveryScreener;
pub use expiry::ExpiryResolver;
pub use metrics::{max_pain, pain_curve, point_loss, put_call_ratio};
pub use series::TimeSeriesAssembler;
pub use trends::{DeliveryTrend, OpenInterestTrend, PcrTrend};

/// Single-date requests must not be after today.
pub(crate) fn ensure_not_future(date: NaiveDate) -> Result<()> {
    if date > Local::now().date_naive() {
        return Err(BhavError::InvalidArgument(format!(
            "{date} is after today"
        )));
    }
    Ok(())
}
