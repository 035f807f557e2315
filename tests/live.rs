//! Integration tests against the live NSE archive.
//!
//! # Running
//!
//! These tests hit the network. Opt in explicitly:
//!
//! ```sh
//! export NSE_LIVE_TESTS=1
//! # optional: a different archive host
//! export NSE_ARCHIVE_URL="https://archives.nseindia.com"
//! cargo test --test live -- --nocapture
//! ```
//!
//! Without `NSE_LIVE_TESTS=1`, every test is silently skipped.
//!
//! # What is tested
//!
//! - **Cash bhavcopy** — download and parse with delivery columns
//! - **F&O bhavcopy** — zipped download, chain, max pain
//! - **Index universe** — constituents listing
//! - **Series** — a short PCR range with holidays skipped
//! - **Error handling** — a weekend date answers `NoData`

use chrono::NaiveDate;

use nse_bhav::analytics::{OptionChainBuilder, PcrTrend, TimeSeriesAssembler, max_pain};
use nse_bhav::client::{ClientConfig, NseClient};
use nse_bhav::error::BhavError;
use nse_bhav::source::MarketDataSource;
use nse_bhav::types::IndexName;

/// A Monday with a normal session.
fn trade_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// Helper: create a live client or skip the test.
fn live_client() -> Option<NseClient> {
    if std::env::var("NSE_LIVE_TESTS").ok()?.as_str() != "1" {
        return None;
    }
    let config = ClientConfig::from_env().ok()?;
    NseClient::with_config(config).ok()
}

/// Macro to skip a test when live access is not enabled.
macro_rules! require_client {
    () => {
        match live_client() {
            Some(c) => c,
            None => {
                eprintln!("⏭  Skipped (NSE_LIVE_TESTS not set)");
                return;
            }
        }
    };
}

// ===================================================================
// Bhavcopies
// ===================================================================

#[tokio::test]
async fn test_equity_bhavcopy() {
    let client = require_client!();
    let rows = client
        .get_equity_bhavcopy(trade_date())
        .await
        .expect("get_equity_bhavcopy failed");
    let reliance = rows
        .iter()
        .find(|r| r.symbol == "RELIANCE" && r.series == "EQ")
        .expect("RELIANCE EQ missing");
    assert!(reliance.close > 0.0);
    assert!(reliance.delivery_pct.is_some());
    eprintln!("✅ Cash bhavcopy: {} rows", rows.len());
}

#[tokio::test]
async fn test_derivatives_bhavcopy() {
    let client = require_client!();
    let rows = client
        .get_derivatives_bhavcopy(trade_date())
        .await
        .expect("get_derivatives_bhavcopy failed");
    assert!(rows.iter().all(|r| r.date == trade_date()));
    assert!(rows.iter().any(|r| r.symbol == "NIFTY" && r.is_future()));
    assert!(rows.iter().any(|r| r.symbol == "NIFTY" && r.is_option()));
    eprintln!("✅ F&O bhavcopy: {} rows", rows.len());
}

#[tokio::test]
async fn test_option_chain_and_max_pain() {
    let client = require_client!();
    let chain = OptionChainBuilder::new(&client)
        .build("NIFTY", trade_date(), None)
        .await
        .expect("build chain failed");
    assert!(!chain.rows.is_empty());
    assert!(chain.futures_price > 0.0);

    let pain = max_pain(&chain).expect("max pain failed");
    assert!(chain.strikes().any(|s| s == pain.strike));
    eprintln!(
        "✅ NIFTY exp {}: {} strikes, max pain {}",
        chain.expiry,
        chain.rows.len(),
        pain.strike
    );
}

// ===================================================================
// Index universe
// ===================================================================

#[tokio::test]
async fn test_index_constituents() {
    let client = require_client!();
    let symbols = client
        .symbols_for_index(IndexName::Nifty50)
        .await
        .expect("symbols_for_index failed");
    assert!(symbols.contains("RELIANCE"));
    eprintln!("✅ NIFTY 50: {} constituents", symbols.len());
}

// ===================================================================
// Series
// ===================================================================

#[tokio::test]
async fn test_pcr_series_over_holiday() {
    let client = require_client!();
    // 2023-01-26 is Republic Day.
    let from = NaiveDate::from_ymd_opt(2023, 1, 24).unwrap();
    let to = NaiveDate::from_ymd_opt(2023, 1, 27).unwrap();

    let series = TimeSeriesAssembler::new(&client)
        .concurrency(2)
        .assemble("NIFTY", from, to, &PcrTrend)
        .await
        .expect("assemble failed");
    assert!(series.skipped.iter().any(|s| s.date.to_string() == "2023-01-26"));
    eprintln!(
        "✅ PCR series: {} rows, {} skipped",
        series.len(),
        series.skipped.len()
    );
}

// ===================================================================
// Error handling
// ===================================================================

#[tokio::test]
async fn test_weekend_is_no_data() {
    let client = require_client!();
    let sunday = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let err = client.get_equity_bhavcopy(sunday).await.unwrap_err();
    assert!(matches!(err, BhavError::NoData(_)), "got {err:?}");
    eprintln!("✅ Weekend correctly answered NoData");
}
