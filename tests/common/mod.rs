//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;

use nse_bhav::types::bhavcopy::{DerivativeRecord, EquityRecord};
use nse_bhav::types::{InstrumentKind, OptionType};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn future(symbol: &str, date: NaiveDate, expiry: NaiveDate, close: f64, oi: u64, chg: i64) -> DerivativeRecord {
    DerivativeRecord {
        instrument: InstrumentKind::FutureIndex,
        symbol: symbol.into(),
        expiry,
        strike: None,
        option_type: None,
        open: close - 10.0,
        high: close + 20.0,
        low: close - 20.0,
        close,
        contracts: 1_000,
        open_interest: oi,
        change_in_oi: chg,
        date,
    }
}

pub fn option(
    symbol: &str,
    date: NaiveDate,
    expiry: NaiveDate,
    option_type: OptionType,
    strike: f64,
    oi: u64,
) -> DerivativeRecord {
    DerivativeRecord {
        instrument: InstrumentKind::OptionIndex,
        symbol: symbol.into(),
        expiry,
        strike: Some(strike),
        option_type: Some(option_type),
        open: 5.0,
        high: 6.0,
        low: 4.0,
        close: 5.5,
        contracts: 100,
        open_interest: oi,
        change_in_oi: 0,
        date,
    }
}

pub fn call(symbol: &str, date: NaiveDate, expiry: NaiveDate, strike: f64, oi: u64) -> DerivativeRecord {
    option(symbol, date, expiry, OptionType::Call, strike, oi)
}

pub fn put(symbol: &str, date: NaiveDate, expiry: NaiveDate, strike: f64, oi: u64) -> DerivativeRecord {
    option(symbol, date, expiry, OptionType::Put, strike, oi)
}

/// Strikes 90/100/110 with call OI 50/30/10, put OI 10/30/50, and a
/// nearest future closing at `futures_close`.
pub fn three_strike_snapshot(symbol: &str, date: NaiveDate, futures_close: f64) -> Vec<DerivativeRecord> {
    let expiry = date + chrono::Duration::days(3);
    vec![
        future(symbol, date, expiry, futures_close, 5_000, 100),
        future(symbol, date, expiry + chrono::Duration::days(28), futures_close + 1.0, 2_000, -50),
        call(symbol, date, expiry, 90.0, 50),
        call(symbol, date, expiry, 100.0, 30),
        call(symbol, date, expiry, 110.0, 10),
        put(symbol, date, expiry, 90.0, 10),
        put(symbol, date, expiry, 100.0, 30),
        put(symbol, date, expiry, 110.0, 50),
    ]
}

pub fn equity(symbol: &str, series: &str, date: NaiveDate, close: f64, deliv_pct: Option<f64>) -> EquityRecord {
    EquityRecord {
        symbol: symbol.into(),
        series: series.into(),
        date,
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume: 10_000,
        delivery_qty: deliv_pct.map(|p| (p * 100.0) as u64),
        delivery_pct: deliv_pct,
    }
}

/// Ten consecutive weekdays starting Monday 2023-01-02.
pub fn ten_trading_days() -> Vec<NaiveDate> {
    vec![
        d(2023, 1, 2),
        d(2023, 1, 3),
        d(2023, 1, 4),
        d(2023, 1, 5),
        d(2023, 1, 6),
        d(2023, 1, 9),
        d(2023, 1, 10),
        d(2023, 1, 11),
        d(2023, 1, 12),
        d(2023, 1, 13),
    ]
}
