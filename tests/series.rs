//! Best-effort daily series assembly.

mod common;

use std::time::Duration;

use chrono::{Local, NaiveDate};

use common::*;
use nse_bhav::MemorySource;
use nse_bhav::analytics::metrics::OiScope;
use nse_bhav::analytics::series::{AssemblerConfig, DailyMetric, TimeSeriesAssembler};
use nse_bhav::analytics::{DeliveryTrend, OpenInterestTrend, PcrTrend};
use nse_bhav::error::{BhavError, Result};
use nse_bhav::source::MarketDataSource;
use nse_bhav::types::series::{DailySeries, DateRange, DatedRow};

/// Ten trading days of NIFTY chains, with no NIFTY rows on the 3rd and 7th.
fn source_with_gaps() -> MemorySource {
    let days = ten_trading_days();
    let mut source = MemorySource::new().with_trading_days(days.clone());
    for (i, day) in days.into_iter().enumerate() {
        let snapshot = if i == 2 || i == 6 {
            three_strike_snapshot("BANKNIFTY", day, 104.0)
        } else {
            three_strike_snapshot("NIFTY", day, 100.0 + i as f64)
        };
        source = source.with_derivatives(day, snapshot);
    }
    source
}

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    date: NaiveDate,
}

impl DatedRow for Marker {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Sleeps for a day-dependent time before answering, so completion order
/// differs from date order.
struct Staggered;

impl DailyMetric for Staggered {
    type Row = Marker;

    async fn compute<S: MarketDataSource>(
        &self,
        _source: &S,
        _symbol: &str,
        date: NaiveDate,
    ) -> Result<Marker> {
        let delay = 100 - u64::from(chrono::Datelike::day(&date)) * 5;
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(Marker { date })
    }
}

/// Never finishes within a minute.
struct Stalled;

impl DailyMetric for Stalled {
    type Row = Marker;

    async fn compute<S: MarketDataSource>(
        &self,
        _source: &S,
        _symbol: &str,
        date: NaiveDate,
    ) -> Result<Marker> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Marker { date })
    }
}

#[tokio::test]
async fn test_pcr_series_skips_days_without_data() {
    let source = source_with_gaps();
    let days = ten_trading_days();

    let series = TimeSeriesAssembler::new(&source)
        .assemble("NIFTY", days[0], days[9], &PcrTrend)
        .await
        .expect("assemble failed");

    assert_eq!(series.symbol, "NIFTY");
    assert_eq!(series.len(), 8);
    let expected: Vec<NaiveDate> = days
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 6)
        .map(|(_, d)| *d)
        .collect();
    assert_eq!(series.dates(), expected);

    let skipped: Vec<NaiveDate> = series.skipped.iter().map(|s| s.date).collect();
    assert_eq!(skipped, vec![days[2], days[6]]);
    for skip in &series.skipped {
        assert!(
            matches!(skip.error, BhavError::MissingFuturesReference { .. }),
            "got {:?}",
            skip.error
        );
    }

    for row in &series.rows {
        assert_eq!(row.pcr, 1.0);
        assert_eq!(row.option_expiry, row.date + chrono::Duration::days(3));
    }
    assert_eq!(series.rows[0].close, 100.0);
}

#[tokio::test]
async fn test_every_day_failing_yields_empty_series() {
    let days = ten_trading_days();
    let source = MemorySource::new().with_trading_days(days.clone());

    let series = TimeSeriesAssembler::new(&source)
        .assemble("NIFTY", days[0], days[9], &OpenInterestTrend::default())
        .await
        .expect("a range of failures is not an error");

    assert!(series.is_empty());
    assert_eq!(series.skipped.len(), days.len());
    assert!(series
        .skipped
        .iter()
        .all(|s| matches!(s.error, BhavError::NoData(_))));
}

#[tokio::test]
async fn test_concurrent_assembly_preserves_order() {
    let source = source_with_gaps();
    let days = ten_trading_days();

    let sequential = TimeSeriesAssembler::new(&source)
        .assemble("NIFTY", days[0], days[9], &PcrTrend)
        .await
        .expect("sequential");
    let concurrent = TimeSeriesAssembler::new(&source)
        .concurrency(4)
        .assemble("NIFTY", days[0], days[9], &PcrTrend)
        .await
        .expect("concurrent");

    assert_eq!(sequential.rows, concurrent.rows);
    assert_eq!(sequential.skipped.len(), concurrent.skipped.len());
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_completion_is_reordered() {
    let days = ten_trading_days();
    let source = MemorySource::new().with_trading_days(days.clone());

    let series = TimeSeriesAssembler::new(&source)
        .concurrency(10)
        .assemble("ANY", days[0], days[9], &Staggered)
        .await
        .expect("assemble");

    assert_eq!(series.dates(), days);
    assert!(series.skipped.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_day_times_out_and_is_skipped() {
    let days = ten_trading_days();
    let source = MemorySource::new().with_trading_days(days[..3].to_vec());

    let series = TimeSeriesAssembler::new(&source)
        .per_day_timeout(Some(Duration::from_secs(1)))
        .assemble("ANY", days[0], days[9], &Stalled)
        .await
        .expect("assemble");

    assert!(series.is_empty());
    assert_eq!(series.skipped.len(), 3);
    assert!(series
        .skipped
        .iter()
        .all(|s| matches!(s.error, BhavError::Timeout { date } if date == s.date)));
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let source = MemorySource::new();
    let err = TimeSeriesAssembler::new(&source)
        .assemble("NIFTY", d(2023, 1, 13), d(2023, 1, 2), &PcrTrend)
        .await
        .unwrap_err();
    assert!(matches!(err, BhavError::InvalidDateRange { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_range_ending_after_today_is_rejected() {
    let source = MemorySource::new();
    let today = Local::now().date_naive();
    let err = TimeSeriesAssembler::new(&source)
        .assemble("NIFTY", today, today + chrono::Duration::days(5), &PcrTrend)
        .await
        .unwrap_err();
    assert!(matches!(err, BhavError::InvalidDateRange { .. }));
}

#[tokio::test]
async fn test_oi_series_scopes() {
    let source = source_with_gaps();
    let days = ten_trading_days();

    let nearest = TimeSeriesAssembler::new(&source)
        .assemble("NIFTY", days[0], days[1], &OpenInterestTrend::default())
        .await
        .expect("nearest");
    assert_eq!(nearest.len(), 2);
    assert_eq!(nearest.rows[0].open_interest, 5_000);
    assert_eq!(nearest.rows[0].change_in_oi, 100);
    assert_eq!(nearest.rows[1].close, 101.0);

    let all = TimeSeriesAssembler::new(&source)
        .assemble(
            "NIFTY",
            days[0],
            days[1],
            &OpenInterestTrend {
                scope: OiScope::AllExpiries,
            },
        )
        .await
        .expect("all");
    assert_eq!(all.rows[0].open_interest, 7_000);
    assert_eq!(all.rows[0].change_in_oi, 50);
}

#[tokio::test]
async fn test_delivery_series_reads_eq_series() {
    let days = ten_trading_days();
    let mut source = MemorySource::new();
    for (i, day) in days.iter().take(4).enumerate() {
        source = source.with_equities(
            *day,
            vec![
                equity("INFY", "EQ", *day, 1_500.0 + i as f64, Some(50.0 + i as f64)),
                equity("INFY", "BL", *day, 1_499.0, None),
            ],
        );
    }

    let series = TimeSeriesAssembler::with_config(&source, AssemblerConfig::default())
        .assemble("INFY", days[0], days[3], &DeliveryTrend::default())
        .await
        .expect("delivery");

    assert_eq!(series.len(), 4);
    let pct: Vec<Option<f64>> = series.rows.iter().map(|r| r.delivery_pct).collect();
    assert_eq!(pct, vec![Some(50.0), Some(51.0), Some(52.0), Some(53.0)]);
}

#[test]
fn test_daily_series_sorts_and_drops_repeated_dates() {
    let rows = vec![
        Marker { date: d(2023, 1, 4) },
        Marker { date: d(2023, 1, 2) },
        Marker { date: d(2023, 1, 4) },
        Marker { date: d(2023, 1, 3) },
    ];
    let series = DailySeries::new("X", rows, Vec::new());
    assert_eq!(series.dates(), vec![d(2023, 1, 2), d(2023, 1, 3), d(2023, 1, 4)]);
}

#[test]
fn test_date_range_weekdays() {
    let range = DateRange::checked(d(2023, 1, 6), d(2023, 1, 10), d(2023, 6, 1)).expect("range");
    assert_eq!(range.weekdays(), vec![d(2023, 1, 6), d(2023, 1, 9), d(2023, 1, 10)]);

    assert!(DateRange::checked(d(2023, 1, 6), d(2023, 1, 6), d(2023, 1, 6)).is_ok());
    assert!(DateRange::checked(d(2023, 1, 6), d(2023, 1, 7), d(2023, 1, 6)).is_err());
}
