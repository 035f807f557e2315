//! Best-effort assembly of per-day rows across a date range.
//!
//! Each trading day is computed independently. A day that fails, for any
//! reason, is logged and recorded in [`DailySeries::skipped`]; it never
//! aborts the range. A range where every day fails yields an empty series.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use futures_util::StreamExt;
use futures_util::stream;

use crate::constants::DEFAULT_PER_DAY_TIMEOUT_SECS;
use crate::error::{BhavError, Result};
use crate::source::MarketDataSource;
use crate::types::series::{DailySeries, DateRange, DatedRow, SkippedDay};

/// Computes one row for `(symbol, date)`.
pub trait DailyMetric {
    /// Row produced per day.
    type Row: DatedRow;

    /// Compute the row, or fail for this day only.
    fn compute<S: MarketDataSource>(
        &self,
        source: &S,
        symbol: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Self::Row>>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the [`TimeSeriesAssembler`].
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Days computed concurrently. `1` is strictly sequential.
    pub concurrency: usize,
    /// Upper bound on a single day; `None` waits indefinitely.
    pub per_day_timeout: Option<Duration>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            per_day_timeout: Some(Duration::from_secs(DEFAULT_PER_DAY_TIMEOUT_SECS)),
        }
    }
}

// ---------------------------------------------------------------------------
// TimeSeriesAssembler
// ---------------------------------------------------------------------------

/// Folds per-day metrics over the trading days of a range.
///
/// # Example
///
/// ```no_run
/// use nse_bhav::analytics::series::TimeSeriesAssembler;
/// use nse_bhav::analytics::trends::PcrTrend;
/// use nse_bhav::NseClient;
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() -> nse_bhav::Result<()> {
/// let client = NseClient::new()?;
/// let series = TimeSeriesAssembler::new(&client)
///     .concurrency(4)
///     .assemble(
///         "NIFTY",
///         NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
///         NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
///         &PcrTrend,
///     )
///     .await?;
/// println!("{} rows, {} skipped", series.len(), series.skipped.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TimeSeriesAssembler<'a, S> {
    source: &'a S,
    config: AssemblerConfig,
}

impl<'a, S: MarketDataSource> TimeSeriesAssembler<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, AssemblerConfig::default())
    }

    pub fn with_config(source: &'a S, config: AssemblerConfig) -> Self {
        Self { source, config }
    }

    /// Set the number of days computed concurrently (at least 1). Default: 1.
    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    /// Set the per-day timeout. Default: 30 seconds.
    pub fn per_day_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.per_day_timeout = timeout;
        self
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Validate `from..=to` against today, then [`assemble_range`](Self::assemble_range).
    pub async fn assemble<M: DailyMetric>(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
        metric: &M,
    ) -> Result<DailySeries<M::Row>> {
        let range = DateRange::new(from, to)?;
        self.assemble_range(symbol, range, metric).await
    }

    /// Compute `metric` for every trading day in `range`.
    ///
    /// Only a failure to list the trading days is returned as an error.
    pub async fn assemble_range<M: DailyMetric>(
        &self,
        symbol: &str,
        range: DateRange,
        metric: &M,
    ) -> Result<DailySeries<M::Row>> {
        let days = self.source.trading_days(range).await?;

        // `buffered` yields in input order regardless of completion order.
        let outcomes: Vec<(NaiveDate, Result<M::Row>)> = stream::iter(days)
            .map(|date| async move { (date, self.run_day(metric, symbol, date).await) })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut rows = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for (date, outcome) in outcomes {
            match outcome {
                Ok(row) => rows.push(row),
                Err(error) => {
                    tracing::warn!(symbol, %date, %error, "Skipping day");
                    skipped.push(SkippedDay { date, error });
                }
            }
        }

        tracing::info!(
            symbol,
            from = %range.from(),
            to = %range.to(),
            rows = rows.len(),
            skipped = skipped.len(),
            "Assembled daily series"
        );
        Ok(DailySeries::new(symbol, rows, skipped))
    }

    async fn run_day<M: DailyMetric>(
        &self,
        metric: &M,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<M::Row> {
        let day = metric.compute(self.source, symbol, date);
        match self.config.per_day_timeout {
            Some(limit) => tokio::time::timeout(limit, day)
                .await
                .map_err(|_| BhavError::Timeout { date })?,
            None => day.await,
        }
    }
}
