//! Command-line reports over NSE bhavcopy data.
//!
//! # Usage
//!
//! ```sh
//! export NSE_SYMBOL="NIFTY"
//! export NSE_DATE="2023-01-02"
//! cargo run --bin nse_report --features cli -- maxpain
//! ```
//!
//! Reports: `bhavcopy`, `expiries`, `chain`, `maxpain`, `pcr`, `oi`,
//! `delivery`, `leaders`, `buildup`. Dates are `YYYY-MM-DD`.
//!
//! | Variable | Used by | Default |
//! |---|---|---|
//! | `NSE_SEGMENT` | `bhavcopy` | `cash`; or `fno` |
//! | `NSE_SYMBOL` | `expiries`, `chain`, `maxpain`, `pcr`, `oi`, `delivery` | `NIFTY` |
//! | `NSE_DATE` | `bhavcopy`, `expiries`, `chain`, `maxpain`, `leaders` | today |
//! | `NSE_EXPIRY` | `chain`, `maxpain` | nearest |
//! | `NSE_FROM` / `NSE_TO` | `pcr`, `oi`, `delivery`, `buildup` | 30 days ago / today |
//! | `NSE_INDEX` | `leaders` | `nifty50` |
//! | `NSE_SORT` / `NSE_LIMIT` | `leaders` | `highest` / `10` |
//! | `NSE_OUTPUT` | all | print only; `csv` or `json` also saves a file |
//!
//! `bhavcopy` always saves its file, as CSV unless `NSE_OUTPUT=json`.

use std::env;

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

use nse_bhav::analytics::delivery::SortOrder;
use nse_bhav::analytics::series::TimeSeriesAssembler;
use nse_bhav::analytics::{
    BuildupScanner, DeliveryScreener, DeliveryTrend, ExpiryResolver, OpenInterestTrend,
    OptionChainBuilder, PcrTrend, max_pain, pain_curve, put_call_ratio,
};
use nse_bhav::client::{ClientConfig, NseClient};
use nse_bhav::error::{BhavError, Result};
use nse_bhav::export::{self, Format};
use nse_bhav::types::{IndexName, Segment};
use nse_bhav::types::buildup::Buildup;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let report = env::args().nth(1).unwrap_or_else(|| "maxpain".to_owned());
    let client = NseClient::with_config(ClientConfig::from_env()?)?;

    let today = Local::now().date_naive();
    let symbol = env_or("NSE_SYMBOL", "NIFTY");
    let date = date_var("NSE_DATE")?.unwrap_or(today);
    let expiry = date_var("NSE_EXPIRY")?;
    let from = date_var("NSE_FROM")?.unwrap_or(today - Duration::days(30));
    let to = date_var("NSE_TO")?.unwrap_or(today);
    let output = match env::var("NSE_OUTPUT").ok().as_deref() {
        Some("csv") => Some(Format::Csv),
        Some("json") => Some(Format::Json),
        _ => None,
    };

    match report.as_str() {
        "bhavcopy" => {
            let segment: Segment = env_or("NSE_SEGMENT", "cash").parse()?;
            let name = export::bhavcopy_file_name(segment, date);
            let format = output.or(Some(Format::Csv));
            match segment {
                Segment::Cash => {
                    let rows = client.get_equity_bhavcopy(date).await?;
                    println!("{segment} bhavcopy for {date}: {} rows", rows.len());
                    for rec in rows.iter().take(10) {
                        println!("{rec:?}");
                    }
                    save(&name, &rows, format)?;
                }
                Segment::FnO => {
                    let rows = client.get_derivatives_bhavcopy(date).await?;
                    println!("{segment} bhavcopy for {date}: {} rows", rows.len());
                    for rec in rows.iter().take(10) {
                        println!("{rec:?}");
                    }
                    save(&name, &rows, format)?;
                }
            }
        }
        "expiries" => {
            let expiries = ExpiryResolver::new(&client).resolve(&symbol, date).await?;
            for expiry in expiries {
                println!("{expiry}");
            }
        }
        "chain" => {
            let chain = OptionChainBuilder::new(&client)
                .build(&symbol, date, expiry)
                .await?;
            println!(
                "{symbol} {date} exp {}: futures {:.2}, ATM {}",
                chain.expiry, chain.futures_price, chain.atm_strike
            );
            let table = chain.table();
            for row in &table {
                println!("{row:?}");
            }
            let name = export::file_name("option_chain", &symbol, date, Some(chain.expiry));
            save(&name, &table, output)?;
        }
        "maxpain" => {
            let chain = OptionChainBuilder::new(&client)
                .build(&symbol, date, expiry)
                .await?;
            let pain = max_pain(&chain)?;
            println!(
                "{symbol} exp {}: max pain {} (loss {:.0})",
                chain.expiry, pain.strike, pain.loss
            );
            match put_call_ratio(&chain) {
                Ok(pcr) => println!("PCR {pcr:.3}"),
                Err(e) => println!("PCR unavailable: {e}"),
            }
            let curve = pain_curve(&chain);
            let name = export::file_name("max_pain", &symbol, date, Some(chain.expiry));
            save(&name, &curve, output)?;
        }
        "pcr" => {
            let series = TimeSeriesAssembler::new(&client)
                .assemble(&symbol, from, to, &PcrTrend)
                .await?;
            for row in &series.rows {
                println!("{} close {:.2} pcr {:.3}", row.date, row.close, row.pcr);
            }
            save(&export::file_name("pcr", &symbol, to, None), &series.rows, output)?;
        }
        "oi" => {
            let series = TimeSeriesAssembler::new(&client)
                .assemble(&symbol, from, to, &OpenInterestTrend::default())
                .await?;
            for row in &series.rows {
                println!(
                    "{} close {:.2} oi {} chg {}",
                    row.date, row.close, row.open_interest, row.change_in_oi
                );
            }
            save(&export::file_name("oi", &symbol, to, None), &series.rows, output)?;
        }
        "delivery" => {
            let series = TimeSeriesAssembler::new(&client)
                .assemble(&symbol, from, to, &DeliveryTrend::default())
                .await?;
            for row in &series.rows {
                println!(
                    "{} close {:.2} deliv {:?}%",
                    row.date, row.close, row.delivery_pct
                );
            }
            save(&export::file_name("delivery", &symbol, to, None), &series.rows, output)?;
        }
        "leaders" => {
            let index: IndexName = env_or("NSE_INDEX", "nifty50").parse()?;
            let order: SortOrder = env_or("NSE_SORT", "highest").parse()?;
            let limit: usize = env_or("NSE_LIMIT", "10").parse().map_err(|_| {
                BhavError::InvalidArgument("NSE_LIMIT is not a number".into())
            })?;
            let rows = DeliveryScreener::new(&client)
                .leaders(date, index, order, limit)
                .await?;
            for rec in &rows {
                println!("{:<12} {:?}%", rec.symbol, rec.delivery_pct);
            }
            let label = format!("{order:?}_{index:?}").to_lowercase();
            save(&export::file_name("delivery", &label, date, None), &rows, output)?;
        }
        "buildup" => {
            let report = BuildupScanner::new(&client).scan(from, to).await?;
            for kind in [
                Buildup::LongBuildup,
                Buildup::ShortBuildup,
                Buildup::LongUnwinding,
                Buildup::ShortCovering,
            ] {
                println!("## {kind:?}");
                for row in report.top(kind, 5) {
                    println!(
                        "{:<12} close {:+.2}% oi {:+.2}%",
                        row.symbol,
                        row.pch_close * 100.0,
                        row.pch_oi * 100.0
                    );
                }
            }
        }
        other => {
            return Err(BhavError::InvalidArgument(format!("unknown report: {other}")));
        }
    }

    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn date_var(name: &str) -> Result<Option<NaiveDate>> {
    match env::var(name) {
        Ok(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| BhavError::InvalidArgument(format!("{name} is not YYYY-MM-DD: {value}"))),
        Err(_) => Ok(None),
    }
}

fn save<T: Serialize>(name: &str, rows: &[T], format: Option<Format>) -> Result<()> {
    match format {
        Some(Format::Json) => export::save(name.replace(".csv", ".json"), rows, Format::Json),
        Some(Format::Csv) => export::save(name, rows, Format::Csv),
        None => Ok(()),
    }
}
