//! # nse-bhav
//!
//! NSE end-of-day data as typed records, and the option-chain analytics
//! built on them: expiries, option chains, max pain, put/call ratio,
//! open-interest and delivery trends, and futures build-up.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nse_bhav::analytics::{OptionChainBuilder, max_pain, put_call_ratio};
//! use nse_bhav::client::NseClient;
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> nse_bhav::error::Result<()> {
//!     let client = NseClient::new()?;
//!     let day = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
//!     let chain = OptionChainBuilder::new(&client).build("NIFTY", day, None).await?;
//!     println!("max pain {:?}, pcr {:.2}", max_pain(&chain)?, put_call_ratio(&chain)?);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod client;
pub mod constants;
pub mod error;
pub mod export;
pub mod source;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::NseClient;
/// Re-export the error type and Result alias.
pub use error::{BhavError, Result};
/// Re-export the data-source seam and its in-memory implementation.
pub use source::{MarketDataSource, MemorySource};
