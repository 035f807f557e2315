//! NSE archive endpoint implementations.
//!
//! Each sub-module adds `async` methods to
//! [`NseClient`](crate::client::NseClient) via `impl` blocks. All methods
//! handle URL construction, HTTP transport, CSV parsing and error mapping.
//!
//! ## Usage
//!
//! ```no_run
//! use nse_bhav::NseClient;
//! use nse_bhav::types::IndexName;
//! use chrono::NaiveDate;
//!
//! # #[tokio::main]
//! # async fn main() -> nse_bhav::Result<()> {
//! let client = NseClient::new()?;
//! let day = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
//! let cash = client.get_equity_bhavcopy(day).await?;
//! let nifty = client.get_index_symbols(IndexName::Nifty50).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Files | Description |
//! |---|---|---|
//! | [`bhavcopy`] | 2 | Cash (with delivery) and F&O bhavcopies |
//! | [`indices`] | 3 | Index constituents, F&O underlyings, equity list |

pub mod bhavcopy;
pub mod indices;
