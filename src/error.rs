//! Error types for the `nse-bhav` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, BhavError>`.
//!
//! [`BhavError`] covers:
//! - **Data errors** — No records, missing futures reference, malformed files
//! - **Analytics errors** — Undefined put/call ratio, invalid date ranges
//! - **HTTP errors** — Unexpected status codes and transport failures
//! - **Serialization errors** — CSV, JSON and ZIP failures
//! - **Invalid arguments** — Client-side validation errors

use chrono::NaiveDate;

/// All possible errors produced by `nse-bhav`.
#[derive(Debug, thiserror::Error)]
pub enum BhavError {
    /// No records exist for the requested symbol/date (holiday, newly listed,
    /// delisted, or a file the archive does not publish).
    #[error("no data: {0}")]
    NoData(String),

    /// The option chain needs a futures close price and none was traded.
    #[error("no futures contract for {symbol} on {date}; futures price and ATM strike unavailable")]
    MissingFuturesReference {
        /// Underlying symbol.
        symbol: String,
        /// Trade date of the snapshot.
        date: NaiveDate,
    },

    /// `to` precedes `from`, or `to` lies in the future.
    #[error("invalid date range: {from} to {to}")]
    InvalidDateRange {
        /// Start of the range.
        from: NaiveDate,
        /// End of the range.
        to: NaiveDate,
    },

    /// Put/call ratio requested for a chain whose call open interest is zero.
    #[error("put/call ratio undefined for {symbol} on {date}: call open interest is zero")]
    UndefinedRatio {
        /// Underlying symbol.
        symbol: String,
        /// Trade date of the chain.
        date: NaiveDate,
    },

    /// A bhavcopy file is missing required columns.
    #[error("missing required columns: {}", missing.join(", "))]
    Schema {
        /// Names of the absent columns.
        missing: Vec<String>,
    },

    /// A cell could not be parsed into its typed field.
    #[error("cannot parse {field} from {value:?}")]
    Parse {
        /// Column name.
        field: &'static str,
        /// Raw cell text.
        value: String,
    },

    /// A single day's computation exceeded the per-day timeout.
    #[error("timed out computing {date}")]
    Timeout {
        /// The trade date that timed out.
        date: NaiveDate,
    },

    /// The archive returned an unexpected HTTP status code.
    #[error("HTTP {status} for {url}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The requested URL.
        url: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to read or write CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to serialize JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A downloaded archive could not be opened or read.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// An I/O error while exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BhavError>;
