//! Constants for the NSE archive and bhavcopy file formats.
//!
//! Contains the archive base URL, file path templates, column names, and
//! default client settings. These are used internally by
//! [`NseClient`](crate::client::NseClient) and the record parsers, but are
//! also exported for advanced usage.

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the NSE public archive.
pub const ARCHIVE_BASE_URL: &str = "https://archives.nseindia.com";

/// The archive rejects requests without a browser-like user agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default per-day timeout used by the time-series assembler, in seconds.
pub const DEFAULT_PER_DAY_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Archive paths
// ---------------------------------------------------------------------------

/// Archive paths, relative to the base URL.
pub mod paths {
    /// Full cash-market bhavcopy with delivery columns. `{date}` is `DDMMYYYY`.
    pub const EQUITY_BHAVCOPY: &str = "/products/content/sec_bhavdata_full_{date}.csv";

    /// F&O bhavcopy, a ZIP archive holding a single CSV. `{year}` is
    /// `YYYY`, `{month}` is `MON`, `{date}` is `DDMONYYYY`.
    pub const DERIVATIVES_BHAVCOPY: &str =
        "/content/historical/DERIVATIVES/{year}/{month}/fo{date}bhav.csv.zip";

    /// Index constituents. `{slug}` is e.g. `nifty50`.
    pub const INDEX_CONSTITUENTS: &str = "/content/indices/ind_{slug}list.csv";

    /// F&O market lots; lists every derivatives-traded underlying.
    pub const FNO_LOTS: &str = "/content/fo/fo_mktlots.csv";

    /// All listed equities.
    pub const EQUITY_LIST: &str = "/content/equities/EQUITY_L.csv";
}

// ---------------------------------------------------------------------------
// File formats
// ---------------------------------------------------------------------------

/// Date format used by bhavcopy cells (`26-Oct-2023`).
pub const BHAV_DATE_FORMAT: &str = "%d-%b-%Y";

/// Series code for regular equity in the cash bhavcopy.
pub const EQUITY_SERIES: &str = "EQ";

/// Required columns of the F&O bhavcopy.
pub const DERIVATIVE_COLUMNS: &[&str] = &[
    "INSTRUMENT",
    "SYMBOL",
    "EXPIRY_DT",
    "STRIKE_PR",
    "OPTION_TYP",
    "OPEN",
    "HIGH",
    "LOW",
    "CLOSE",
    "CONTRACTS",
    "OPEN_INT",
    "CHG_IN_OI",
    "TIMESTAMP",
];

/// Required columns of the full cash bhavcopy.
pub const EQUITY_COLUMNS: &[&str] = &[
    "SYMBOL",
    "SERIES",
    "DATE1",
    "OPEN_PRICE",
    "HIGH_PRICE",
    "LOW_PRICE",
    "CLOSE_PRICE",
    "TTL_TRD_QNTY",
    "DELIV_QTY",
    "DELIV_PER",
];
