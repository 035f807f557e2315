//! Core HTTP client for the NSE public archive.
//!
//! The [`NseClient`] struct is the live [`MarketDataSource`] implementation.
//! It wraps [`reqwest::Client`] with the headers the archive expects and
//! provides a `get_bytes` helper that maps archive misses to
//! [`BhavError::NoData`].
//!
//! Archive endpoint methods are added to `NseClient` via `impl` blocks in the
//! [`crate::api`] module.
//!
//! [`MarketDataSource`]: crate::source::MarketDataSource

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::constants::{ARCHIVE_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error::{BhavError, Result};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the [`NseClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Archive base URL (defaults to [`ARCHIVE_BASE_URL`]).
    pub base_url: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: ARCHIVE_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `NSE_ARCHIVE_URL`, `NSE_USER_AGENT` and
    /// `NSE_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("NSE_ARCHIVE_URL") {
            config.base_url = url;
        }
        if let Ok(ua) = std::env::var("NSE_USER_AGENT") {
            config.user_agent = ua;
        }
        if let Ok(secs) = std::env::var("NSE_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                BhavError::InvalidArgument(format!("NSE_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// NseClient
// ---------------------------------------------------------------------------

/// Core HTTP client for the NSE public archive.
///
/// # Example
///
/// ```no_run
/// use nse_bhav::client::NseClient;
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() -> nse_bhav::error::Result<()> {
/// let client = NseClient::new()?;
/// let day = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
/// let rows = client.get_derivatives_bhavcopy(day).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NseClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NseClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client pointing at a custom base URL.
    ///
    /// Useful for mirrors and mock servers.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers(&config.user_agent)?)
            .timeout(config.timeout)
            .build()?;

        // A trailing slash keeps `join` from dropping the last path segment.
        let mut base = config.base_url.trim_end_matches('/').to_owned();
        base.push('/');

        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
        })
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a GET request and return the raw body.
    ///
    /// A `404` becomes [`BhavError::NoData`]: the archive has no file for
    /// holidays and unpublished dates.
    pub async fn get_bytes(&self, path: &str) -> Result<Bytes> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BhavError::NoData(format!("archive has no file at {url}")));
        }
        if !status.is_success() {
            return Err(BhavError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }
        Ok(resp.bytes().await?)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Build the full URL from a path segment.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Default headers applied to every request.
    fn default_headers(user_agent: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|_| {
                BhavError::InvalidArgument("user agent contains invalid header characters".into())
            })?,
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/csv,*/*"));
        Ok(headers)
    }
}
