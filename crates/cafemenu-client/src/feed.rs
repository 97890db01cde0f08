//! Menu feed fetching.
//!
//! The menu is a spreadsheet published as CSV. Browsers reach it through a
//! CORS relay, and publishing caches aggressively, so every request carries
//! a `t=<unix millis>` cache buster. The relay takes the whole target URL,
//! percent-encoded, appended to its prefix.

use cafemenu_core::{parse_menu, Menu, Row};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::ClientError;
use crate::http::{build_client, ensure_success, parse_url};

const UTF8_BOM: char = '\u{feff}';

/// Fetches and parses the published menu feed.
pub struct FeedClient {
    client: Client,
    cors_proxy: Option<String>,
}

impl FeedClient {
    /// Creates a feed client. `cors_proxy` is the relay prefix, e.g.
    /// `https://corsproxy.io/?`; `None` fetches the feed directly.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        cors_proxy: Option<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            cors_proxy,
        })
    }

    /// Request URL for `feed_url` with the given cache buster, routed
    /// through the relay when one is configured.
    #[must_use]
    pub fn request_url(&self, feed_url: &str, cache_buster: i64) -> String {
        let separator = if feed_url.contains('?') { '&' } else { '?' };
        let busted = format!("{feed_url}{separator}t={cache_buster}");
        match &self.cors_proxy {
            Some(proxy) => format!("{proxy}{}", utf8_percent_encode(&busted, NON_ALPHANUMERIC)),
            None => busted,
        }
    }

    /// Downloads the feed rows, busting caches with the current time.
    ///
    /// # Errors
    ///
    /// See [`FeedClient::fetch_rows_with_cache_buster`].
    pub async fn fetch_rows(&self, feed_url: &str) -> Result<Vec<Row>, ClientError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.fetch_rows_with_cache_buster(feed_url, now).await
    }

    /// Downloads the feed rows with an explicit cache buster.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidUrl`] if the request URL does not parse.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Csv`] if the body is not valid CSV.
    pub async fn fetch_rows_with_cache_buster(
        &self,
        feed_url: &str,
        cache_buster: i64,
    ) -> Result<Vec<Row>, ClientError> {
        let url = parse_url(&self.request_url(feed_url, cache_buster))?;
        tracing::debug!(proxied = self.cors_proxy.is_some(), "fetching menu feed");

        let response = self.client.get(url).send().await?;
        let body = ensure_success(response)?.text().await?;
        let rows = parse_csv(&body)?;

        tracing::info!(rows = rows.len(), "fetched menu feed");
        Ok(rows)
    }

    /// Downloads and parses the whole menu.
    ///
    /// # Errors
    ///
    /// Any fetch error, or [`ClientError::Menu`] when the feed holds no
    /// products.
    pub async fn load_menu(&self, feed_url: &str) -> Result<Menu, ClientError> {
        let rows = self.fetch_rows(feed_url).await?;
        Ok(parse_menu(&rows)?)
    }
}

/// Parses a CSV document with a header row into feed rows.
///
/// A leading byte-order mark is dropped, records may be shorter or longer
/// than the header, and rows whose cells are all blank are skipped.
///
/// # Errors
///
/// Returns [`ClientError::Csv`] when the document is malformed.
pub fn parse_csv(body: &str) -> Result<Vec<Row>, ClientError> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ClientError::Csv {
            context: "header row".to_owned(),
            source: e,
        })?
        .clone();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ClientError::Csv {
            context: format!("record {}", index + 1),
            source: e,
        })?;
        let row = Row::from_pairs(headers.iter().zip(record.iter()));
        if !row.is_blank() {
            rows.push(row);
        }
    }
    Ok(rows)
}
