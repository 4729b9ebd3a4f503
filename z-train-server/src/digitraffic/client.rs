//! Digitraffic rail HTTP client.
//!
//! Fetches every train running on a date and keeps only those on the
//! configured commuter line. One request per call: nothing is cached or
//! retried here.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{TrainRecord, date_path_segment, today_local};

use super::error::FetchError;

/// Default base URL for the Digitraffic rail API.
pub const DEFAULT_BASE_URL: &str = "https://rata.digitraffic.fi/api/v1";

/// Default value of the client identification header.
pub const DEFAULT_CLIENT_ID: &str = "z-train-server";

/// The commuter line the board follows.
pub const DEFAULT_LINE_ID: &str = "Z";

/// Header Digitraffic asks clients to identify themselves with.
const CLIENT_ID_HEADER: &str = "digitraffic-user";

/// How much of an unparseable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the Digitraffic client.
#[derive(Debug, Clone)]
pub struct DigitrafficConfig {
    /// Value of the `Digitraffic-User` header
    pub client_id: String,
    /// Base URL for the API (defaults to production Digitraffic)
    pub base_url: String,
    /// Commuter line to keep
    pub line_id: String,
    /// Request timeout; `None` leaves the HTTP client default
    pub timeout: Option<Duration>,
}

impl DigitrafficConfig {
    /// Create a new config with the given client id.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            line_id: DEFAULT_LINE_ID.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the commuter line to keep.
    pub fn with_line(mut self, line_id: impl Into<String>) -> Self {
        self.line_id = line_id.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for DigitrafficConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_ID)
    }
}

/// Digitraffic rail API client.
#[derive(Debug, Clone)]
pub struct DigitrafficClient {
    http: reqwest::Client,
    base_url: String,
    line_id: String,
}

impl DigitrafficClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DigitrafficConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        let client_id = HeaderValue::from_str(&config.client_id)
            .map_err(|_| FetchError::InvalidClientId(config.client_id.clone()))?;
        headers.insert(HeaderName::from_static(CLIENT_ID_HEADER), client_id);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            line_id: config.line_id,
        })
    }

    /// The line this client filters to.
    pub fn line_id(&self) -> &str {
        &self.line_id
    }

    /// URL of the all-trains listing for a date.
    pub fn trains_url(&self, date: NaiveDate) -> String {
        format!("{}/trains/{}", self.base_url, date_path_segment(date))
    }

    /// Fetch today's trains on the configured line.
    ///
    /// "Today" is the local calendar date.
    pub async fn fetch_line_trains_today(&self) -> Result<Vec<TrainRecord>, FetchError> {
        self.fetch_line_trains_on(today_local()).await
    }

    /// Fetch the trains on the configured line running on `date`.
    ///
    /// Returns an empty vector when the line has no trains that day.
    pub async fn fetch_line_trains_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<TrainRecord>, FetchError> {
        let url = self.trains_url(date);
        info!(%url, "fetching trains");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "Digitraffic returned an error");
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let trains: Vec<Value> = serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })?;
        let total = trains.len();

        let line_trains = decode_line_trains(trains, &self.line_id);

        info!(
            line = %self.line_id,
            total,
            on_line = line_trains.len(),
            "fetched trains"
        );

        Ok(line_trains)
    }
}

/// Decode the trains on `line_id` out of a raw `trains/{date}` array.
///
/// Trains on other lines are dropped before decoding, so a malformed record
/// elsewhere in the day cannot fail the board. A line train missing its
/// number or date is skipped with a warning.
pub(super) fn decode_line_trains(trains: Vec<Value>, line_id: &str) -> Vec<TrainRecord> {
    trains
        .into_iter()
        .filter(|t| t.get("commuterLineID").and_then(Value::as_str) == Some(line_id))
        .filter_map(|t| match serde_json::from_value::<TrainRecord>(t) {
            Ok(train) => Some(train),
            Err(e) => {
                warn!(line = line_id, error = %e, "skipping undecodable train");
                None
            }
        })
        .collect()
}
