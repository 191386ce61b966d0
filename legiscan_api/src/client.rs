//! HTTP client for the LegiScan API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    query::{BillQuery, Query, SearchQuery},
    types::{Alert, BillResponse, SearchResponse, STATUS_OK},
    Error,
};

/// Production endpoint. Every operation is a GET on this one URL.
pub const DEFAULT_BASE_URL: &str = "https://api.legiscan.com/";

/// Request timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the LegiScan API.
///
/// One call per request, no retries: a failed or timed-out call surfaces
/// as [`Error::RequestFailed`] to the caller.
pub struct Client {
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client pointing at the production LegiScan API.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_api_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    fn get_url(&self, query: &impl Query) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("op", query.operation());
        Ok(query.add_to_url(&url))
    }

    /// Sends the query and returns the decoded body once the envelope says `OK`.
    async fn get<T, Q>(&self, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(query)?;
        let op = query.operation();
        let resp = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::error!("{} timed out", op);
            } else {
                tracing::error!("{} failed: {}", op, e.without_url());
            }
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read {} response body: {}", op, e.without_url());
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::warn!("{} returned HTTP {}: {}", op, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("{} returned malformed JSON: {} | body: {}", op, e, truncate_body(&body));
            Error::ParseFailed(e.to_string())
        })?;
        check_status(&value)?;

        serde_json::from_value::<T>(value).map_err(|e| {
            tracing::warn!("{} response did not match the expected shape: {}", op, e);
            Error::ParseFailed(e.to_string())
        })
    }

    /// Runs a `getSearch` call.
    pub async fn get_search(&self, query: &SearchQuery) -> Result<SearchResponse, Error> {
        self.get::<SearchResponse, SearchQuery>(query).await
    }

    /// Runs a `getBill` call.
    pub async fn get_bill(&self, query: &BillQuery) -> Result<BillResponse, Error> {
        self.get::<BillResponse, BillQuery>(query).await
    }
}

fn check_status(value: &Value) -> Result<(), Error> {
    let status = value.get("status").and_then(Value::as_str);
    if status == Some(STATUS_OK) {
        return Ok(());
    }
    let message = value
        .get("alert")
        .and_then(|a| serde_json::from_value::<Alert>(a.clone()).ok())
        .and_then(|a| a.message);
    tracing::warn!(
        "API returned status {:?}: {}",
        status,
        message.as_deref().unwrap_or("no message")
    );
    Err(Error::ApiStatus {
        status: status.unwrap_or("<missing>").to_string(),
        message,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
