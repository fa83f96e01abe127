//! HTTP client for the Fragella REST API.
//!
//! Wraps `reqwest` with API-key handling, a per-client request budget, and
//! envelope decoding. The budget is owned by the client instance: build one
//! client per ingestion run and the run's call cap travels with it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::FragellaError;
use crate::types::RawFragrance;

const DEFAULT_BASE_URL: &str = "https://api.fragella.com/api/v1";

/// Envelope keys tried, in order, when a search response is an object.
const ENVELOPE_KEYS: [&str; 3] = ["results", "data", "fragrances"];

/// Fixed ceiling on outbound calls. Each attempt is counted before it is
/// sent; once `used == limit` every further call is refused.
#[derive(Debug)]
pub struct RequestBudget {
    used: AtomicU32,
    limit: u32,
}

impl RequestBudget {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            used: AtomicU32::new(0),
            limit,
        }
    }

    /// Claims one request slot, returning the new used count.
    ///
    /// # Errors
    ///
    /// Returns [`FragellaError::QuotaExhausted`] when no slot is left.
    pub fn try_acquire(&self) -> Result<u32, FragellaError> {
        self.used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                (used < self.limit).then_some(used + 1)
            })
            .map(|previous| previous + 1)
            .map_err(|used| FragellaError::QuotaExhausted {
                used,
                limit: self.limit,
            })
    }

    #[must_use]
    pub fn used(&self) -> u32 {
        self.used.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Client for the Fragella API.
///
/// Use [`FragellaClient::new`] for production or
/// [`FragellaClient::with_base_url`] to point at a mock server in tests.
pub struct FragellaClient {
    client: Client,
    api_key: String,
    base_url: Url,
    budget: RequestBudget,
}

impl std::fmt::Debug for FragellaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragellaClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

impl FragellaClient {
    /// Creates a client pointed at the production Fragella API.
    ///
    /// # Errors
    ///
    /// Returns [`FragellaError::MissingApiKey`] when `api_key` is absent or
    /// blank, or [`FragellaError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        max_requests: u32,
    ) -> Result<Self, FragellaError> {
        Self::with_base_url(api_key, timeout_secs, max_requests, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`FragellaClient::new`], plus
    /// [`FragellaError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        max_requests: u32,
        base_url: &str,
    ) -> Result<Self, FragellaError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(FragellaError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("scentdb/0.1 (catalog-seed)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends below the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FragellaError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            budget: RequestBudget::new(max_requests),
        })
    }

    #[must_use]
    pub fn requests_used(&self) -> u32 {
        self.budget.used()
    }

    #[must_use]
    pub fn request_limit(&self) -> u32 {
        self.budget.limit()
    }

    /// Searches fragrances by brand or name.
    ///
    /// Entries that fail to decode are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`FragellaError::QuotaExhausted`] if the request budget is spent.
    /// - [`FragellaError::UnexpectedStatus`] on a non-2xx response.
    /// - [`FragellaError::Http`] on network failure.
    /// - [`FragellaError::Deserialize`] if the body is not JSON.
    /// - [`FragellaError::UnrecognizedShape`] if the body is neither a list
    ///   nor an object carrying a list under a known envelope key.
    pub async fn search_fragrances(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RawFragrance>, FragellaError> {
        let mut url = self.endpoint("fragrances/search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());

        let body = self.request_json(&url).await?;
        decode_fragrance_list(body, &format!("search(q={query})"))
    }

    /// Fetches one fragrance by Fragella id.
    ///
    /// # Errors
    ///
    /// As for [`FragellaClient::search_fragrances`]; a body that is not a
    /// JSON object is [`FragellaError::UnrecognizedShape`].
    pub async fn get_fragrance(&self, fragrance_id: i64) -> Result<RawFragrance, FragellaError> {
        let url = self.endpoint(&format!("fragrances/{fragrance_id}"))?;
        let body = self.request_json(&url).await?;
        let context = format!("getFragrance(id={fragrance_id})");

        if !body.is_object() {
            return Err(FragellaError::UnrecognizedShape {
                context,
                reason: "expected a fragrance object".to_string(),
            });
        }

        serde_json::from_value(body)
            .map_err(|e| FragellaError::Deserialize { context, source: e })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FragellaError> {
        self.base_url
            .join(path)
            .map_err(|e| FragellaError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Claims a budget slot, sends an authenticated GET, asserts a 2xx
    /// status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, FragellaError> {
        let used = self.budget.try_acquire()?;
        tracing::info!(
            endpoint = url.path(),
            used,
            limit = self.budget.limit(),
            "Fragella API request"
        );

        let response = self
            .client
            .get(url.clone())
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FragellaError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: url.path().to_string(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FragellaError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

/// Unwraps a search response into raw records.
///
/// Accepts a top-level array, or an object whose first non-null envelope key
/// (see [`ENVELOPE_KEYS`]) holds an array. Anything else fails closed.
pub(crate) fn decode_fragrance_list(
    body: Value,
    context: &str,
) -> Result<Vec<RawFragrance>, FragellaError> {
    let unrecognized = |reason: &str| FragellaError::UnrecognizedShape {
        context: context.to_string(),
        reason: reason.to_string(),
    };

    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let value = ENVELOPE_KEYS
                .iter()
                .find_map(|key| map.remove(*key).filter(|v| !v.is_null()))
                .ok_or_else(|| unrecognized("no results, data, or fragrances key"))?;
            match value {
                Value::Array(items) => items,
                _ => return Err(unrecognized("expected array of fragrances")),
            }
        }
        _ => return Err(unrecognized("expected array of fragrances")),
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            serde_json::from_value::<RawFragrance>(item)
                .map_err(|e| {
                    tracing::warn!(context, idx, error = %e, "skipping malformed fragrance entry");
                })
                .ok()
        })
        .collect())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
