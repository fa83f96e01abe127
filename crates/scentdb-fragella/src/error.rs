use thiserror::Error;

/// Errors returned by the Fragella API client.
#[derive(Debug, Error)]
pub enum FragellaError {
    /// No credential was supplied at construction time.
    #[error("FRAGELLA_API_KEY is not configured; it is required for seeding")]
    MissingApiKey,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Fragella API error {status} for {endpoint}: {body}")]
    UnexpectedStatus {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed as JSON but matched none of the known envelopes.
    #[error("unrecognized response shape from {context}: {reason}")]
    UnrecognizedShape { context: String, reason: String },

    /// The client's per-run request budget is spent. The call was refused
    /// without touching the network.
    #[error("API quota exhausted ({used}/{limit} requests this run)")]
    QuotaExhausted { used: u32, limit: u32 },
}
