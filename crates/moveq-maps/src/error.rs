use thiserror::Error;

/// Errors returned by the Distance Matrix client.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Network, TLS, timeout, or non-2xx failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No API key was configured, so no request was sent.
    #[error("distance provider API key is not configured")]
    MissingApiKey,

    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The top-level `status` was something other than `"OK"`.
    #[error("distance provider returned status {status}: {message}")]
    RequestStatus { status: String, message: String },

    /// The request succeeded but the origin/destination element did not,
    /// e.g. `NOT_FOUND` or `ZERO_RESULTS`.
    #[error("no route between origin and destination (element status {0})")]
    ElementStatus(String),

    /// The body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MapsError {
    /// `true` when the provider answered but found no route for this pair.
    #[must_use]
    pub fn is_route_not_found(&self) -> bool {
        matches!(self, Self::ElementStatus(_))
    }
}
