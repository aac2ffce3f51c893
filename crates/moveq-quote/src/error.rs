use thiserror::Error;

/// Why a distance could not be resolved.
#[derive(Debug, Error)]
pub enum DistanceError {
    /// Origin or destination was empty after trimming.
    #[error("origin and destination must both be non-empty")]
    InvalidInput,

    /// Network failure, timeout, missing credentials, or a non-`OK` response
    /// envelope from the provider.
    #[error("distance provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered but has no route for this pair.
    #[error("no route found: {0}")]
    RouteNotFound(String),

    /// Stored or fetched display text held no usable number.
    #[error("unparseable distance text '{0}'")]
    MalformedDistance(String),
}

/// Failure reported by a [`crate::DistanceProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    RouteNotFound(String),
}

impl From<ProviderError> for DistanceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable(msg) => DistanceError::ProviderUnavailable(msg),
            ProviderError::RouteNotFound(msg) => DistanceError::RouteNotFound(msg),
        }
    }
}

/// Failure reported by a [`crate::RecordStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store read failed: {0}")]
    ReadFailure(String),
    #[error("record store write failed: {0}")]
    WriteFailure(String),
}
