//! HTTP client for the Distance Matrix API.
//!
//! Wraps `reqwest` with provider-specific status handling: a non-`"OK"`
//! envelope surfaces as [`MapsError::RequestStatus`], a non-`"OK"` element as
//! [`MapsError::ElementStatus`]. Every request asks for driving distance.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::MapsError;
use crate::types::{DistanceMatrixResponse, ProviderDistance};

/// Unit system the provider formats display text in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }
}

/// Provider credentials and endpoint, passed in explicitly at construction.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub units: Units,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("units", &self.units)
            .finish()
    }
}

/// Client for the Distance Matrix API.
///
/// Use [`DistanceMatrixClient::new`] with a [`ProviderConfig`]; point
/// `base_url` at a mock server in tests.
pub struct DistanceMatrixClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    units: Units,
}

impl DistanceMatrixClient {
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`MapsError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn new(config: &ProviderConfig) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .user_agent("moveq/0.1 (distance-quotes)")
            .build()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| MapsError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
            units: config.units,
        })
    }

    /// Fetches the driving distance from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// - [`MapsError::MissingApiKey`] if no key is configured (no request is sent).
    /// - [`MapsError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`MapsError::Deserialize`] if the body is not the expected JSON.
    /// - [`MapsError::RequestStatus`] if the envelope status is not `"OK"`.
    /// - [`MapsError::ElementStatus`] if the pair has no route.
    pub async fn fetch_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<ProviderDistance, MapsError> {
        let api_key = self.api_key.as_deref().ok_or(MapsError::MissingApiKey)?;
        let url = self.build_url(api_key, origin, destination);
        tracing::debug!(origin, destination, units = self.units.as_str(), "requesting driving distance");

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: DistanceMatrixResponse =
            serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
                context: format!("distancematrix(origin={origin}, destination={destination})"),
                source: e,
            })?;

        Self::extract_distance(&parsed)
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, api_key: &str, origin: &str, destination: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("origins", origin);
            pairs.append_pair("destinations", destination);
            pairs.append_pair("mode", "driving");
            pairs.append_pair("units", self.units.as_str());
            pairs.append_pair("key", api_key);
        }
        url
    }

    fn extract_distance(parsed: &DistanceMatrixResponse) -> Result<ProviderDistance, MapsError> {
        if parsed.status != "OK" {
            return Err(MapsError::RequestStatus {
                status: parsed.status.clone(),
                message: parsed
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "no error message".to_string()),
            });
        }

        let element = parsed
            .first_element()
            .ok_or_else(|| MapsError::ElementStatus("MISSING_ELEMENT".to_string()))?;

        if element.status != "OK" {
            return Err(MapsError::ElementStatus(element.status.clone()));
        }

        let distance = element
            .distance
            .as_ref()
            .ok_or_else(|| MapsError::ElementStatus("MISSING_DISTANCE".to_string()))?;

        Ok(ProviderDistance {
            text: distance.text.clone(),
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
