use std::sync::Arc;

use moveq_core::parse_distance_miles;
use rust_decimal::Decimal;

use crate::error::DistanceError;
use crate::ports::{DistanceProvider, RecordStore};

/// Where a resolved distance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceSource {
    Cache,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDistance {
    pub miles: Decimal,
    /// Display text as cached or as returned by the provider.
    pub text: String,
    pub source: DistanceSource,
}

/// Cache-or-fetch distance lookup.
///
/// Check-then-act without a lock: two concurrent misses on the same pair may
/// both call the provider and both insert a record. The store tolerates the
/// duplicate and readers take the oldest row.
#[derive(Clone)]
pub struct DistanceResolver {
    provider: Arc<dyn DistanceProvider>,
    store: Arc<dyn RecordStore>,
}

impl DistanceResolver {
    pub fn new(provider: Arc<dyn DistanceProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self { provider, store }
    }

    /// Driving distance in miles from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// See [`DistanceResolver::resolve`].
    pub async fn get_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Decimal, DistanceError> {
        self.resolve(origin, destination).await.map(|d| d.miles)
    }

    /// Resolve the pair, consulting the record store before the provider.
    ///
    /// Addresses are used as cache keys verbatim: `"12 Elm St"` and
    /// `"12 elm st"` are different pairs. A failed cache write is logged and
    /// the fetched distance is still returned. A failed cache read is logged
    /// and treated as a miss.
    ///
    /// # Errors
    ///
    /// - [`DistanceError::InvalidInput`] if either address is blank.
    /// - [`DistanceError::ProviderUnavailable`] / [`DistanceError::RouteNotFound`]
    ///   when a fetch was needed and failed.
    /// - [`DistanceError::MalformedDistance`] if the cached or fetched text
    ///   has no usable number, or one outside `0..=MAX_DISTANCE_MILES`.
    pub async fn resolve(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<ResolvedDistance, DistanceError> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(DistanceError::InvalidInput);
        }

        match self.store.find(origin, destination).await {
            Ok(Some(record)) => {
                let miles = record
                    .distance_miles()
                    .ok_or_else(|| DistanceError::MalformedDistance(record.distance_text.clone()))?;
                tracing::debug!(
                    origin,
                    destination,
                    record_id = record.id,
                    "distance cache hit"
                );
                return Ok(ResolvedDistance {
                    miles,
                    text: record.distance_text,
                    source: DistanceSource::Cache,
                });
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(origin, destination, error = %e, "distance cache read failed; fetching");
            }
        }

        let fetched = self
            .provider
            .fetch(origin, destination)
            .await
            .map_err(DistanceError::from)
            .inspect_err(|e| {
                tracing::warn!(origin, destination, error = %e, "distance lookup failed");
            })?;

        let miles = parse_distance_miles(&fetched.text).ok_or_else(|| {
            tracing::warn!(origin, destination, text = %fetched.text, "provider returned unparseable distance");
            DistanceError::MalformedDistance(fetched.text.clone())
        })?;

        if let Err(e) = self.store.create(origin, destination, &fetched.text).await {
            tracing::error!(origin, destination, error = %e, "failed to cache distance record");
        }

        Ok(ResolvedDistance {
            miles,
            text: fetched.text,
            source: DistanceSource::Provider,
        })
    }
}
