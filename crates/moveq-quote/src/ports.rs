//! Seams between the resolver and the outside world.

use async_trait::async_trait;
use moveq_core::DistanceRecord;
use moveq_maps::ProviderDistance;

use crate::error::{ProviderError, StoreError};

/// Looks up the driving distance for an address pair.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    async fn fetch(&self, origin: &str, destination: &str)
        -> Result<ProviderDistance, ProviderError>;
}

/// Persistent cache of distance lookups, keyed by the literal address pair.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<DistanceRecord>, StoreError>;

    async fn create(
        &self,
        origin: &str,
        destination: &str,
        distance_text: &str,
    ) -> Result<DistanceRecord, StoreError>;
}
