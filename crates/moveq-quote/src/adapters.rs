//! Production implementations of the resolver ports.

use async_trait::async_trait;
use moveq_core::DistanceRecord;
use moveq_maps::{DistanceMatrixClient, ProviderDistance};
use sqlx::PgPool;

use crate::error::{ProviderError, StoreError};
use crate::ports::{DistanceProvider, RecordStore};

#[async_trait]
impl DistanceProvider for DistanceMatrixClient {
    async fn fetch(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<ProviderDistance, ProviderError> {
        self.fetch_distance(origin, destination)
            .await
            .map_err(|e| {
                if e.is_route_not_found() {
                    ProviderError::RouteNotFound(e.to_string())
                } else {
                    ProviderError::Unavailable(e.to_string())
                }
            })
    }
}

/// [`RecordStore`] backed by the `distance_records` Postgres table.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<DistanceRecord>, StoreError> {
        moveq_db::find_distance_record(&self.pool, origin, destination)
            .await
            .map(|row| row.map(DistanceRecord::from))
            .map_err(|e| StoreError::ReadFailure(e.to_string()))
    }

    async fn create(
        &self,
        origin: &str,
        destination: &str,
        distance_text: &str,
    ) -> Result<DistanceRecord, StoreError> {
        moveq_db::create_distance_record(&self.pool, origin, destination, distance_text)
            .await
            .map(DistanceRecord::from)
            .map_err(|e| StoreError::WriteFailure(e.to_string()))
    }
}
