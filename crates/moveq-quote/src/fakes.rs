//! In-memory port implementations for resolver and calculator tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use moveq_core::DistanceRecord;
use moveq_maps::ProviderDistance;

use crate::error::{ProviderError, StoreError};
use crate::ports::{DistanceProvider, RecordStore};

enum Reply {
    Text(String),
    Unavailable(String),
    RouteNotFound(String),
}

/// Provider that answers every request the same way and counts calls.
pub(crate) struct FakeProvider {
    reply: Reply,
    calls: AtomicUsize,
    last_pair: Mutex<Option<(String, String)>>,
}

impl FakeProvider {
    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_pair: Mutex::new(None),
        }
    }

    pub(crate) fn ok(text: &str) -> Self {
        Self::with(Reply::Text(text.to_string()))
    }

    pub(crate) fn unavailable(msg: &str) -> Self {
        Self::with(Reply::Unavailable(msg.to_string()))
    }

    pub(crate) fn route_not_found(msg: &str) -> Self {
        Self::with(Reply::RouteNotFound(msg.to_string()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_pair(&self) -> Option<(String, String)> {
        self.last_pair.lock().unwrap().clone()
    }
}

#[async_trait]
impl DistanceProvider for FakeProvider {
    async fn fetch(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<ProviderDistance, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_pair.lock().unwrap() = Some((origin.to_string(), destination.to_string()));
        match &self.reply {
            Reply::Text(text) => Ok(ProviderDistance { text: text.clone() }),
            Reply::Unavailable(msg) => Err(ProviderError::Unavailable(msg.clone())),
            Reply::RouteNotFound(msg) => Err(ProviderError::RouteNotFound(msg.clone())),
        }
    }
}

/// Record store backed by a `Vec`, with switchable read and write failures.
#[derive(Default)]
pub(crate) struct MemoryStore {
    records: Mutex<Vec<DistanceRecord>>,
    writes: AtomicUsize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub(crate) fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub(crate) fn seed(&self, origin: &str, destination: &str, distance_text: &str) {
        self.push(origin, destination, distance_text);
    }

    /// Successful `create` calls; seeded records are not counted.
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn contains(&self, origin: &str, destination: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.origin == origin && r.destination == destination)
    }

    fn push(&self, origin: &str, destination: &str, distance_text: &str) -> DistanceRecord {
        let mut records = self.records.lock().unwrap();
        let record = DistanceRecord {
            id: i64::try_from(records.len()).unwrap() + 1,
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_text: distance_text.to_string(),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        record
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<DistanceRecord>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::ReadFailure("connection refused".to_string()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.origin == origin && r.destination == destination)
            .cloned())
    }

    async fn create(
        &self,
        origin: &str,
        destination: &str,
        distance_text: &str,
    ) -> Result<DistanceRecord, StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteFailure("disk full".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.push(origin, destination, distance_text))
    }
}
