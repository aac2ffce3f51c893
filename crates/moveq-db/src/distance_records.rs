//! Database operations for the `distance_records` table.

use chrono::{DateTime, Utc};
use moveq_core::DistanceRecord;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `distance_records` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DistanceRecordRow {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub distance_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<DistanceRecordRow> for DistanceRecord {
    fn from(row: DistanceRecordRow) -> Self {
        Self {
            id: row.id,
            origin: row.origin,
            destination: row.destination,
            distance_text: row.distance_text,
            created_at: row.created_at,
        }
    }
}

/// Returns the cached record for the exact `(origin, destination)` pair.
///
/// Matching is byte-for-byte on both columns. Duplicate rows for a pair are
/// possible (see the migration); the oldest one wins.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_distance_record(
    pool: &PgPool,
    origin: &str,
    destination: &str,
) -> Result<Option<DistanceRecordRow>, DbError> {
    let row = sqlx::query_as::<_, DistanceRecordRow>(
        "SELECT id, origin, destination, distance_text, created_at \
         FROM distance_records \
         WHERE origin = $1 AND destination = $2 \
         ORDER BY id ASC \
         LIMIT 1",
    )
    .bind(origin)
    .bind(destination)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a new record and returns it.
///
/// No conflict handling: callers check [`find_distance_record`] first and
/// tolerate the occasional duplicate from a racing writer.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including when any field
/// is empty (enforced by `CHECK` constraints).
pub async fn create_distance_record(
    pool: &PgPool,
    origin: &str,
    destination: &str,
    distance_text: &str,
) -> Result<DistanceRecordRow, DbError> {
    let row = sqlx::query_as::<_, DistanceRecordRow>(
        "INSERT INTO distance_records (origin, destination, distance_text) \
         VALUES ($1, $2, $3) \
         RETURNING id, origin, destination, distance_text, created_at",
    )
    .bind(origin)
    .bind(destination)
    .bind(distance_text)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the most recently created records, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_distance_records(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<DistanceRecordRow>, DbError> {
    let rows = sqlx::query_as::<_, DistanceRecordRow>(
        "SELECT id, origin, destination, distance_text, created_at \
         FROM distance_records \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
