//! `distance` and `records` command handlers.

use moveq_core::{round_money, DistanceRecord};
use moveq_quote::{DistanceResolver, DistanceSource};

/// Resolve one pair and print the result.
///
/// # Errors
///
/// Returns an error if the distance cannot be resolved.
pub(crate) async fn run_distance(
    resolver: &DistanceResolver,
    origin: &str,
    destination: &str,
) -> anyhow::Result<()> {
    let resolved = resolver.resolve(origin, destination).await?;
    let source = match resolved.source {
        DistanceSource::Cache => "cache",
        DistanceSource::Provider => "provider",
    };
    println!(
        "{origin} -> {destination}: {} mi ({}, from {source})",
        round_money(resolved.miles),
        resolved.text
    );
    Ok(())
}

/// Print the most recent cached distances.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_records(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let rows = moveq_db::list_recent_distance_records(pool, limit.clamp(1, 500)).await?;
    if rows.is_empty() {
        println!("no cached distances");
        return Ok(());
    }

    for row in rows {
        println!("{}", format_record(&DistanceRecord::from(row)));
    }
    Ok(())
}

pub(crate) fn format_record(record: &DistanceRecord) -> String {
    format!(
        "#{:<6} {}  {} -> {}  {}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.origin,
        record.destination,
        record.distance_text
    )
}
