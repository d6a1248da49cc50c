//! Administrative seeding of the transactions store from the remote fixture.
//!
//! Two explicit modes: `reseed` wipes and reloads unconditionally (the
//! `/initialize-database` endpoint), `seed_if_empty` is idempotent and only
//! writes when the table has no rows (the `db seed` CLI command). Both abort
//! before touching the store if the fixture cannot be fetched, and both run
//! their writes inside a single database transaction.

use sqlx::PgPool;

use crate::db::queries;
use crate::error::AppError;
use crate::fixture::FixtureClient;

/// Wipes all rows and reloads the fixture. Returns the number of records
/// inserted.
pub async fn reseed(pool: &PgPool, fixture: &FixtureClient) -> Result<usize, AppError> {
    let records = fixture.fetch().await?;
    tracing::info!(count = records.len(), url = %fixture.url(), "fixture fetched");

    let mut tx = pool.begin().await?;
    queries::delete_all(&mut tx).await?;
    queries::insert_batch(&mut tx, &records).await?;
    tx.commit().await?;

    tracing::info!(inserted = records.len(), "store reseeded");
    Ok(records.len())
}

/// Seeds only when the store is empty. Returns `None` when existing data was
/// left untouched.
pub async fn seed_if_empty(
    pool: &PgPool,
    fixture: &FixtureClient,
) -> Result<Option<usize>, AppError> {
    let existing = queries::count_all(pool).await?;
    if existing > 0 {
        tracing::info!(existing, "store already seeded, skipping");
        return Ok(None);
    }

    let records = fixture.fetch().await?;

    let mut tx = pool.begin().await?;
    queries::insert_batch(&mut tx, &records).await?;
    tx.commit().await?;

    tracing::info!(inserted = records.len(), "store seeded");
    Ok(Some(records.len()))
}
