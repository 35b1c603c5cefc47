//! SQLite connection pool and migration runner.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use bookstall_kernel::settings::DatabaseSettings;
use bookstall_kernel::Migration;

/// Establish the SQLite connection pool from settings.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to '{}'", settings.url))?;

    tracing::info!(url = %settings.url, "database pool established");

    Ok(pool)
}

/// Apply module-contributed migrations that have not run yet.
///
/// Applied migrations are tracked in a `_migrations` table keyed by
/// (module, id), so repeated startups are no-ops.
pub async fn apply_migrations(
    pool: &SqlitePool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            module TEXT NOT NULL,
            id TEXT NOT NULL,
            PRIMARY KEY (module, id)
        )",
    )
    .execute(pool)
    .await
    .context("failed to create migration tracking table")?;

    for (module, migration) in migrations {
        let applied: Option<(String,)> =
            sqlx::query_as("SELECT id FROM _migrations WHERE module = ?1 AND id = ?2")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(pool)
                .await
                .context("failed to read migration state")?;

        if applied.is_some() {
            continue;
        }

        sqlx::raw_sql(migration.up)
            .execute(pool)
            .await
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;

        sqlx::query("INSERT INTO _migrations (module, id) VALUES (?1, ?2)")
            .bind(module)
            .bind(migration.id)
            .execute(pool)
            .await
            .context("failed to record applied migration")?;

        tracing::info!(module = %module, id = migration.id, "applied migration");
    }

    Ok(())
}
