//! MySQL connection pool factory and migration runner for Libris.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Context;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tracing::instrument;

use libris_kernel::{settings::DatabaseSettings, Migration};

/// Table recording which module migrations have been applied.
pub const MIGRATIONS_TABLE: &str = "_libris_migrations";

/// Build connection options from settings.
pub fn connect_options(settings: &DatabaseSettings) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.username)
        .database(&settings.name);

    if settings.password.is_empty() {
        options
    } else {
        options.password(&settings.password)
    }
}

/// Open a pool and verify the server answers. Startup aborts if this fails.
#[instrument(skip(settings), fields(host = %settings.host, port = settings.port, database = %settings.name))]
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(connect_options(settings))
        .await
        .with_context(|| {
            format!(
                "failed to connect to MySQL at {}:{}/{}",
                settings.host, settings.port, settings.name
            )
        })?;

    ping(&pool).await?;
    tracing::info!("database connection established");

    Ok(pool)
}

/// Round-trip a trivial query through the pool.
pub async fn ping(pool: &MySqlPool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("database ping failed")?;
    Ok(())
}

/// Apply every migration not yet recorded, in the given order.
///
/// Returns the number of migrations applied by this call.
#[instrument(skip_all, fields(total = migrations.len()))]
pub async fn run_migrations(
    pool: &MySqlPool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<usize> {
    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS {MIGRATIONS_TABLE} (
            module VARCHAR(128) NOT NULL,
            id VARCHAR(128) NOT NULL,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (module, id)
        ) ENGINE=InnoDB"
    ))
    .execute(pool)
    .await
    .context("failed to create migrations table")?;

    let applied: HashSet<(String, String)> =
        sqlx::query(&format!("SELECT module, id FROM {MIGRATIONS_TABLE}"))
            .fetch_all(pool)
            .await
            .context("failed to read applied migrations")?
            .iter()
            .map(|row| Ok((row.try_get::<String, _>("module")?, row.try_get::<String, _>("id")?)))
            .collect::<Result<_, sqlx::Error>>()
            .context("failed to decode applied migrations")?;

    let todo = pending(&applied, migrations);
    for (module, migration) in &todo {
        tracing::info!(module = %module, migration = migration.id, "applying migration");

        sqlx::raw_sql(migration.up)
            .execute(pool)
            .await
            .with_context(|| format!("migration {}/{} failed", module, migration.id))?;

        sqlx::query(&format!(
            "INSERT INTO {MIGRATIONS_TABLE} (module, id) VALUES (?, ?)"
        ))
        .bind(module.as_str())
        .bind(migration.id)
        .execute(pool)
        .await
        .with_context(|| format!("failed to record migration {}/{}", module, migration.id))?;
    }

    tracing::info!(applied = todo.len(), "migrations complete");
    Ok(todo.len())
}

/// Migrations whose `(module, id)` pair is not in `applied`, order preserved.
pub fn pending<'a>(
    applied: &HashSet<(String, String)>,
    migrations: &'a [(String, Migration)],
) -> Vec<&'a (String, Migration)> {
    migrations
        .iter()
        .filter(|(module, migration)| !applied.contains(&(module.clone(), migration.id.to_string())))
        .collect()
}
