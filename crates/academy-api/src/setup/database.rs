//! Database setup and initialization

use academy_core::Config;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::time::Duration;

const DB_IDLE_TIMEOUT_SECS: u64 = 600;
const DB_MAX_LIFETIME_SECS: u64 = 1800;

/// Connect a Postgres pool sized from config and bring the academy schema up
/// to date. The enum types (`review_stage`, `enrollment_status`, ...) live in
/// the migrations, so nothing else may touch the database before this runs.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(DB_IDLE_TIMEOUT_SECS))
        .max_lifetime(Duration::from_secs(DB_MAX_LIFETIME_SECS))
        .connect(config.database_url())
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply pending migrations from the workspace `migrations/` directory.
async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    let known = migrator.iter().count();
    migrator
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!(migrations = known, "Database schema up to date");
    Ok(())
}
