//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use floraops_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// A known migration and whether it has been applied.
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Migration version (numeric prefix of the file name).
    pub version: i64,
    /// Human-readable description.
    pub description: String,
    /// Whether this migration has been applied to the database.
    pub applied: bool,
}

/// Lists all known migrations with their applied state.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationStatus>, AppError> {
    // The bookkeeping table does not exist before the first run; that
    // simply means nothing is applied yet.
    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations ORDER BY version")
            .fetch_all(pool)
            .await
            .unwrap_or_default();

    Ok(sqlx::migrate!("../../migrations")
        .iter()
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}
