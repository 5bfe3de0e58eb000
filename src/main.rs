//! FloraOps Server — order management backend for flower shops.
//!
//! Main entry point: loads configuration, initializes logging, connects
//! to the database, applies migrations, and starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use floraops_core::config::AppConfig;
use floraops_core::error::AppError;
use floraops_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `FLORAOPS_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FLORAOPS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect, migrate, and run the server until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FloraOps v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = DatabasePool::connect(&config.database).await?;

    floraops_database::migration::run_migrations(db_pool.pool()).await?;

    floraops_api::run_server(config, db_pool).await
}
