//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod session;
pub mod user;

use clap::{Parser, Subcommand};

use floraops_core::config::AppConfig;
use floraops_core::error::AppError;
use floraops_database::DatabasePool;

use crate::output::OutputFormat;

/// FloraOps — Order management for flower shops
#[derive(Debug, Parser)]
#[command(name = "floraops", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads config/default.toml plus
    /// config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the FloraOps server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Session management
    Session(session::SessionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env, self.format).await,
            Commands::User(args) => user::execute(args, &self.env, self.format).await,
            Commands::Session(args) => session::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for the given environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: create a database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
