//! Database migration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use floraops_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

/// Migration display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    /// Version
    version: i64,
    /// Description
    description: String,
    /// Applied state
    applied: String,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            floraops_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            let status = floraops_database::migration::migration_status(pool.pool()).await?;

            let rows: Vec<MigrationRow> = status
                .iter()
                .map(|m| MigrationRow {
                    version: m.version,
                    description: m.description.clone(),
                    applied: if m.applied { "applied" } else { "pending" }.to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
