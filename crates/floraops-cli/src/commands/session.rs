//! Session management CLI commands.

use clap::{Args, Subcommand};

use floraops_core::error::AppError;
use floraops_database::postgres::PostgresSessionStore;
use floraops_database::stores::SessionStore;

use crate::output;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Delete all expired sessions
    Purge,
}

/// Execute session commands
pub async fn execute(args: &SessionArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let store = PostgresSessionStore::new(pool.pool().clone());

    match &args.command {
        SessionCommand::Purge => {
            let purged = store.purge_expired().await?;
            output::print_success(&format!("Purged {purged} expired sessions"));
        }
    }

    Ok(())
}
