//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use floraops_core::error::AppError;
use floraops_core::types::pagination::PageRequest;
use floraops_database::postgres::PostgresCredentialStore;
use floraops_database::stores::CredentialStore;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List the users of an organization
    List {
        /// Organization ID
        organization_id: Uuid,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u64,
    },
    /// Reactivate a user account
    Activate {
        /// Email address
        email: String,
    },
    /// Deactivate a user account (blocks login, keeps history)
    Deactivate {
        /// Email address
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Role
    role: String,
    /// Active state
    active: String,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let store = PostgresCredentialStore::new(pool.pool().clone());

    match &args.command {
        UserCommand::List {
            organization_id,
            page,
        } => {
            let page = store
                .list_users(
                    *organization_id,
                    &PageRequest {
                        page: (*page).max(1),
                        page_size: 50,
                    },
                )
                .await?;

            let rows: Vec<UserRow> = page
                .items
                .iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    email: u.email.clone(),
                    name: u.name.clone(),
                    role: u.role.to_string(),
                    active: if u.is_active { "yes" } else { "no" }.to_string(),
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Activate { email } => {
            set_active(&store, email, true).await?;
            output::print_success(&format!("User '{email}' activated"));
        }
        UserCommand::Deactivate { email } => {
            set_active(&store, email, false).await?;
            output::print_success(&format!("User '{email}' deactivated"));
        }
    }

    Ok(())
}

async fn set_active(
    store: &PostgresCredentialStore,
    email: &str,
    is_active: bool,
) -> Result<(), AppError> {
    let user = store
        .find_user_by_email(&email.to_lowercase())
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

    store
        .set_user_active(user.organization_id, user.id, is_active)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

    Ok(())
}
