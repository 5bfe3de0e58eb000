//! Staff management: inviting users and toggling their active flag.
//!
//! Every operation is gated on the owner role and scoped to the caller's
//! organization. A role violation is `Forbidden` (the caller is known,
//! just not allowed), unlike the `Unauthenticated` of a missing session.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use floraops_auth::password::PasswordHasher;
use floraops_core::config::auth::AuthConfig;
use floraops_core::error::AppError;
use floraops_core::result::AppResult;
use floraops_core::types::pagination::{PageRequest, PageResponse};
use floraops_database::stores::CredentialStore;
use floraops_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Data for inviting a staff member into the caller's organization.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InviteStaff {
    /// Email address of the new user.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Assigned role; `owner` is not invitable.
    pub role: UserRole,
}

/// Handles staff listing and management.
#[derive(Clone)]
pub struct StaffService {
    /// Organization and user persistence.
    credentials: Arc<dyn CredentialStore>,
    /// Password hasher for invited users' initial passwords.
    password_hasher: Arc<PasswordHasher>,
    /// Auth configuration (password policy).
    config: AuthConfig,
}

impl std::fmt::Debug for StaffService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffService")
            .field("config", &self.config)
            .finish()
    }
}

impl StaffService {
    /// Creates a new staff service.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        password_hasher: Arc<PasswordHasher>,
        config: AuthConfig,
    ) -> Self {
        Self {
            credentials,
            password_hasher,
            config,
        }
    }

    /// Lists the organization's users, newest first. Visible to every
    /// role; the staff roster is not sensitive within a tenant.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.credentials.list_users(ctx.organization_id(), page).await
    }

    /// Invites a new staff member into the caller's organization.
    pub async fn invite(&self, ctx: &RequestContext, data: InviteStaff) -> AppResult<User> {
        if !ctx.can_manage_staff() {
            return Err(AppError::forbidden("Only the owner may manage staff"));
        }
        if data.role == UserRole::Owner {
            return Err(AppError::validation(
                "An organization has a single owner; invite staff roles only",
            ));
        }
        if data.password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        let password_hash = self.password_hasher.hash_password(&data.password)?;

        // The store raises DuplicateEmail on a taken address.
        let user = self
            .credentials
            .create_user(&CreateUser {
                organization_id: ctx.organization_id(),
                email: data.email.to_lowercase(),
                password_hash,
                name: data.name,
                role: data.role,
            })
            .await?;

        info!(
            user_id = %user.id,
            organization_id = %user.organization_id,
            role = %user.role,
            "Staff member invited"
        );
        Ok(user)
    }

    /// Activates or deactivates a staff member.
    ///
    /// Deactivation blocks login and invalidates the user's sessions at
    /// their next validation; no session rows are deleted and no history
    /// is lost. A user outside the caller's organization reads as missing.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        is_active: bool,
    ) -> AppResult<User> {
        if !ctx.can_manage_staff() {
            return Err(AppError::forbidden("Only the owner may manage staff"));
        }
        // A locked-out organization has no recovery path, so owners
        // cannot deactivate themselves.
        if user_id == ctx.user.id && !is_active {
            return Err(AppError::validation(
                "Owners cannot deactivate their own account",
            ));
        }

        let user = self
            .credentials
            .set_user_active(ctx.organization_id(), user_id, is_active)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user.id, is_active, "Staff active flag changed");
        Ok(user)
    }
}
