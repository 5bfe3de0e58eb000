//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user bound to one organization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// The organization this user belongs to. Never changes.
    pub organization_id: Uuid,
    /// Email address, stored lowercased, unique across the system.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub name: String,
    /// User role within the organization.
    pub role: UserRole,
    /// Whether the account may authenticate. Deactivation blocks login
    /// and invalidates existing sessions without deleting any history.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// The organization to bind the user to.
    pub organization_id: Uuid,
    /// Email address; callers must lowercase it first.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: UserRole,
}
