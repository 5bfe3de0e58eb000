//! Organization entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tenant organization.
///
/// Every user and order belongs to exactly one organization; the
/// organization id is the isolation boundary for all data access.
/// Organizations are created at registration and are immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    /// Unique organization identifier.
    pub id: Uuid,
    /// Display name of the shop or business.
    pub name: String,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
}
