//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An issued login session.
///
/// One row per login; a user may hold several concurrent sessions
/// (multi-device). Only the SHA-256 digest of the bearer token is stored —
/// a leaked sessions table yields no usable tokens.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the bearer token, hex-encoded.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires. Expired rows are treated as absent.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to persist a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the bearer token, hex-encoded.
    pub token_hash: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}
