//! Session lifecycle manager: register, login, validate, logout flows.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use floraops_core::config::auth::AuthConfig;
use floraops_core::error::AppError;
use floraops_core::result::AppResult;
use floraops_database::stores::{CredentialStore, SessionStore};
use floraops_entity::organization::Organization;
use floraops_entity::session::{CreateSession, Session};
use floraops_entity::user::{CreateUser, User, UserRole};

use crate::password::PasswordHasher;
use crate::token;

/// Result of a successful registration or login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// The user's organization.
    pub organization: Organization,
    /// The raw bearer token. Shown to the client exactly once; only its
    /// digest is stored.
    pub token: String,
}

/// A validated session: the acting user, the session row, and the
/// organization every subsequent data access is scoped to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The acting user.
    pub user: User,
    /// The session the request presented.
    pub session: Session,
    /// The organization resolved from the user, never from client input.
    pub organization: Organization,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// Organization and user persistence.
    credentials: Arc<dyn CredentialStore>,
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Auth configuration.
    config: AuthConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with its storage dependencies.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        password_hasher: Arc<PasswordHasher>,
        config: AuthConfig,
    ) -> Self {
        Self {
            credentials,
            sessions,
            password_hasher,
            config,
        }
    }

    /// Registers a new organization with its first user:
    ///
    /// 1. Validate the password length
    /// 2. Reject an already-registered email
    /// 3. Hash the password
    /// 4. Create the organization
    /// 5. Create the owner user; on failure delete the organization again
    /// 6. Issue a session
    ///
    /// The compensating delete in step 5 keeps organization and owner a
    /// single logical unit: no organization ever exists without one.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        organization_name: &str,
    ) -> AppResult<LoginResult> {
        // Step 1: Password policy
        if password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        // Step 2: Duplicate email check. The unique constraint still backs
        // this up if two registrations race past the check.
        let email = email.to_lowercase();
        if self.credentials.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::duplicate_email(format!(
                "Email '{email}' is already registered"
            )));
        }

        // Step 3: Hash the password
        let password_hash = self.password_hasher.hash_password(password)?;

        // Step 4: Create the organization
        let organization = self.credentials.create_organization(organization_name).await?;

        // Step 5: Create the owner; compensate on failure
        let user = match self
            .credentials
            .create_user(&CreateUser {
                organization_id: organization.id,
                email,
                password_hash,
                name: name.to_string(),
                role: UserRole::Owner,
            })
            .await
        {
            Ok(user) => user,
            Err(err) => {
                if let Err(cleanup_err) = self.credentials.delete_organization(organization.id).await
                {
                    warn!(
                        organization_id = %organization.id,
                        error = %cleanup_err,
                        "Failed to delete organization after owner creation failed"
                    );
                }
                return Err(err);
            }
        };

        // Step 6: Issue a session
        let (raw_token, _session) = self.create_session(user.id).await?;

        info!(
            user_id = %user.id,
            organization_id = %organization.id,
            "Registered new organization"
        );

        Ok(LoginResult {
            user,
            organization,
            token: raw_token,
        })
    }

    /// Performs the login flow:
    ///
    /// 1. Look up the user by email
    /// 2. Verify the password
    /// 3. Check the active flag
    /// 4. Issue a session
    ///
    /// Unknown email and wrong password produce the same error, so the
    /// response never confirms whether an email is registered. The active
    /// flag is checked only after the password verified: a deactivated
    /// account does not leak password correctness either.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        // Step 1: Find user. Storage errors pass through as-is; they must
        // never read as a credential failure.
        let Some(user) = self.credentials.find_user_by_email(email).await? else {
            return Err(AppError::invalid_credentials());
        };

        // Step 2: Verify password
        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        // Step 3: Active flag, only after the password verified
        if !user.is_active {
            warn!(user_id = %user.id, "Login rejected: account deactivated");
            return Err(AppError::account_deactivated());
        }

        // Step 4: Issue a session
        let organization = self
            .credentials
            .find_organization(user.organization_id)
            .await?
            .ok_or_else(|| AppError::internal("User's organization is missing"))?;

        let (raw_token, _session) = self.create_session(user.id).await?;

        info!(user_id = %user.id, "Login successful");

        Ok(LoginResult {
            user,
            organization,
            token: raw_token,
        })
    }

    /// Generates a fresh opaque token and persists its digest with a fixed
    /// expiry of now plus the configured TTL. Returns the raw token and
    /// the stored row.
    pub async fn create_session(&self, user_id: Uuid) -> AppResult<(String, Session)> {
        let raw_token = token::generate_token();
        let expires_at = Utc::now() + Duration::days(self.config.session_ttl_days);

        let session = self
            .sessions
            .create_session(&CreateSession {
                user_id,
                token_hash: token::hash_token(&raw_token),
                expires_at,
            })
            .await?;

        Ok((raw_token, session))
    }

    /// Resolves a presented bearer token to its user and organization.
    ///
    /// This is the single choke point every authenticated request passes
    /// through. All failure modes (unknown token, expired session, deleted
    /// or deactivated user, missing organization) collapse into one
    /// indistinguishable `Unauthenticated` error.
    pub async fn validate_session(&self, raw_token: &str) -> AppResult<AuthSession> {
        let denied = || AppError::unauthenticated("Invalid or expired session");

        let session = self
            .sessions
            .find_by_token_hash(&token::hash_token(raw_token))
            .await?
            .ok_or_else(denied)?;

        // Lazy expiry: the row may still exist, it just no longer counts.
        if session.is_expired() {
            return Err(denied());
        }

        let user = self
            .credentials
            .find_user_by_id(session.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(denied)?;

        let organization = self
            .credentials
            .find_organization(user.organization_id)
            .await?
            .ok_or_else(denied)?;

        Ok(AuthSession {
            user,
            session,
            organization,
        })
    }

    /// Revokes the session behind a token. Idempotent: logging out an
    /// unknown or already-deleted token is not an error.
    pub async fn logout(&self, raw_token: &str) -> AppResult<()> {
        let removed = self
            .sessions
            .delete_by_token_hash(&token::hash_token(raw_token))
            .await?;

        if removed {
            info!("Session revoked");
        }
        Ok(())
    }

    /// Deletes expired session rows. Correctness never depends on this;
    /// expiry is enforced at validation time. The sweep only bounds table
    /// growth.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let purged = self.sessions.purge_expired().await?;
        if purged > 0 {
            info!(purged, "Purged expired sessions");
        }
        Ok(purged)
    }
}
