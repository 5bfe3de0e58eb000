//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates the session, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use floraops_core::error::AppError;
use floraops_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pulls the raw token out of an `Authorization: Bearer <token>` header.
///
/// A missing or malformed header reads the same as an invalid token, so
/// the response never distinguishes "no credentials" from "bad
/// credentials".
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthenticated("Invalid or expired session"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        // Validate the session; resolves user and organization in one go.
        let auth_session = state.session_manager.validate_session(token).await?;

        Ok(AuthUser(RequestContext::from(auth_session)))
    }
}
