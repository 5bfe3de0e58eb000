//! Auth handlers — register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use validator::Validate;

use floraops_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MeResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::auth::bearer_token;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .session_manager
        .register(&req.email, &req.password, &req.name, &req.organization_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthResponse::from(result))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state.session_manager.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse::from(result))))
}

/// POST /api/auth/logout
///
/// Revokes the presented token. Deliberately does not validate the
/// session first: logging out an already-dead token is a no-op, so the
/// call is idempotent.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers)?;
    state.session_manager.logout(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<MeResponse>> {
    let ctx = auth.0;
    Json(ApiResponse::ok(MeResponse {
        user: ctx.user.into(),
        organization: ctx.organization.into(),
    }))
}
