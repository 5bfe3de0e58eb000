//! Staff handlers — list, invite, activate/deactivate.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use floraops_core::error::AppError;
use floraops_core::types::pagination::PageResponse;
use floraops_service::staff::InviteStaff;

use crate::dto::request::{InviteStaffRequest, SetStaffActiveRequest};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/staff
pub async fn list_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = state
        .staff_service
        .list(auth.context(), &params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// POST /api/staff
pub async fn invite_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InviteStaffRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .staff_service
        .invite(
            auth.context(),
            InviteStaff {
                email: req.email,
                password: req.password,
                name: req.name,
                role: req.role,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// PATCH /api/staff/{id}/active
pub async fn set_staff_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStaffActiveRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .staff_service
        .set_active(auth.context(), id, req.is_active)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
