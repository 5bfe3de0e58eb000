//! Health check handlers.

use axum::Json;
use axum::extract::State;

use floraops_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse, ReadinessResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/ready
///
/// Pings the storage backend. Fails with 503 when the database does not
/// answer, so orchestrators stop routing traffic here.
pub async fn readiness(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReadinessResponse>>, ApiError> {
    let database = match &state.db_pool {
        Some(pool) => {
            if !pool.health_check().await? {
                return Err(AppError::database("Database ping returned an unexpected value").into());
            }
            "connected"
        }
        None => "memory",
    };

    Ok(Json(ApiResponse::ok(ReadinessResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    })))
}
