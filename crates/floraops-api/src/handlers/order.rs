//! Order handlers — create, list, fetch, update, status transitions.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use floraops_core::error::AppError;
use floraops_core::types::pagination::PageResponse;
use floraops_entity::order::UpdateOrderDetails;
use floraops_service::order::NewOrder;

use crate::dto::request::{
    CreateOrderRequest, OrderListQuery, TransitionOrderRequest, UpdateOrderRequest,
};
use crate::dto::response::{ApiResponse, OrderResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = state
        .order_service
        .create(
            auth.context(),
            NewOrder {
                customer_name: req.customer_name,
                customer_phone: req.customer_phone,
                delivery_address: req.delivery_address,
                items: req.items,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(OrderResponse::from(order))),
    ))
}

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<OrderListQuery>,
) -> Result<Json<ApiResponse<PageResponse<OrderResponse>>>, ApiError> {
    let page = state
        .order_service
        .list(auth.context(), filter.status, &params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.map(OrderResponse::from))))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let order = state.order_service.get(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(OrderResponse::from(order))))
}

/// PATCH /api/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let order = state
        .order_service
        .update_details(
            auth.context(),
            id,
            UpdateOrderDetails {
                customer_name: req.customer_name,
                customer_phone: req.customer_phone,
                delivery_address: req.delivery_address,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(OrderResponse::from(order))))
}

/// PATCH /api/orders/{id}/status
pub async fn transition_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<TransitionOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let order = state
        .order_service
        .transition(auth.context(), id, req.status)
        .await?;

    Ok(Json(ApiResponse::ok(OrderResponse::from(order))))
}
