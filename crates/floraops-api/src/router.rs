//! Route definitions for the FloraOps HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

/// Builds the bare router with every route mounted under `/api`.
///
/// Middleware layers are applied by [`crate::app::build_app`] so the
/// route table stays readable on its own.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(order_routes())
        .merge(staff_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Auth endpoints: register, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Order CRUD and status transitions
fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            get(handlers::order::list_orders).post(handlers::order::create_order),
        )
        .route(
            "/orders/{id}",
            get(handlers::order::get_order).patch(handlers::order::update_order),
        )
        .route(
            "/orders/{id}/status",
            patch(handlers::order::transition_order),
        )
}

/// Staff management endpoints
fn staff_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/staff",
            get(handlers::staff::list_staff).post(handlers::staff::invite_staff),
        )
        .route(
            "/staff/{id}/active",
            patch(handlers::staff::set_staff_active),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::readiness))
}
