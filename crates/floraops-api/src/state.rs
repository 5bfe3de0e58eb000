//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use floraops_auth::session::manager::SessionManager;
use floraops_core::config::AppConfig;
use floraops_database::DatabasePool;
use floraops_service::order::service::OrderService;
use floraops_service::staff::service::StaffService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool. `None` when running against the
    /// in-memory backend, which is what the test harness does.
    pub db_pool: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Order service
    pub order_service: Arc<OrderService>,
    /// Staff management service
    pub staff_service: Arc<StaffService>,
}
