//! Application builder — wires router + middleware + state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use floraops_auth::password::PasswordHasher;
use floraops_auth::session::manager::SessionManager;
use floraops_core::config::AppConfig;
use floraops_core::error::AppError;
use floraops_database::DatabasePool;
use floraops_database::postgres::{
    PostgresCredentialStore, PostgresOrderStore, PostgresSessionStore,
};
use floraops_database::stores::{CredentialStore, OrderStore, SessionStore};
use floraops_service::order::service::OrderService;
use floraops_service::staff::service::StaffService;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = build_cors_layer(&server.cors);
    let timeout = TimeoutLayer::new(Duration::from_secs(server.request_timeout_seconds));
    let body_limit = DefaultBodyLimit::max(server.max_body_bytes);

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(timeout)
        .layer(body_limit)
}

/// Runs the FloraOps server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting FloraOps server...");

    // ── Step 1: Initialize stores ────────────────────────────────
    let credentials: Arc<dyn CredentialStore> =
        Arc::new(PostgresCredentialStore::new(db_pool.pool().clone()));
    let sessions: Arc<dyn SessionStore> =
        Arc::new(PostgresSessionStore::new(db_pool.pool().clone()));
    let orders: Arc<dyn OrderStore> = Arc::new(PostgresOrderStore::new(db_pool.pool().clone()));

    // ── Step 2: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&credentials),
        Arc::clone(&sessions),
        Arc::clone(&password_hasher),
        config.auth.clone(),
    ));

    // ── Step 3: Initialize services ──────────────────────────────
    let order_service = Arc::new(OrderService::new(Arc::clone(&orders)));
    let staff_service = Arc::new(StaffService::new(
        Arc::clone(&credentials),
        Arc::clone(&password_hasher),
        config.auth.clone(),
    ));

    // ── Step 4: Shutdown channel & session purge sweep ───────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    spawn_purge_sweep(
        Arc::clone(&session_manager),
        config.auth.purge_interval_hours,
        shutdown_rx,
    );

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState {
        config: Arc::new(config),
        db_pool: Some(db_pool),
        session_manager,
        order_service,
        staff_service,
    };

    let app = build_app(app_state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FloraOps server listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

/// Spawns the periodic expired-session sweep.
///
/// Expiry is enforced at validation time regardless; this task only
/// bounds table growth. The first tick fires immediately so stale rows
/// from before a restart are cleared at boot.
fn spawn_purge_sweep(
    session_manager: Arc<SessionManager>,
    interval_hours: u64,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_hours * 3600));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = session_manager.purge_expired().await {
                        tracing::warn!(error = %e, "Session purge sweep failed");
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
