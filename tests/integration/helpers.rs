//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use floraops_auth::password::PasswordHasher;
use floraops_auth::session::manager::SessionManager;
use floraops_core::config::AppConfig;
use floraops_core::config::app::ServerConfig;
use floraops_core::config::auth::AuthConfig;
use floraops_core::config::database::DatabaseConfig;
use floraops_core::config::logging::LoggingConfig;
use floraops_database::MemoryStore;
use floraops_database::stores::{CredentialStore, OrderStore, SessionStore};
use floraops_service::order::service::OrderService;
use floraops_service::staff::service::StaffService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The storage backend, for direct assertions
    pub store: Arc<MemoryStore>,
}

/// Configuration for tests: in-memory storage, cheap Argon2 parameters.
fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused-in-tests".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: AuthConfig {
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..AuthConfig::default()
        },
        logging: LoggingConfig::default(),
    }
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store.
    pub fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::new());

        let password_hasher =
            Arc::new(PasswordHasher::new(&config.auth).expect("Failed to build password hasher"));
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&store) as Arc<dyn CredentialStore>,
            Arc::clone(&store) as Arc<dyn SessionStore>,
            Arc::clone(&password_hasher),
            config.auth.clone(),
        ));
        let order_service = Arc::new(OrderService::new(
            Arc::clone(&store) as Arc<dyn OrderStore>,
        ));
        let staff_service = Arc::new(StaffService::new(
            Arc::clone(&store) as Arc<dyn CredentialStore>,
            Arc::clone(&password_hasher),
            config.auth.clone(),
        ));

        let state = floraops_api::state::AppState {
            config: Arc::new(config),
            db_pool: None,
            session_manager,
            order_service,
            staff_service,
        };

        Self {
            router: floraops_api::build_app(state),
            store,
        }
    }

    /// Register a new organization and return the owner's bearer token.
    pub async fn register(&self, email: &str, organization: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "password": "Passw0rd1",
                    "name": "Alice",
                    "organization_name": organization,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in registration response")
            .to_string()
    }

    /// Login and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Create an order and return its id.
    pub async fn create_order(&self, token: &str, customer: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/orders",
                Some(serde_json::json!({
                    "customer_name": customer,
                    "delivery_address": "1 Rose Lane",
                    "items": [
                        { "name": "Peony bouquet", "quantity": 1, "price_cents": 4500 },
                    ],
                })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Order creation failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .expect("No id in order response")
            .to_string()
    }

    /// Request an order status transition.
    pub async fn transition(&self, token: &str, order_id: &str, status: &str) -> TestResponse {
        self.request(
            "PATCH",
            &format!("/api/orders/{order_id}/status"),
            Some(serde_json::json!({ "status": status })),
            Some(token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` for empty bodies)
    pub body: Value,
}
