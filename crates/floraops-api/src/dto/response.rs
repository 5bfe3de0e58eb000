//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use floraops_auth::session::LoginResult;
use floraops_entity::order::{Order, OrderItem, OrderStatus};
use floraops_entity::organization::Organization;
use floraops_entity::user::{User, UserRole};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self { data }
    }
}

/// User summary for responses. The password hash never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Organization ID.
    pub organization_id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: UserRole,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            organization_id: user.organization_id,
            email: user.email,
            name: user.name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Organization summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    /// Organization ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            created_at: organization.created_at,
        }
    }
}

/// Successful registration or login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The raw bearer token. This is the only time the client sees it.
    pub token: String,
    /// The authenticated user.
    pub user: UserResponse,
    /// The user's organization.
    pub organization: OrganizationResponse,
}

impl From<LoginResult> for AuthResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            user: result.user.into(),
            organization: result.organization.into(),
        }
    }
}

/// Current-user response for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The authenticated user.
    pub user: UserResponse,
    /// The user's organization.
    pub organization: OrganizationResponse,
}

/// Order representation for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order ID.
    pub id: Uuid,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact phone.
    pub customer_phone: Option<String>,
    /// Delivery address.
    pub delivery_address: Option<String>,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Total price in the smallest currency unit.
    pub total_cents: i64,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total_cents = order.total_cents();
        Self {
            id: order.id,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            delivery_address: order.delivery_address,
            items: order.items.0,
            status: order.status,
            total_cents,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Readiness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall status.
    pub status: String,
    /// Storage backend state.
    pub database: String,
}
