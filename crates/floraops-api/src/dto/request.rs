//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use floraops_entity::order::{OrderItem, OrderStatus};
use floraops_entity::user::UserRole;

/// Registration request body: a new organization with its owner.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Owner email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Owner password. The exact minimum is enforced by the session
    /// manager from configuration.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Owner display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Organization name.
    #[validate(length(min = 1, max = 255))]
    pub organization_name: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create order request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    /// Customer display name.
    #[validate(length(min = 1, max = 255))]
    pub customer_name: String,
    /// Customer contact phone.
    pub customer_phone: Option<String>,
    /// Delivery address.
    pub delivery_address: Option<String>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Update order details request. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    /// New customer name.
    pub customer_name: Option<String>,
    /// New contact phone.
    pub customer_phone: Option<String>,
    /// New delivery address.
    pub delivery_address: Option<String>,
}

/// Order status transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionOrderRequest {
    /// Target status.
    pub status: OrderStatus,
}

/// Query parameters for listing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListQuery {
    /// Optional status filter.
    pub status: Option<OrderStatus>,
}

/// Invite staff request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteStaffRequest {
    /// Email address of the new user.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Activate/deactivate staff request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStaffActiveRequest {
    /// Target active state.
    pub is_active: bool,
}
