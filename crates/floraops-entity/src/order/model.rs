//! Order entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::item::OrderItem;
use super::status::OrderStatus;

/// A customer order belonging to one organization.
///
/// `organization_id` is set at creation and never changes; every read and
/// write of an order is filtered by it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// Unique order identifier (UUIDv7, so ids sort by creation time).
    pub id: Uuid,
    /// The owning organization. Never changes.
    pub organization_id: Uuid,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact phone.
    pub customer_phone: Option<String>,
    /// Delivery address, if the order is delivered.
    pub delivery_address: Option<String>,
    /// Line items, stored as a JSON column.
    pub items: Json<Vec<OrderItem>>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Total order price in the smallest currency unit.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total_cents).sum()
    }
}

/// Data required to create a new order. Status always starts at `new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    /// The owning organization, resolved from the caller's session.
    pub organization_id: Uuid,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact phone.
    pub customer_phone: Option<String>,
    /// Delivery address.
    pub delivery_address: Option<String>,
    /// Line items.
    pub items: Vec<OrderItem>,
}

/// Fields of an order that may be updated after creation.
///
/// These are plain last-write-wins fields; only the status column has
/// transition rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderDetails {
    /// New customer name, if changing.
    pub customer_name: Option<String>,
    /// New contact phone, if changing.
    pub customer_phone: Option<String>,
    /// New delivery address, if changing.
    pub delivery_address: Option<String>,
}
