//! Order line item value object.

use serde::{Deserialize, Serialize};

/// A single line item of an order, stored as part of the order's JSON
/// `items` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product or composition name.
    pub name: String,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price in the smallest currency unit.
    pub price_cents: i64,
}

impl OrderItem {
    /// Total price of this line in the smallest currency unit.
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents * i64::from(self.quantity)
    }
}
