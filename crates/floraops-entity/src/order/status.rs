//! Order status enumeration and its transition table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order.
///
/// The permitted transitions form a single forward chain with a cancel
/// edge from every non-terminal state:
///
/// ```text
/// new -> in_work -> assembled -> on_delivery -> delivered
///   \        \          \            \
///    `--------`----------`------------`-> canceled
/// ```
///
/// `delivered` and `canceled` are terminal; no edge leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Just created, not yet picked up.
    New,
    /// A florist is assembling the order.
    InWork,
    /// Assembled and ready for the courier.
    Assembled,
    /// Handed to a courier, on its way.
    OnDelivery,
    /// Delivered to the customer.
    Delivered,
    /// Canceled before delivery.
    Canceled,
}

impl OrderStatus {
    /// Return the set of statuses this one may move to.
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            Self::New => &[Self::InWork, Self::Canceled],
            Self::InWork => &[Self::Assembled, Self::Canceled],
            Self::Assembled => &[Self::OnDelivery, Self::Canceled],
            Self::OnDelivery => &[Self::Delivered, Self::Canceled],
            Self::Delivered | Self::Canceled => &[],
        }
    }

    /// Check whether moving to `next` is a permitted transition.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InWork => "in_work",
            Self::Assembled => "assembled",
            Self::OnDelivery => "on_delivery",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }

    /// All statuses, in forward lifecycle order.
    pub fn all() -> &'static [OrderStatus] {
        &[
            Self::New,
            Self::InWork,
            Self::Assembled,
            Self::OnDelivery,
            Self::Delivered,
            Self::Canceled,
        ]
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = floraops_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "in_work" => Ok(Self::InWork),
            "assembled" => Ok(Self::Assembled),
            "on_delivery" => Ok(Self::OnDelivery),
            "delivered" => Ok(Self::Delivered),
            "canceled" => Ok(Self::Canceled),
            _ => Err(floraops_core::AppError::validation(format!(
                "Invalid order status: '{s}'. Expected one of: new, in_work, assembled, on_delivery, delivered, canceled"
            ))),
        }
    }
}
