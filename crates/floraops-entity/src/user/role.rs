//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available within an organization.
///
/// The first user of a new organization is always the `Owner`; everyone
/// else is invited staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Founder of the organization; manages staff and settings.
    Owner,
    /// Runs day-to-day operations, dispatches orders.
    Manager,
    /// Assembles bouquets and compositions.
    Florist,
    /// Delivers orders to customers.
    Courier,
}

impl UserRole {
    /// Check if this role is the organization owner.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Check if this role may invite, activate, or deactivate staff.
    pub fn can_manage_staff(&self) -> bool {
        self.is_owner()
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Florist => "florist",
            Self::Courier => "courier",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = floraops_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "florist" => Ok(Self::Florist),
            "courier" => Ok(Self::Courier),
            _ => Err(floraops_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: owner, manager, florist, courier"
            ))),
        }
    }
}
