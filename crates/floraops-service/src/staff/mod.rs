//! Staff management operations.

pub mod service;

pub use service::{InviteStaff, StaffService};
