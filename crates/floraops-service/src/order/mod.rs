//! Order operations.

pub mod service;

pub use service::{NewOrder, OrderService};
