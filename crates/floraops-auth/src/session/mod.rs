//! Session lifecycle.

pub mod manager;

pub use manager::{AuthSession, LoginResult, SessionManager};
