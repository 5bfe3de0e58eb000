//! PostgreSQL implementations of the storage contracts.

pub mod credential;
pub mod order;
pub mod session;

pub use credential::PostgresCredentialStore;
pub use order::PostgresOrderStore;
pub use session::PostgresSessionStore;
