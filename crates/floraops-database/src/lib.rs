//! # floraops-database
//!
//! Storage contracts for FloraOps and their two backends: PostgreSQL for
//! production and an in-memory map for tests. Callers depend only on the
//! traits in [`stores`], so the backends are substitutable without touching
//! service code.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use stores::{CredentialStore, OrderStore, SessionStore};
