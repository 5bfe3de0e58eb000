//! # floraops-service
//!
//! Business logic for FloraOps. Services receive a [`context::RequestContext`]
//! resolved by the API layer's auth extractor and scope every storage call
//! to the context's organization; a client-supplied organization id is
//! never accepted.

pub mod context;
pub mod order;
pub mod staff;

pub use context::RequestContext;
