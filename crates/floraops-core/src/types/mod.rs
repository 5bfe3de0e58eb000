//! Core type definitions used across the FloraOps workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
