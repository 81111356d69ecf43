//! GoCache Core Library
//!
//! Shared types and the REST API contract for talking to a GoCache server.
//! This crate holds no I/O; the `gocachectl` client builds on it.

pub mod api;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use api::*;
pub use error::*;
pub use types::*;
