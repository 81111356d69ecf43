//! GoCache CLI Library
//!
//! This library provides the core functionality for the `gocachectl` tool.
//!
//! # Public API
//!
//! The primary public API is the [`client::CacheClient`], which owns a
//! [`session::Session`] and turns cache operations into HTTP requests.
//! Interactive input goes through the [`prompt::Prompt`] trait, so the client
//! does not depend on any terminal library.
//!
//! ```no_run
//! use gocachectl::client::CacheClient;
//! use gocachectl::session::Session;
//!
//! # async fn example() -> gocache_core::Result<()> {
//! let client = CacheClient::new(Session::new("localhost:8081", "admin", "secret"))?;
//!
//! let args = vec!["list".to_string(), "colors".to_string(), r#"["red"]"#.to_string()];
//! let reply = client.set_value(&args).await?;
//! println!("{}", reply.body);
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for communicating with a GoCache server.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Line and secret input.
pub mod prompt;

/// Host and credentials of the running client.
pub mod session;

#[cfg(test)]
pub mod test_utils;
