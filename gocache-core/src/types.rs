//! Core types for GoCache clients

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CacheError;

/// Host used when neither config nor flags name one.
pub const DEFAULT_HOST: &str = "localhost:8081";

/// Scheme prepended to hosts given without one.
pub const DEFAULT_SCHEME: &str = "http://";

/// Kind of value stored under a cache key.
///
/// The server keeps a separate store per kind, so the kind is part of the
/// `set` path rather than the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Plain string value
    String,
    /// JSON array value
    List,
    /// JSON object value
    Dictionary,
}

impl ValueType {
    /// All value types, in the order they are listed to users.
    pub const ALL: [ValueType; 3] = [ValueType::String, ValueType::List, ValueType::Dictionary];

    /// Path segment used by the server for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Dictionary => "dictionary",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ValueType::String),
            "list" => Ok(ValueType::List),
            "dictionary" => Ok(ValueType::Dictionary),
            other => Err(CacheError::InvalidValueType(other.to_string())),
        }
    }
}

/// Turn a user supplied host into a base URL.
///
/// `localhost:8081` becomes `http://localhost:8081`; URLs that already carry
/// an http(s) scheme are kept. Trailing slashes are dropped so paths can be
/// appended directly.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, host)
    }
}
