//! REST API contract for the GoCache server
//!
//! Every cache operation maps to exactly one HTTP request. This module owns
//! that mapping (method, path and body) so it can be checked without a
//! network, and validates command arguments before anything is sent.

use crate::error::{CacheError, Result};
use crate::types::ValueType;

/// Prefix shared by every cache route.
pub const API_PREFIX: &str = "/cache";

/// Content type attached to `set` bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods used by the cache API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One request against the cache API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRequest {
    /// List all keys: `GET /cache/keys`
    Keys,
    /// Read a whole value: `GET /cache/key/{key}`
    Key { key: String },
    /// Read one entry of a list or dictionary: `GET /cache/key/{key}/{internal_key}`
    InternalKey { key: String, internal_key: String },
    /// Store a value: `PUT /cache/set/{type}/{key}` with a raw JSON body
    Set {
        value_type: ValueType,
        key: String,
        value: String,
    },
    /// Delete a key: `DELETE /cache/remove/{key}`
    Remove { key: String },
}

impl CacheRequest {
    /// Build a key listing request; `keys` takes no arguments.
    pub fn keys(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(CacheRequest::Keys),
            _ => Err(CacheError::ArgumentCount {
                command: "keys",
                expected: 0,
                got: args.len(),
            }),
        }
    }

    /// Build a read request from `key` command arguments.
    ///
    /// One argument addresses a key, two address an entry inside it.
    pub fn get(args: &[String]) -> Result<Self> {
        match args {
            [] => Err(CacheError::MissingArgument("key")),
            [key] => Ok(CacheRequest::Key { key: key.clone() }),
            [key, internal_key] => Ok(CacheRequest::InternalKey {
                key: key.clone(),
                internal_key: internal_key.clone(),
            }),
            _ => Err(CacheError::TooManyArguments {
                command: "key",
                max: 2,
                got: args.len(),
            }),
        }
    }

    /// Build a write request from `set <type> <key> <value>` arguments.
    ///
    /// The value is passed through untouched; the server validates it.
    pub fn set(args: &[String]) -> Result<Self> {
        match args {
            [value_type, key, value] => Ok(CacheRequest::Set {
                value_type: value_type.parse()?,
                key: key.clone(),
                value: value.clone(),
            }),
            _ => Err(CacheError::ArgumentCount {
                command: "set",
                expected: 3,
                got: args.len(),
            }),
        }
    }

    /// Build a delete request from `remove <key>` arguments.
    pub fn remove(args: &[String]) -> Result<Self> {
        match args {
            [key] => Ok(CacheRequest::Remove { key: key.clone() }),
            _ => Err(CacheError::ArgumentCount {
                command: "remove",
                expected: 1,
                got: args.len(),
            }),
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            CacheRequest::Keys | CacheRequest::Key { .. } | CacheRequest::InternalKey { .. } => {
                HttpMethod::Get
            }
            CacheRequest::Set { .. } => HttpMethod::Put,
            CacheRequest::Remove { .. } => HttpMethod::Delete,
        }
    }

    /// Request path, with user supplied segments percent-encoded.
    pub fn path(&self) -> String {
        match self {
            CacheRequest::Keys => format!("{}/keys", API_PREFIX),
            CacheRequest::Key { key } => format!("{}/key/{}", API_PREFIX, segment(key)),
            CacheRequest::InternalKey { key, internal_key } => format!(
                "{}/key/{}/{}",
                API_PREFIX,
                segment(key),
                segment(internal_key)
            ),
            CacheRequest::Set {
                value_type, key, ..
            } => format!("{}/set/{}/{}", API_PREFIX, value_type, segment(key)),
            CacheRequest::Remove { key } => format!("{}/remove/{}", API_PREFIX, segment(key)),
        }
    }

    /// Request body, only present for `set`.
    pub fn body(&self) -> Option<&str> {
        match self {
            CacheRequest::Set { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Encode one path segment so `/`, spaces and `?` in keys stay inside it.
fn segment(raw: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keys_request() {
        let req = CacheRequest::Keys;
        assert_eq!(req.method(), HttpMethod::Get);
        assert_eq!(req.path(), "/cache/keys");
        assert!(req.body().is_none());
    }

    #[test]
    fn test_keys_rejects_arguments() {
        assert_eq!(CacheRequest::keys(&[]).unwrap(), CacheRequest::Keys);

        let err = CacheRequest::keys(&args(&["extra"])).unwrap_err();
        assert!(err.is_usage());
        assert_eq!(
            err.to_string(),
            "arguments error: keys takes 0 arguments, got 1"
        );
    }

    #[test]
    fn test_get_with_one_argument() {
        let req = CacheRequest::get(&args(&["users"])).unwrap();
        assert_eq!(req.method(), HttpMethod::Get);
        assert_eq!(req.path(), "/cache/key/users");
    }

    #[test]
    fn test_get_with_internal_key() {
        let req = CacheRequest::get(&args(&["users", "alice"])).unwrap();
        assert_eq!(
            req,
            CacheRequest::InternalKey {
                key: "users".to_string(),
                internal_key: "alice".to_string()
            }
        );
        assert_eq!(req.path(), "/cache/key/users/alice");
    }

    #[test]
    fn test_get_argument_errors() {
        assert!(matches!(
            CacheRequest::get(&[]),
            Err(CacheError::MissingArgument("key"))
        ));

        match CacheRequest::get(&args(&["a", "b", "c"])) {
            Err(CacheError::TooManyArguments { max, got, .. }) => {
                assert_eq!(max, 2);
                assert_eq!(got, 3);
            }
            other => panic!("Expected TooManyArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_set_request() {
        let req = CacheRequest::set(&args(&["list", "colors", r#"["red","blue"]"#])).unwrap();
        assert_eq!(req.method(), HttpMethod::Put);
        assert_eq!(req.path(), "/cache/set/list/colors");
        assert_eq!(req.body(), Some(r#"["red","blue"]"#));
    }

    #[test]
    fn test_set_every_value_type() {
        for ty in ValueType::ALL {
            let req = CacheRequest::set(&args(&[ty.as_str(), "k", "\"v\""])).unwrap();
            assert_eq!(req.path(), format!("/cache/set/{}/k", ty));
        }
    }

    #[test]
    fn test_set_argument_errors() {
        assert!(matches!(
            CacheRequest::set(&args(&["string", "k"])),
            Err(CacheError::ArgumentCount { expected: 3, got: 2, .. })
        ));
        assert!(matches!(
            CacheRequest::set(&args(&["string", "k", "v", "extra"])),
            Err(CacheError::ArgumentCount { got: 4, .. })
        ));
        assert!(matches!(
            CacheRequest::set(&args(&["number", "k", "1"])),
            Err(CacheError::InvalidValueType(_))
        ));
    }

    #[test]
    fn test_remove_request() {
        let req = CacheRequest::remove(&args(&["session"])).unwrap();
        assert_eq!(req.method(), HttpMethod::Delete);
        assert_eq!(req.path(), "/cache/remove/session");

        assert!(CacheRequest::remove(&[]).is_err());
        assert!(CacheRequest::remove(&args(&["a", "b"])).is_err());
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let req = CacheRequest::get(&args(&["a/b", "c d"])).unwrap();
        assert_eq!(req.path(), "/cache/key/a%2Fb/c%20d");

        let req = CacheRequest::remove(&args(&["what?"])).unwrap();
        assert_eq!(req.path(), "/cache/remove/what%3F");
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
