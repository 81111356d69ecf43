//! Test utilities for CLI testing
//!
//! Provides an in-process mock GoCache server that records every request,
//! and a scripted [`Prompt`] for interactive commands.

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use base64::prelude::*;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::prompt::{input_closed, Prompt};

/// Build an owned argument list.
pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// One request as seen by the mock server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// A stored value and the type it was set with
#[derive(Debug, Clone)]
struct Entry {
    value_type: String,
    value: String,
}

/// Mock server state
#[derive(Debug, Clone, Default)]
pub struct MockServerState {
    /// Every request received, in order
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Cache contents by key
    entries: Arc<Mutex<BTreeMap<String, Entry>>>,
    /// Expected `Authorization` header, if auth is enforced
    expected_auth: Option<String>,
}

/// Mock GoCache server
#[derive(Debug, Default)]
pub struct MockCacheServer {
    state: MockServerState,
    port: u16,
}

impl MockCacheServer {
    /// Create a new mock server with an empty cache and no auth
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache before starting
    pub fn with_entry(self, value_type: &str, key: &str, value: &str) -> Self {
        self.state.entries.lock().unwrap().insert(
            key.to_string(),
            Entry {
                value_type: value_type.to_string(),
                value: value.to_string(),
            },
        );
        self
    }

    /// Require these Basic credentials; other requests get 401
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.state.expected_auth = Some(format!(
            "Basic {}",
            BASE64_STANDARD.encode(format!("{}:{}", username, password))
        ));
        self
    }

    /// Start the mock server and return the address
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = Router::new()
            .fallback(cache_handler)
            .with_state(self.state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Keys currently stored
    pub fn stored_keys(&self) -> Vec<String> {
        self.state.entries.lock().unwrap().keys().cloned().collect()
    }

    /// Raw value stored under `key`
    pub fn stored_value(&self, key: &str) -> Option<String> {
        self.state
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|e| e.value.clone())
    }
}

/// Single handler that records the request and emulates the cache routes.
async fn cache_handler(
    State(state): State<MockServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.clone(),
    };
    let authorization = recorded.authorization.clone();
    state.requests.lock().unwrap().push(recorded);

    if let Some(expected) = &state.expected_auth {
        if authorization.as_deref() != Some(expected.as_str()) {
            return (StatusCode::UNAUTHORIZED, "unauthorized".to_string());
        }
    }

    let segments: Vec<&str> = uri
        .path()
        .trim_start_matches('/')
        .split('/')
        .collect();
    let mut entries = state.entries.lock().unwrap();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["cache", "keys"]) => {
            let keys: Vec<&String> = entries.keys().collect();
            (
                StatusCode::OK,
                serde_json::to_string(&keys).unwrap_or_default(),
            )
        }
        ("GET", ["cache", "key", key]) => match entries.get(*key) {
            Some(entry) => (StatusCode::OK, entry.value.clone()),
            None => (StatusCode::NOT_FOUND, "key not found".to_string()),
        },
        ("GET", ["cache", "key", key, internal_key]) => match entries.get(*key) {
            Some(entry) => lookup_internal(entry, internal_key),
            None => (StatusCode::NOT_FOUND, "key not found".to_string()),
        },
        ("PUT", ["cache", "set", value_type, key]) => {
            if !matches!(*value_type, "string" | "list" | "dictionary") {
                return (StatusCode::BAD_REQUEST, "unknown type".to_string());
            }
            entries.insert(
                key.to_string(),
                Entry {
                    value_type: value_type.to_string(),
                    value: body,
                },
            );
            (StatusCode::OK, format!("{} stored", key))
        }
        ("DELETE", ["cache", "remove", key]) => match entries.remove(*key) {
            Some(_) => (StatusCode::OK, format!("{} removed", key)),
            None => (StatusCode::NOT_FOUND, "key not found".to_string()),
        },
        _ => (StatusCode::NOT_FOUND, "404 page not found".to_string()),
    }
}

fn lookup_internal(entry: &Entry, internal_key: &str) -> (StatusCode, String) {
    let parsed: serde_json::Value = match serde_json::from_str(&entry.value) {
        Ok(v) => v,
        Err(_) => return (StatusCode::BAD_REQUEST, "stored value is not JSON".to_string()),
    };

    let found = match entry.value_type.as_str() {
        "dictionary" => parsed.get(internal_key),
        "list" => internal_key
            .parse::<usize>()
            .ok()
            .and_then(|i| parsed.get(i)),
        _ => return (StatusCode::BAD_REQUEST, "not a collection".to_string()),
    };

    match found {
        Some(value) => (StatusCode::OK, value.to_string()),
        None => (StatusCode::NOT_FOUND, "internal key not found".to_string()),
    }
}

/// [`Prompt`] answering from a fixed list of lines.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    secret_reads: usize,
}

impl ScriptedPrompt {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// How many answers were read without echo
    pub fn secret_reads(&self) -> usize {
        self.secret_reads
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.secret_reads += 1;
        self.lines.pop_front().ok_or_else(input_closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_startup() {
        let (server, url) = MockCacheServer::new().start().await.unwrap();

        assert!(server.port() > 0);
        assert!(url.contains(&server.port().to_string()));

        let response = reqwest::get(format!("{}/cache/keys", url)).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_mock_server_set_and_get() {
        let (server, url) = MockCacheServer::new().start().await.unwrap();
        let client = reqwest::Client::new();

        let response = client
            .put(format!("{}/cache/set/list/colors", url))
            .body(r#"["red","blue"]"#)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            server.stored_value("colors").as_deref(),
            Some(r#"["red","blue"]"#)
        );

        let response = client
            .get(format!("{}/cache/key/colors/1", url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), r#""blue""#);
    }

    #[test]
    fn test_with_credentials_expects_basic_header() {
        let server = MockCacheServer::new().with_credentials("admin", "secret");
        assert_eq!(
            server.state.expected_auth.as_deref(),
            Some("Basic YWRtaW46c2VjcmV0")
        );

        let anonymous = MockCacheServer::new().with_credentials("", "");
        assert_eq!(anonymous.state.expected_auth.as_deref(), Some("Basic Og=="));
    }

    #[test]
    fn test_scripted_prompt() {
        let mut prompt = ScriptedPrompt::new(["alice", "pw"]);
        assert_eq!(prompt.read_line("Username: ").unwrap().as_deref(), Some("alice"));
        assert_eq!(prompt.read_secret("Password: ").unwrap(), "pw");
        assert_eq!(prompt.read_line("next: ").unwrap(), None);
        assert!(prompt.read_secret("again: ").is_err());
        assert_eq!(prompt.prompts().len(), 4);
        assert_eq!(prompt.secret_reads(), 2);
    }
}
