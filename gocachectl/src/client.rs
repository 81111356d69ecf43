//! HTTP client for communicating with a GoCache server.

use gocache_core::{CacheError, CacheRequest, HttpMethod, Result, JSON_CONTENT_TYPE};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};

use crate::prompt::{input_closed, Prompt};
use crate::session::Session;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of retries after a transport failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default wait before the first retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Raw outcome of one request.
///
/// The body is kept verbatim whatever the status; the status is only used
/// for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the GoCache REST API.
///
/// Owns the [`Session`], so host and credential changes made by `host` and
/// `login` apply to every later request. Each cache operation sends exactly
/// one logical request, authenticated with HTTP Basic auth.
///
/// # Retry Logic
///
/// Requests that fail before a response arrives (connection refused,
/// timeout) are retried up to `max_retries` times, waiting
/// `retry_delay * attempt` between attempts. Any HTTP response, including
/// 4xx and 5xx, ends the loop.
///
/// # Examples
///
/// ```no_run
/// use gocachectl::client::CacheClient;
/// use gocachectl::session::Session;
///
/// # async fn example() -> gocache_core::Result<()> {
/// let client = CacheClient::new(Session::new("localhost:8081", "admin", "secret"))?;
/// let reply = client.list_keys().await?;
/// println!("{}", reply.body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CacheClient {
    client: Client,
    session: Session,
    max_retries: u32,
    retry_delay: Duration,
}

impl CacheClient {
    /// Create a client with the default timeout and retry policy.
    pub fn new(session: Session) -> Result<Self> {
        Self::with_config(
            session,
            DEFAULT_TIMEOUT_SECS,
            DEFAULT_MAX_RETRIES,
            DEFAULT_RETRY_DELAY,
        )
    }

    /// Create a client with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `session` - Initial host and credentials
    /// * `timeout_secs` - Request timeout in seconds
    /// * `max_retries` - Retries after a transport failure
    /// * `retry_delay` - Wait before the first retry, grows linearly
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn with_config(
        session: Session,
        timeout_secs: u64,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("gocachectl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CacheError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            session,
            max_retries,
            retry_delay,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ask for a username and a masked password and store them.
    ///
    /// The session keeps its old credentials if either read fails.
    pub fn set_login(&mut self, prompt: &mut dyn Prompt) -> Result<()> {
        let username = prompt.read_line("Username: ")?.ok_or_else(input_closed)?;
        let password = prompt.read_secret("Password: ")?;

        self.session.set_credentials(username, password);
        debug!(username = %self.session.username(), "credentials updated");
        Ok(())
    }

    /// Ask for a host name and port and point the session at them.
    ///
    /// Returns the new base URL. Reachability is not checked.
    pub fn set_host(&mut self, prompt: &mut dyn Prompt) -> Result<&str> {
        let host = prompt.read_line("Host: ")?.ok_or_else(input_closed)?;
        let port = prompt.read_line("Port: ")?.ok_or_else(input_closed)?;

        self.session.set_host(&host, &port);
        debug!(host = %self.session.host(), "host updated");
        Ok(self.session.host())
    }

    /// List every key: `GET /cache/keys`.
    pub async fn list_keys(&self) -> Result<Reply> {
        self.send(&CacheRequest::Keys).await
    }

    /// Read a key, or one entry inside it when a second argument is given.
    ///
    /// # Errors
    ///
    /// Returns a usage error without sending anything for zero or more than
    /// two arguments.
    pub async fn get_value(&self, args: &[String]) -> Result<Reply> {
        let request = CacheRequest::get(args)?;
        self.send(&request).await
    }

    /// Store `value` under `key` as `type`: `set <type> <key> <value>`.
    ///
    /// # Errors
    ///
    /// Returns a usage error without sending anything unless there are
    /// exactly three arguments and the type is string, list or dictionary.
    pub async fn set_value(&self, args: &[String]) -> Result<Reply> {
        let request = CacheRequest::set(args)?;
        self.send(&request).await
    }

    /// Delete a key: `remove <key>`.
    pub async fn remove_key(&self, args: &[String]) -> Result<Reply> {
        let request = CacheRequest::remove(args)?;
        self.send(&request).await
    }

    /// Send one request against the current host with the current credentials.
    pub async fn send(&self, request: &CacheRequest) -> Result<Reply> {
        let path = request.path();
        let url = format!("{}{}", self.session.host(), path);
        let endpoint = format!("{} {}", request.method().as_str(), path);

        debug!(%url, method = request.method().as_str(), "sending request");
        self.execute_with_retry(&endpoint, || self.build_request(request, &url).send())
            .await
    }

    fn build_request(&self, request: &CacheRequest, url: &str) -> RequestBuilder {
        let method = match request.method() {
            HttpMethod::Get => Method::GET,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let builder = self.client.request(method, url).basic_auth(
            self.session.username(),
            Some(self.session.password()),
        );

        match request.body() {
            Some(body) => builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_string()),
            None => builder,
        }
    }

    /// Read the body of any response, successful or not.
    async fn handle_response(response: Response, endpoint: &str) -> Result<Reply> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            CacheError::Transport(format!("failed to read response body from {}: {}", endpoint, e))
        })?;

        if !status.is_success() {
            warn!(%status, endpoint, "server answered with an error status");
        }

        Ok(Reply {
            status: status.as_u16(),
            body,
        })
    }

    /// Execute an HTTP request with automatic retry logic.
    ///
    /// Only connection-level failures are retried. The wait grows with each
    /// attempt (`retry_delay * (attempt + 1)`).
    async fn execute_with_retry<F, Fut>(&self, endpoint: &str, request_fn: F) -> Result<Reply>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<Response, reqwest::Error>>,
    {
        let mut attempt = 0;

        loop {
            match request_fn().await {
                Ok(response) => return Self::handle_response(response, endpoint).await,
                Err(e) => {
                    let should_retry = e.is_connect() || e.is_timeout() || e.is_request();

                    if attempt < self.max_retries && should_retry {
                        debug!(endpoint, attempt = attempt + 1, error = %e, "request failed, retrying");
                        tokio::time::sleep(self.retry_delay * (attempt + 1)).await;
                        attempt += 1;
                        continue;
                    }

                    warn!(endpoint, attempts = attempt + 1, "giving up on request");
                    return Err(CacheError::Transport(format!(
                        "failed to reach {} after {} attempts: {}",
                        endpoint,
                        attempt + 1,
                        e
                    )));
                }
            }
        }
    }
}
