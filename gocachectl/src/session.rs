//! Connection state shared by every cache command.

use gocache_core::normalize_host;
use std::fmt;

/// Host and credentials for the current process.
///
/// Owned by [`crate::client::CacheClient`]; commands only reach it through
/// the client. The password never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    host: String,
    username: String,
    password: String,
}

impl Session {
    /// Create a session. `host` may omit the scheme.
    pub fn new(host: &str, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: normalize_host(host),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Base URL every request path is appended to.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Point the session at `http://{host}:{port}`.
    ///
    /// Neither part is checked; an unreachable host surfaces on the next request.
    pub fn set_host(&mut self, host: &str, port: &str) {
        self.host = format!("http://{}:{}", host.trim(), port.trim());
    }

    /// Replace both credentials at once.
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.username = username.into();
        self.password = password.into();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
