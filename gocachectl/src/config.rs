//! CLI configuration management
//!
//! Settings come from, lowest priority first: built-in defaults, a TOML
//! config file, `GOCACHE_*` environment variables and command-line flags.

use anyhow::{Context, Result};
use gocache_core::DEFAULT_HOST;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::client::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};

/// CLI configuration
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Cache server host, with or without scheme
    pub host: String,

    /// Username for HTTP basic authentication
    pub username: String,

    /// Password for HTTP basic authentication
    pub password: String,

    /// Reply output format (raw or pretty)
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Retries after a transport failure
    pub retry_count: u32,

    /// Wait before the first retry, in milliseconds
    pub retry_wait_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            username: String::new(),
            password: String::new(),
            output_format: "raw".to_string(),
            verbose: false,
            timeout: DEFAULT_TIMEOUT_SECS,
            retry_count: DEFAULT_MAX_RETRIES,
            retry_wait_ms: 1000,
        }
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("output_format", &self.output_format)
            .field("verbose", &self.verbose)
            .field("timeout", &self.timeout)
            .field("retry_count", &self.retry_count)
            .field("retry_wait_ms", &self.retry_wait_ms)
            .finish()
    }
}

impl CliConfig {
    /// Load configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CLI config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse CLI config file {}", path.display()))
    }

    /// Get the default configuration file path
    ///
    /// `$XDG_CONFIG_HOME/gocache/cli.toml`, else `~/.config/gocache/cli.toml`
    /// on every platform.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = match std::env::var_os("XDG_CONFIG_HOME") {
            Some(xdg_config) if !xdg_config.is_empty() => PathBuf::from(xdg_config),
            _ => dirs::home_dir()
                .context("Cannot determine config directory")?
                .join(".config"),
        };

        Ok(config_dir.join("gocache").join("cli.toml"))
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Each layer only fills values that are still unset, so apply the layers
/// from highest to lowest priority:
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Defaults (applied by [`ConfigBuilder::build`])
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    output_format: Option<String>,
    verbose: Option<bool>,
    timeout: Option<u64>,
    retry_count: Option<u32>,
    retry_wait_ms: Option<u64>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host (with validation)
    pub fn with_host(mut self, host: impl Into<String>) -> Result<Self> {
        let host = host.into();
        Self::validate_host(&host)?;
        self.host = Some(host);
        Ok(self)
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set timeout (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Set retry count (with validation)
    pub fn with_retry_count(mut self, retry_count: u32) -> Result<Self> {
        Self::validate_retry_count(retry_count)?;
        self.retry_count = Some(retry_count);
        Ok(self)
    }

    /// Set retry wait (with validation)
    pub fn with_retry_wait_ms(mut self, retry_wait_ms: u64) -> Result<Self> {
        Self::validate_retry_wait(retry_wait_ms)?;
        self.retry_wait_ms = Some(retry_wait_ms);
        Ok(self)
    }

    /// Fill unset values from a config file.
    ///
    /// With an explicit `path` the file must exist. Without one the default
    /// location is used and a missing file is not an error.
    pub fn with_config_file(self, path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => CliConfig::load_from(path)?,
            None => {
                let default_path = match CliConfig::default_path() {
                    Ok(p) => p,
                    Err(_) => return Ok(self),
                };
                if !default_path.exists() {
                    return Ok(self);
                }
                CliConfig::load_from(&default_path)?
            }
        };

        Self::validate_host(&config.host)?;
        Self::validate_output_format(&config.output_format)?;
        Self::validate_timeout(config.timeout)?;
        Self::validate_retry_count(config.retry_count)?;
        Self::validate_retry_wait(config.retry_wait_ms)?;

        Ok(Self {
            host: self.host.or(Some(config.host)),
            username: self.username.or(Some(config.username)),
            password: self.password.or(Some(config.password)),
            output_format: self.output_format.or(Some(config.output_format)),
            verbose: self.verbose.or(Some(config.verbose)),
            timeout: self.timeout.or(Some(config.timeout)),
            retry_count: self.retry_count.or(Some(config.retry_count)),
            retry_wait_ms: self.retry_wait_ms.or(Some(config.retry_wait_ms)),
        })
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        // Only apply env vars if values weren't already set (preserving priority)
        if self.host.is_none() {
            if let Ok(host) = std::env::var("GOCACHE_HOST") {
                if Self::validate_host(&host).is_ok() {
                    self.host = Some(host);
                }
            }
        }

        if self.username.is_none() {
            if let Ok(username) = std::env::var("GOCACHE_USERNAME") {
                self.username = Some(username);
            }
        }

        if self.password.is_none() {
            if let Ok(password) = std::env::var("GOCACHE_PASSWORD") {
                self.password = Some(password);
            }
        }

        if self.output_format.is_none() {
            if let Ok(format) = std::env::var("GOCACHE_FORMAT") {
                if Self::validate_output_format(&format).is_ok() {
                    self.output_format = Some(format);
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var("GOCACHE_VERBOSE") {
                self.verbose = Some(verbose.to_lowercase() == "true" || verbose == "1");
            }
        }

        if self.timeout.is_none() {
            if let Ok(timeout) = std::env::var("GOCACHE_TIMEOUT") {
                if let Ok(timeout) = timeout.parse() {
                    if Self::validate_timeout(timeout).is_ok() {
                        self.timeout = Some(timeout);
                    }
                }
            }
        }

        if self.retry_count.is_none() {
            if let Ok(retries) = std::env::var("GOCACHE_RETRIES") {
                if let Ok(retries) = retries.parse() {
                    if Self::validate_retry_count(retries).is_ok() {
                        self.retry_count = Some(retries);
                    }
                }
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let host = self.host.unwrap_or(defaults.host);
        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let timeout = self.timeout.unwrap_or(defaults.timeout);
        let retry_count = self.retry_count.unwrap_or(defaults.retry_count);
        let retry_wait_ms = self.retry_wait_ms.unwrap_or(defaults.retry_wait_ms);

        // Validate final values
        Self::validate_host(&host)?;
        Self::validate_output_format(&output_format)?;
        Self::validate_timeout(timeout)?;
        Self::validate_retry_count(retry_count)?;
        Self::validate_retry_wait(retry_wait_ms)?;

        Ok(CliConfig {
            host,
            username: self.username.unwrap_or(defaults.username),
            password: self.password.unwrap_or(defaults.password),
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            timeout,
            retry_count,
            retry_wait_ms,
        })
    }

    /// Validate host
    fn validate_host(host: &str) -> Result<()> {
        if host.trim().is_empty() {
            return Err(anyhow::anyhow!("Host cannot be empty"));
        }

        if host.trim().chars().any(char::is_whitespace) {
            return Err(anyhow::anyhow!("Host cannot contain whitespace"));
        }

        Ok(())
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "raw" | "pretty" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'raw' or 'pretty'",
                format
            )),
        }
    }

    /// Validate timeout value
    fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0"));
        }

        if timeout > 300 {
            return Err(anyhow::anyhow!(
                "Timeout must be less than or equal to 300 seconds"
            ));
        }

        Ok(())
    }

    fn validate_retry_count(retry_count: u32) -> Result<()> {
        if retry_count > 10 {
            return Err(anyhow::anyhow!("Retry count must be at most 10"));
        }
        Ok(())
    }

    fn validate_retry_wait(retry_wait_ms: u64) -> Result<()> {
        if retry_wait_ms > 60_000 {
            return Err(anyhow::anyhow!("Retry wait must be at most 60000 ms"));
        }
        Ok(())
    }
}
