//! Error types for GoCache clients

use thiserror::Error;

/// Core error type for GoCache client operations
///
/// Every variant is local to one command: none of them end an interactive
/// session.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No command registered under this name
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// Command got more arguments than it accepts
    #[error("too many arguments: {command} takes at most {max}, got {got}")]
    TooManyArguments {
        command: &'static str,
        max: usize,
        got: usize,
    },

    /// Command takes a fixed number of arguments
    #[error("arguments error: {command} takes {expected} arguments, got {got}")]
    ArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    /// Value type outside string, list, dictionary
    #[error("type error: '{0}' is not one of string, list, dictionary")]
    InvalidValueType(String),

    /// Request never produced an HTTP response
    #[error("request failed: {0}")]
    Transport(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input line could not be split into arguments
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for GoCache operations
pub type Result<T> = std::result::Result<T, CacheError>;

impl CacheError {
    /// Whether the error was caught before any request was sent.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            CacheError::UnknownCommand(_)
                | CacheError::MissingArgument(_)
                | CacheError::TooManyArguments { .. }
                | CacheError::ArgumentCount { .. }
                | CacheError::InvalidValueType(_)
                | CacheError::Parse(_)
        )
    }
}
