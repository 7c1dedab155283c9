//! Error types for connection string parsing.

use thiserror::Error;

/// Result type for connection string parsing.
pub type UriResult<T> = Result<T, UriError>;

/// Errors produced while parsing a MongoDB connection string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// The string does not follow the connection string grammar.
    #[error("invalid connection URI: {0}")]
    InvalidUri(String),

    /// The scheme is not `mongodb`.
    #[error("unsupported scheme '{0}', expected 'mongodb'")]
    UnsupportedScheme(String),

    /// The host list is empty or contains an empty entry.
    #[error("connection URI must name at least one host")]
    EmptyHost,

    /// A host carries a port that is not a number in 1..=65535.
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    /// Credentials were given with an empty username.
    #[error("username must not be empty when credentials are given")]
    EmptyUsername,

    /// A query option is malformed or carries an invalid value.
    #[error("invalid option '{key}': {message}")]
    InvalidOption {
        /// The (lower-cased) option key.
        key: String,
        /// What was wrong with it.
        message: String,
    },
}

impl UriError {
    /// Create an invalid URI error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidUri(message.into())
    }

    /// Create an invalid option error.
    pub fn invalid_option(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            message: message.into(),
        }
    }
}
