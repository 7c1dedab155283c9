//! Error types for MongoDB configuration and access.

use henson_uri::UriError;
use thiserror::Error;

/// Result type for MongoDB configuration and access.
pub type MongoResult<T> = Result<T, MongoError>;

/// Errors that can occur while configuring or using the MongoDB extension.
#[derive(Error, Debug)]
pub enum MongoError {
    /// The connection URI does not name a database.
    #[error("configuration error: a database name must be specified")]
    MissingDatabase,

    /// X.509 was selected without both certificate files.
    #[error(
        "configuration error: to use X.509, both the certificate file and the certificate authority file must be specified"
    )]
    IncompleteX509,

    /// Only one of username and password was given.
    #[error("configuration error: username and password must be specified together or not at all")]
    IncompleteCredentials,

    /// A required setting is missing from the settings mapping.
    #[error("configuration error: missing required setting '{0}'")]
    MissingSetting(String),

    /// A setting has the wrong type or an unusable value.
    #[error("configuration error: invalid setting '{key}': {message}")]
    InvalidSetting {
        /// The setting key.
        key: String,
        /// What was wrong with it.
        message: String,
    },

    /// Other configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The connection string could not be parsed.
    #[error("invalid connection string: {0}")]
    Uri(#[from] UriError),

    /// A configuration file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML.
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment variable referenced by the settings is not set.
    #[error("environment variable not found: {0}")]
    EnvNotFound(String),

    /// The extension was used before `init_app` ran.
    #[error("the MongoDB extension has not been initialized")]
    NotInitialized,

    /// MongoDB driver error, propagated unchanged.
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),
}

impl MongoError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid setting error.
    pub fn invalid_setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Check if this error was raised before any client was constructed.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDatabase
                | Self::IncompleteX509
                | Self::IncompleteCredentials
                | Self::MissingSetting(_)
                | Self::InvalidSetting { .. }
                | Self::Config(_)
                | Self::Uri(_)
                | Self::Io { .. }
                | Self::Toml(_)
                | Self::EnvNotFound(_)
        )
    }

    /// Check if this error came from the driver.
    pub fn is_driver_error(&self) -> bool {
        matches!(self, Self::Driver(_))
    }
}
