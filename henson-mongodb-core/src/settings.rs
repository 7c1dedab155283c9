//! The host application's settings mapping.
//!
//! Settings are an ordered, string-keyed map of scalar values. The host
//! supplies the connection URI and optional overrides; after initialization
//! the extension writes the derived connection settings back into it.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::env::{EnvExpander, EnvSource, StdEnvSource};
use crate::error::{MongoError, MongoResult};

/// Setting keys read and written by the MongoDB extension.
pub mod keys {
    /// Connection URI (required).
    pub const URI: &str = "MONGODB_URI";
    /// Document representation type.
    pub const DOCUMENT_CLASS: &str = "MONGODB_DOCUMENT_CLASS";
    /// Whether decoded datetimes are time-zone aware.
    pub const TIME_ZONE_AWARE: &str = "MONGODB_TIME_ZONE_AWARE";

    /// Database name from the URI path.
    pub const DATABASE: &str = "MONGODB_DATABASE";
    /// Collection name from the URI path.
    pub const COLLECTION: &str = "MONGODB_COLLECTION";
    /// Username from the URI.
    pub const USERNAME: &str = "MONGODB_USERNAME";
    /// Password from the URI.
    pub const PASSWORD: &str = "MONGODB_PASSWORD";
    /// TLS flag.
    pub const USE_SSL: &str = "MONGODB_USE_SSL";
    /// Authentication mechanism name.
    pub const AUTH_MECHANISM: &str = "MONGODB_AUTH_MECHANISM";
    /// Authentication source database.
    pub const AUTH_SOURCE: &str = "MONGODB_AUTH_SOURCE";
    /// Client certificate file.
    pub const SSL_CERTFILE: &str = "MONGODB_SSL_CERTFILE";
    /// Certificate authority file.
    pub const SSL_CA_CERTS: &str = "MONGODB_SSL_CA_CERTS";
    /// Replica set name.
    pub const REPLICA_SET: &str = "MONGODB_REPLICA_SET";
    /// Maximum pool size.
    pub const MAX_POOL_SIZE: &str = "MONGODB_MAX_POOL_SIZE";
    /// Eager connect flag.
    pub const CONNECT: &str = "MONGODB_CONNECT";

    /// Keys the host may supply.
    pub const INPUTS: &[&str] = &[URI, DOCUMENT_CLASS, TIME_ZONE_AWARE];
}

/// A scalar setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// No value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// String.
    Str(String),
}

impl SettingValue {
    /// Whether this is [`SettingValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow as a string, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// An ordered settings mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: IndexMap<String, SettingValue>,
}

impl Settings {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping holding only a connection URI.
    pub fn with_uri(uri: impl Into<String>) -> Self {
        let mut settings = Self::new();
        settings.set(keys::URI, uri.into());
        settings
    }

    /// Parse settings from a TOML string, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> MongoResult<Self> {
        Self::from_toml_str_with(content, &EnvExpander::new())
    }

    /// Parse settings from a TOML string with a custom expander.
    pub fn from_toml_str_with<S: EnvSource>(
        content: &str,
        expander: &EnvExpander<S>,
    ) -> MongoResult<Self> {
        let expanded = expander.expand(content)?;
        let settings: Self = toml::from_str(&expanded)?;
        debug!(keys = settings.len(), "Settings loaded from TOML");
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> MongoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| MongoError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Read the host-supplied keys from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_source(&StdEnvSource)
    }

    /// Read the host-supplied keys from an environment source.
    pub fn from_env_source(source: &impl EnvSource) -> Self {
        let mut settings = Self::new();
        for key in keys::INPUTS {
            if let Some(value) = source.get(key) {
                settings.set(*key, value);
            }
        }
        settings
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Whether a key is present (a `Null` value counts as present).
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Insert a value only if the key is absent.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.values.shift_remove(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over keys and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get a string value. `Null` and absent keys read as `None`.
    pub fn get_str(&self, key: &str) -> MongoResult<Option<&str>> {
        match self.get(key) {
            None | Some(SettingValue::Null) => Ok(None),
            Some(SettingValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(MongoError::invalid_setting(
                key,
                format!("expected a string, got '{other}'"),
            )),
        }
    }

    /// Get a boolean value. Strings such as `"true"` or `"0"` are accepted,
    /// since values read from the environment are always strings.
    pub fn get_bool(&self, key: &str) -> MongoResult<Option<bool>> {
        match self.get(key) {
            None | Some(SettingValue::Null) => Ok(None),
            Some(SettingValue::Bool(b)) => Ok(Some(*b)),
            Some(SettingValue::Str(s)) => henson_uri::parse_bool(key, s)
                .map(Some)
                .map_err(|_| MongoError::invalid_setting(key, format!("expected a boolean, got '{s}'"))),
            Some(other) => Err(MongoError::invalid_setting(
                key,
                format!("expected a boolean, got '{other}'"),
            )),
        }
    }
}

impl FromIterator<(String, SettingValue)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
