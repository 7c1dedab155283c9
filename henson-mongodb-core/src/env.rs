//! Environment variable lookup and `${VAR}` expansion for settings files.

use std::collections::HashMap;

use crate::error::{MongoError, MongoResult};

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment source backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a map, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Expands `${VAR}` references.
///
/// Supported syntax:
/// - `${VAR}` - required variable
/// - `${VAR:-default}` - variable with a fallback
/// - `${VAR:?message}` - required, failing with `message`
///
/// A `$` not followed by `{` is kept literally, so passwords containing `$`
/// survive expansion untouched.
#[derive(Debug, Clone)]
pub struct EnvExpander<S: EnvSource = StdEnvSource> {
    source: S,
}

impl EnvExpander<StdEnvSource> {
    /// Create an expander over the process environment.
    pub fn new() -> Self {
        Self {
            source: StdEnvSource,
        }
    }
}

impl Default for EnvExpander<StdEnvSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EnvSource> EnvExpander<S> {
    /// Create an expander with a custom source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Get the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Expand every `${...}` reference in `input`.
    pub fn expand(&self, input: &str) -> MongoResult<String> {
        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find("${") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find('}')
                .ok_or_else(|| MongoError::config("unterminated '${' in settings"))?;
            result.push_str(&self.resolve(&after[..end])?);
            rest = &after[end + 1..];
        }

        result.push_str(rest);
        Ok(result)
    }

    fn resolve(&self, reference: &str) -> MongoResult<String> {
        let (name, modifier) = match reference.split_once(':') {
            Some((name, modifier)) => (name, Some(modifier)),
            None => (reference, None),
        };

        if name.is_empty() {
            return Err(MongoError::config("empty variable name in '${}'"));
        }

        if let Some(value) = self.source.get(name).filter(|v| !v.is_empty()) {
            return Ok(value);
        }

        match modifier {
            Some(m) if m.starts_with('-') => Ok(m[1..].to_string()),
            Some(m) if m.starts_with('?') && m.len() > 1 => Err(MongoError::config(&m[1..])),
            _ => Err(MongoError::EnvNotFound(name.to_string())),
        }
    }
}
