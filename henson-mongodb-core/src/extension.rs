//! Application extension lifecycle.
//!
//! The host application owns a [`Settings`] mapping. Extensions declare the
//! settings they require and the defaults they provide, then configure
//! themselves from the mapping in [`Extension::init_app`].

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::Database;
use tracing::{debug, info};

use crate::auth::{Authenticator, ConnectionStatusAuthenticator};
use crate::client::ClientHandle;
use crate::codec::DocumentClass;
use crate::config::ConnectionSettings;
use crate::connection::Connection;
use crate::error::{MongoError, MongoResult};
use crate::settings::{SettingValue, Settings, keys};

/// A host application: a name and its settings.
#[derive(Debug, Clone)]
pub struct Application {
    name: String,
    settings: Settings,
}

impl Application {
    /// Create an application with empty settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_settings(name, Settings::new())
    }

    /// Create an application with the given settings.
    pub fn with_settings(name: impl Into<String>, settings: Settings) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }

    /// The application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The settings mapping.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the settings mapping.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

/// An extension configured from an application's settings.
#[async_trait]
pub trait Extension: Send + Sync {
    /// Keys that must be present (and not null) before initialization.
    const REQUIRED_SETTINGS: &'static [&'static str];

    /// Defaults applied for keys the application did not set.
    fn default_settings() -> Settings;

    /// Apply defaults and check required settings.
    fn prepare(app: &mut Application) -> MongoResult<()>
    where
        Self: Sized,
    {
        let settings = app.settings_mut();
        for (key, value) in Self::default_settings().iter() {
            settings.set_default(key, value.clone());
        }

        for key in Self::REQUIRED_SETTINGS {
            if settings.get(key).is_none_or(SettingValue::is_null) {
                return Err(MongoError::MissingSetting((*key).to_string()));
            }
        }

        Ok(())
    }

    /// Configure the extension for `app`.
    async fn init_app(&mut self, app: &mut Application) -> MongoResult<()>;
}

/// The MongoDB extension.
///
/// Starts unconfigured; [`Extension::init_app`] performs the one-way
/// transition to configured, after which [`MongoDB::client`] and
/// [`MongoDB::db`] are available.
pub struct MongoDB {
    connection: Option<Connection>,
    authenticator: Arc<dyn Authenticator>,
}

impl MongoDB {
    /// Create an unconfigured extension.
    pub fn new() -> Self {
        Self::with_authenticator(Arc::new(ConnectionStatusAuthenticator))
    }

    /// Create an unconfigured extension with a custom authenticator.
    pub fn with_authenticator(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            connection: None,
            authenticator,
        }
    }

    /// Create and initialize the extension for `app`.
    pub async fn from_app(app: &mut Application) -> MongoResult<Self> {
        let mut mongo = Self::new();
        mongo.init_app(app).await?;
        Ok(mongo)
    }

    /// Whether `init_app` has completed.
    pub fn is_initialized(&self) -> bool {
        self.connection.is_some()
    }

    /// The configured connection.
    pub fn connection(&self) -> MongoResult<&Connection> {
        self.connection.as_ref().ok_or(MongoError::NotInitialized)
    }

    /// The client handle.
    pub fn client(&self) -> MongoResult<&ClientHandle> {
        Ok(self.connection()?.client())
    }

    /// The database handle, authenticated on every access.
    ///
    /// See [`Connection::database`].
    pub async fn db(&self) -> MongoResult<&Database> {
        self.connection()?.database().await
    }
}

impl Default for MongoDB {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MongoDB {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoDB")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Extension for MongoDB {
    const REQUIRED_SETTINGS: &'static [&'static str] = &[keys::URI];

    fn default_settings() -> Settings {
        let mut settings = Settings::new();
        settings.set(keys::DOCUMENT_CLASS, DocumentClass::default().as_str());
        settings.set(keys::TIME_ZONE_AWARE, false);
        settings
    }

    async fn init_app(&mut self, app: &mut Application) -> MongoResult<()> {
        if self.is_initialized() {
            return Err(MongoError::config(
                "the MongoDB extension is already initialized",
            ));
        }

        Self::prepare(app)?;
        debug!(app = %app.name(), "Initializing MongoDB extension");

        let derived = ConnectionSettings::from_settings(app.settings())?;
        let connection =
            Connection::from_connection_settings(derived, self.authenticator.clone()).await?;
        connection.settings().apply_to(app.settings_mut());

        info!(
            app = %app.name(),
            database = %connection.database_name(),
            kind = ?connection.client().kind(),
            "MongoDB extension initialized"
        );

        self.connection = Some(connection);
        Ok(())
    }
}
