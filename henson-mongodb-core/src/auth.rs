//! Authentication replayed on database access.

use async_trait::async_trait;
use bson::doc;
use mongodb::Database;
use tracing::debug;

use crate::credential::AuthCredential;
use crate::error::MongoResult;

/// Applies a credential to a database handle.
///
/// Called on every database access while a credential is configured.
/// Errors are the driver's and are returned unchanged.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate `database` with `credential`.
    async fn authenticate(&self, database: &Database, credential: &AuthCredential)
    -> MongoResult<()>;
}

/// Authenticates by running `connectionStatus`.
///
/// The driver attaches the credential to every pooled connection's
/// handshake, so checking out a connection for the command performs (or
/// confirms) authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionStatusAuthenticator;

#[async_trait]
impl Authenticator for ConnectionStatusAuthenticator {
    async fn authenticate(
        &self,
        database: &Database,
        credential: &AuthCredential,
    ) -> MongoResult<()> {
        debug!(
            database = %database.name(),
            identity = ?credential.identity(),
            mechanism = %credential.mechanism(),
            "Authenticating"
        );
        database
            .run_command(doc! { "connectionStatus": 1 }, None)
            .await?;
        Ok(())
    }
}
