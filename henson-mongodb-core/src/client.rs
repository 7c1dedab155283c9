//! Driver client construction.

use bson::doc;
use mongodb::{Client, Database};
use tracing::{debug, info};

use crate::codec::CodecOptions;
use crate::config::ConnectionSettings;
use crate::error::MongoResult;

/// Which client variant was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    /// A client for a single node (or a mongos router).
    SingleNode,
    /// A client that discovers and follows a named replica set.
    ReplicaSet,
}

/// The constructed driver client.
///
/// The variant is chosen once, from the presence of a replica set name, and
/// never changes afterwards.
#[derive(Clone)]
pub enum ClientHandle {
    /// Single-node client.
    SingleNode {
        /// Driver client.
        client: Client,
        /// Decoding options.
        codec: CodecOptions,
    },
    /// Replica-set-aware client.
    ReplicaSet {
        /// Driver client.
        client: Client,
        /// Replica set name passed to the driver.
        replica_set: String,
        /// Decoding options.
        codec: CodecOptions,
    },
}

impl ClientHandle {
    /// Construct the client for validated settings.
    ///
    /// The driver connects lazily, so this does not touch the network.
    pub async fn connect(settings: &ConnectionSettings) -> MongoResult<Self> {
        let options = settings.to_client_options().await?;
        let client = Client::with_options(options)?;
        let codec = settings.codec_options();

        let handle = match settings.replica_set.clone() {
            Some(replica_set) => Self::ReplicaSet {
                client,
                replica_set,
                codec,
            },
            None => Self::SingleNode { client, codec },
        };

        info!(
            hosts = settings.hosts.len(),
            database = %settings.database,
            kind = ?handle.kind(),
            "MongoDB client created"
        );

        Ok(handle)
    }

    /// Which variant this is.
    pub fn kind(&self) -> ClientKind {
        match self {
            Self::SingleNode { .. } => ClientKind::SingleNode,
            Self::ReplicaSet { .. } => ClientKind::ReplicaSet,
        }
    }

    /// Whether this is the replica-set-aware variant.
    pub fn is_replica_set(&self) -> bool {
        matches!(self, Self::ReplicaSet { .. })
    }

    /// The replica set name, for the replica-set-aware variant.
    pub fn replica_set(&self) -> Option<&str> {
        match self {
            Self::ReplicaSet { replica_set, .. } => Some(replica_set),
            Self::SingleNode { .. } => None,
        }
    }

    /// Get the underlying driver client.
    pub fn inner(&self) -> &Client {
        match self {
            Self::SingleNode { client, .. } | Self::ReplicaSet { client, .. } => client,
        }
    }

    /// Decoding options the client was built with.
    pub fn codec_options(&self) -> CodecOptions {
        match self {
            Self::SingleNode { codec, .. } | Self::ReplicaSet { codec, .. } => *codec,
        }
    }

    /// Get a database handle by name.
    pub fn database(&self, name: &str) -> Database {
        self.inner().database(name)
    }

    /// Open a connection now by pinging the `admin` database.
    pub async fn ping(&self) -> MongoResult<()> {
        debug!("Pinging MongoDB");
        self.database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("kind", &self.kind())
            .field("replica_set", &self.replica_set())
            .field("codec", &self.codec_options())
            .finish_non_exhaustive()
    }
}
