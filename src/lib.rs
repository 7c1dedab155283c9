//! # henson-mongodb
//!
//! MongoDB for Henson applications: one connection URI in, a validated
//! driver client and an authenticated database handle out.
//!
//! henson-mongodb provides:
//! - Connection string parsing for the standard `mongodb://` grammar
//! - Derivation of pool size, TLS, replica set and authentication settings
//! - Up-front validation of credential and X.509 certificate rules
//! - A lazily materialized database handle shared by all callers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use henson_mongodb::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), henson_mongodb::MongoError> {
//!     let mut app = Application::with_settings(
//!         "worker",
//!         Settings::with_uri("mongodb://localhost/testing"),
//!     );
//!
//!     let mongo = MongoDB::from_app(&mut app).await?;
//!     assert_eq!(mongo.client()?.kind(), ClientKind::SingleNode);
//!
//!     let db = mongo.db().await?;
//!     assert_eq!(db.name(), "testing");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Connection string parsing.
pub mod uri {
    pub use henson_uri::*;
}

/// Configuration, client construction and the extension itself.
pub mod ext {
    pub use henson_mongodb_core::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::uri::ConnectionString;
    pub use henson_mongodb_core::prelude::*;
}

// Re-export key types at the crate root
pub use henson_mongodb_core::{
    Application, AuthCredential, AuthMechanism, ClientHandle, ClientKind, Connection,
    ConnectionSettings, Extension, MongoDB, MongoError, MongoResult, Settings,
};
pub use henson_uri::{ConnectionString, UriError};
