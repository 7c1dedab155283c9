//! # henson-uri
//!
//! Parsing for the standard MongoDB connection string grammar:
//!
//! ```text
//! mongodb://[username[:password]@]host1[:port1][,host2[:port2],...][/[database[.collection]][?options]]
//! ```
//!
//! Credentials and the namespace are percent-decoded. Option keys are
//! case-insensitive and stored lower-cased, so `replicaSet` and `replicaset`
//! are the same option.
//!
//! ```rust
//! use henson_uri::{ConnectionString, DEFAULT_PORT};
//!
//! let conn = ConnectionString::parse("mongodb://localhost/testing").unwrap();
//! assert_eq!(conn.database(), Some("testing"));
//! assert_eq!(conn.hosts()[0].port, DEFAULT_PORT);
//! ```

mod error;
mod parser;

pub use error::{UriError, UriResult};
pub use parser::{
    ConnectionString, DEFAULT_PORT, Host, ParsedUri, SCHEME, parse_bool, parse_positive_u32,
};
