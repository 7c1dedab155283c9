//! How decoded documents are represented.

use std::fmt;
use std::str::FromStr;

use bson::{Document, RawDocumentBuf};
use chrono::{DateTime, NaiveDateTime, Utc};
use mongodb::{Collection, Database};

use crate::error::{MongoError, MongoResult};
use crate::settings::keys;

/// In-memory container used for decoded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentClass {
    /// Ordered string-keyed map ([`bson::Document`]).
    #[default]
    Document,
    /// Undecoded BSON bytes ([`bson::RawDocumentBuf`]).
    Raw,
}

impl DocumentClass {
    /// Setting value naming this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Raw => "raw",
        }
    }

    /// Open `name` in `database` with this class as the document type.
    pub fn collection(self, database: &Database, name: &str) -> DocumentCollection {
        match self {
            Self::Document => DocumentCollection::Document(database.collection(name)),
            Self::Raw => DocumentCollection::Raw(database.collection(name)),
        }
    }
}

impl FromStr for DocumentClass {
    type Err = MongoError;

    fn from_str(s: &str) -> MongoResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "document" | "dict" => Ok(Self::Document),
            "raw" | "raw_document" => Ok(Self::Raw),
            other => Err(MongoError::invalid_setting(
                keys::DOCUMENT_CLASS,
                format!("unknown document class '{other}'"),
            )),
        }
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection whose document type follows the configured [`DocumentClass`].
#[derive(Debug, Clone)]
pub enum DocumentCollection {
    /// Documents decode into [`bson::Document`].
    Document(Collection<Document>),
    /// Documents stay as [`bson::RawDocumentBuf`].
    Raw(Collection<RawDocumentBuf>),
}

impl DocumentCollection {
    /// The collection name.
    pub fn name(&self) -> &str {
        match self {
            Self::Document(collection) => collection.name(),
            Self::Raw(collection) => collection.name(),
        }
    }

    /// The class the documents decode into.
    pub fn document_class(&self) -> DocumentClass {
        match self {
            Self::Document(_) => DocumentClass::Document,
            Self::Raw(_) => DocumentClass::Raw,
        }
    }
}

/// A decoded BSON datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedDateTime {
    /// Time-zone aware UTC timestamp.
    Aware(DateTime<Utc>),
    /// Naive timestamp, implicitly UTC.
    Naive(NaiveDateTime),
}

/// Options governing how the client's results are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    /// Document representation.
    pub document_class: DocumentClass,
    /// Whether datetimes carry a time zone.
    pub time_zone_aware: bool,
}

impl CodecOptions {
    /// Decode a BSON datetime according to `time_zone_aware`.
    pub fn decode_datetime(&self, value: bson::DateTime) -> DecodedDateTime {
        let utc = value.to_chrono();
        if self.time_zone_aware {
            DecodedDateTime::Aware(utc)
        } else {
            DecodedDateTime::Naive(utc.naive_utc())
        }
    }
}
