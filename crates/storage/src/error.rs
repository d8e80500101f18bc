//! Typed error enum for the storage layer.
//!
//! Lets callers match on specific failure modes (unknown topic, rejected
//! input, duplicate) instead of downcasting opaque boxes.

use std::path::PathBuf;

use thiserror::Error;
use wortschatz_core::VocabError;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Topic, column or row not found.
    #[error("not found: {entity} '{id}'")]
    NotFound { entity: &'static str, id: String },

    /// `UNIQUE` or `PRIMARY KEY` constraint violation.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Caller supplied data that cannot be stored (bad name, missing source value).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// SQL failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// No connection could be taken from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Writing a CSV dump failed.
    #[error("dump to {} failed: {source}", path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The translations document could not be read or written.
    #[error("translations file {}: {message}", path.display())]
    Translations { path: PathBuf, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether this error is a `UNIQUE` or `PRIMARY KEY` violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Whether the caller should see this as a rejected request.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub(crate) fn topic_not_found(topic: &str) -> Self {
        Self::NotFound { entity: "topic", id: topic.to_owned() }
    }
}

/// Custom `From<rusqlite::Error>` instead of a blanket `#[from]`:
///
/// - `UNIQUE` / `PRIMARY KEY` violations → `Duplicate`
/// - `NOT NULL` violations → `InvalidInput`
/// - everything else → `Database`
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        let extended_code = match &err {
            rusqlite::Error::SqliteFailure(e, _) => Some(e.extended_code),
            _ => None,
        };
        match extended_code {
            Some(
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
            ) => Self::Duplicate(err.to_string()),
            Some(rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL) => Self::InvalidInput(err.to_string()),
            _ => Self::Database(err),
        }
    }
}

impl From<VocabError> for StorageError {
    fn from(err: VocabError) -> Self {
        match err {
            VocabError::Io(e) => Self::Io(e),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
