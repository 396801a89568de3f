//! Persistence boundary: keyed JSON blob storage.
//!
//! # Responsibility
//! - Define the load/save contract the store round-trips collections
//!   through.
//! - Keep SQLite bootstrap and query details inside this boundary.
//!
//! # Invariants
//! - Implementations treat values as opaque strings; decoding (and lenient
//!   recovery from malformed content) is the store's job.
//! - A missing key loads as `None`, never as an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from blob storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// The database schema is newer than this binary understands.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Keyed blob persistence contract.
///
/// The core only requires that each collection round-trips through this
/// interface; everything else about the encoding is an implementation
/// detail of the backend.
pub trait BlobStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;
}
