/// State management module
///
/// This module handles all application state, including:
/// - The local key-value store (library.rs)
/// - JSON values persisted under a single key (persist.rs)
/// - Shared data structures (data.rs)
/// - The favorites map and its toggle algorithm (favorites.rs)
/// - The in-memory users / albums / photos maps (catalog.rs)

pub mod catalog;
pub mod data;
pub mod favorites;
pub mod library;
pub mod persist;

use thiserror::Error;

/// Errors raised by the local storage layer
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying SQLite database failed
    #[error("Storage database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A value could not be encoded to JSON
    #[error("Error while encoding stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage directory could not be created
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous holder of the connection panicked
    #[error("Storage connection lock poisoned")]
    Poisoned,
}
