use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use super::StorageError;

/// File name of the storage database inside the data directory
const DB_FILE_NAME: &str = "storage.db";

/// LocalStorage is a small string key / string value store backed by SQLite.
/// It plays the role browser local storage plays for a web page: values
/// survive restarts and are addressed by a single string key.
///
/// The handle is cheap to clone; all clones share one connection.
#[derive(Clone)]
pub struct LocalStorage {
    conn: Arc<Mutex<Connection>>,
    db_path: Option<PathBuf>,
}

impl LocalStorage {
    /// Open (or create) the store inside `data_dir`.
    ///
    /// The directory is created if it does not exist yet.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(data_dir)?;
        let db_path = data_dir.join(DB_FILE_NAME);

        let conn = Connection::open(&db_path)?;
        info!(path = %db_path.display(), "local storage opened");

        let storage = LocalStorage {
            conn: Arc::new(Mutex::new(conn)),
            db_path: Some(db_path),
        };
        storage.init_schema()?;

        Ok(storage)
    }

    /// Open a throwaway store that lives only as long as the handle
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let storage = LocalStorage {
            conn: Arc::new(Mutex::new(Connection::open_in_memory()?)),
            db_path: None,
        };
        storage.init_schema()?;

        Ok(storage)
    }

    /// Drop the key/value table, so every later read and write fails
    #[cfg(test)]
    pub fn drop_schema(&self) -> Result<(), StorageError> {
        self.lock()?.execute("DROP TABLE storage", [])?;
        Ok(())
    }

    /// Create the key/value table if it doesn't exist
    fn init_schema(&self) -> Result<(), StorageError> {
        self.lock()?.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Get the path to the database file (None for in-memory stores)
    pub fn path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// Read the text stored under `key`
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .lock()?
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let storage = LocalStorage::open_in_memory().unwrap();
        assert_eq!(storage.get_item("favorites").unwrap(), None);
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let storage = LocalStorage::open_in_memory().unwrap();

        storage.set_item("favorites", "{}").unwrap();
        storage.set_item("favorites", "{\"1\":{}}").unwrap();

        assert_eq!(
            storage.get_item("favorites").unwrap().as_deref(),
            Some("{\"1\":{}}")
        );
    }

    #[test]
    fn test_clones_share_the_connection() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let other = storage.clone();

        other.set_item("favorites", "{}").unwrap();

        assert_eq!(storage.get_item("favorites").unwrap().as_deref(), Some("{}"));
        assert!(storage.path().is_none());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.drop_schema().unwrap();

        assert!(matches!(storage.get_item("favorites"), Err(StorageError::Sqlite(_))));
        assert!(storage.set_item("favorites", "{}").is_err());
    }
}
