use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::warn;

use super::library::LocalStorage;
use super::StorageError;

/// A JSON value kept in local storage under a single key.
///
/// Reads fail soft: a missing key or unreadable text is reported as
/// "nothing stored" so callers can start from an empty value.
pub struct JsonStore<T> {
    storage: LocalStorage,
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonStore<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            key: self.key.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStore")
            .field("key", &self.key)
            .field("storage", &self.storage)
            .finish()
    }
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: LocalStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            _value: PhantomData,
        }
    }

    /// Load the stored value, or `None` if there is nothing usable
    pub fn load(&self) -> Option<T> {
        let text = match self.storage.get_item(&self.key) {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read local storage");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring malformed stored value");
                None
            }
        }
    }

    /// Replace the stored value
    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(value)?;
        self.storage.set_item(&self.key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn store() -> (LocalStorage, JsonStore<BTreeMap<String, u32>>) {
        let storage = LocalStorage::open_in_memory().unwrap();
        let store = JsonStore::new(storage.clone(), "counts");
        (storage, store)
    }

    #[test]
    fn test_load_absent_key() {
        let (_, store) = store();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_load_malformed_text_is_absent() {
        let (storage, store) = store();
        storage.set_item("counts", "{not json").unwrap();
        assert_eq!(store.load(), None);

        storage.set_item("counts", "").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let (storage, store) = store();
        let mut counts = BTreeMap::new();
        counts.insert("a".to_string(), 1);

        store.save(&counts).unwrap();

        assert_eq!(store.load(), Some(counts));
        // Pretty-printed with two-space indentation
        assert_eq!(
            storage.get_item("counts").unwrap().as_deref(),
            Some("{\n  \"a\": 1\n}")
        );
    }
}
