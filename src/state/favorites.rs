//! Favorite photos, persisted across sessions
//!
//! The store is the single source of truth for favorite status. Photos
//! loaded from the API are a cache of it and are joined against it
//! whenever an album is fetched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::data::{Photo, PhotoId};
use super::persist::JsonStore;
use super::StorageError;

/// Local storage key of the favorites map
pub const FAVORITES_KEY: &str = "favorites";

pub type FavoritesStore = JsonStore<Favorites>;

/// Map of photo id to the stored photo record
///
/// On disk this is a JSON object keyed by the decimal photo id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(BTreeMap<PhotoId, Photo>);

impl Favorites {
    pub fn contains(&self, id: PhotoId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn get(&self, id: PhotoId) -> Option<&Photo> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The stored records in ascending id order
    pub fn photos(&self) -> &BTreeMap<PhotoId, Photo> {
        &self.0
    }

    /// Add `photo` under its id, replacing an older record
    pub fn merged(mut self, photo: &Photo) -> Self {
        self.0.insert(photo.id, photo.clone());
        self
    }

    /// Rebuild the map from every record except `id`
    pub fn without(self, id: PhotoId) -> Self {
        Favorites(
            self.0
                .into_values()
                .filter(|photo| photo.id != id)
                .map(|photo| (photo.id, photo))
                .collect(),
        )
    }

    /// Remove a single record in place, returning it
    pub fn take(&mut self, id: PhotoId) -> Option<Photo> {
        self.0.remove(&id)
    }
}

/// Persist the favorite status of `photo`.
///
/// A favorite photo is merged into the stored map; a photo that is no
/// longer a favorite is dropped from it. Returns the map as saved.
pub fn store_favorite(store: &FavoritesStore, photo: &Photo) -> Result<Favorites, StorageError> {
    let current = store.load().unwrap_or_default();

    let next = if photo.is_favorite {
        current.merged(photo)
    } else {
        current.without(photo.id)
    };

    store.save(&next)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::library::LocalStorage;

    fn photo(id: PhotoId, is_favorite: bool) -> Photo {
        Photo {
            id,
            album_id: 3,
            title: "T".to_string(),
            url: "u".to_string(),
            thumbnail_url: "t".to_string(),
            is_favorite,
        }
    }

    fn setup() -> (LocalStorage, FavoritesStore) {
        let storage = LocalStorage::open_in_memory().unwrap();
        let store = FavoritesStore::new(storage.clone(), FAVORITES_KEY);
        (storage, store)
    }

    fn stored_json(storage: &LocalStorage) -> serde_json::Value {
        let text = storage.get_item(FAVORITES_KEY).unwrap().unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_favorite_into_absent_store() {
        let (storage, store) = setup();
        assert!(store.load().is_none());

        store_favorite(&store, &photo(7, true)).unwrap();

        assert_eq!(
            stored_json(&storage),
            serde_json::json!({
                "7": {
                    "id": 7,
                    "albumId": 3,
                    "title": "T",
                    "url": "u",
                    "thumbnailUrl": "t",
                    "isFavorite": true
                }
            })
        );
    }

    #[test]
    fn test_unfavorite_last_photo_empties_store() {
        let (storage, store) = setup();
        store_favorite(&store, &photo(7, true)).unwrap();

        let saved = store_favorite(&store, &photo(7, false)).unwrap();

        assert!(saved.is_empty());
        assert_eq!(stored_json(&storage), serde_json::json!({}));
    }

    #[test]
    fn test_toggle_twice_restores_store() {
        let (_, store) = setup();
        store_favorite(&store, &photo(1, true)).unwrap();
        store_favorite(&store, &photo(2, true)).unwrap();
        let before = store.load().unwrap();

        store_favorite(&store, &photo(5, true)).unwrap();
        store_favorite(&store, &photo(5, false)).unwrap();

        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn test_unfavorite_keeps_other_records() {
        let (_, store) = setup();
        store_favorite(&store, &photo(1, true)).unwrap();
        store_favorite(&store, &photo(2, true)).unwrap();

        let saved = store_favorite(&store, &photo(1, false)).unwrap();

        assert_eq!(saved.len(), 1);
        assert!(!saved.contains(1));
        assert_eq!(saved.get(2), Some(&photo(2, true)));
    }

    #[test]
    fn test_keys_round_trip_as_strings() {
        let favorites = Favorites::default().merged(&photo(12, true));
        let text = serde_json::to_string(&favorites).unwrap();

        assert!(text.starts_with("{\"12\":"));
        let back: Favorites = serde_json::from_str(&text).unwrap();
        assert_eq!(back, favorites);
    }
}
