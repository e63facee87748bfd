use std::collections::BTreeMap;

use super::data::{Album, AlbumId, Photo, PhotoId, User, UserId};

pub type Users = BTreeMap<UserId, User>;
pub type Albums = BTreeMap<AlbumId, Album>;
pub type Photos = BTreeMap<PhotoId, Photo>;

/// In-memory catalog: every user, album and photo fetched this session.
///
/// Users are replaced on each catalog load. Albums and photos are merged,
/// so several expanded nodes can coexist without overwriting each other.
#[derive(Debug, Default)]
pub struct AppState {
    users: Users,
    albums: Albums,
    photos: Photos,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn album(&self, id: AlbumId) -> Option<&Album> {
        self.albums.get(&id)
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.get(&id)
    }

    pub fn set_users(&mut self, users: Users) {
        self.users = users;
    }

    pub fn merge_albums(&mut self, albums: Albums) {
        self.albums.extend(albums);
    }

    pub fn merge_photos(&mut self, photos: Photos) {
        self.photos.extend(photos);
    }

    /// Flip the favorite flag of a loaded photo, returning the updated photo
    pub fn toggle_favorite(&mut self, id: PhotoId) -> Option<&Photo> {
        let photo = self.photos.get_mut(&id)?;
        photo.is_favorite = !photo.is_favorite;
        Some(photo)
    }

    /// Set the favorite flag of a loaded photo. Unknown ids are ignored.
    pub fn set_favorite(&mut self, id: PhotoId, is_favorite: bool) {
        if let Some(photo) = self.photos.get_mut(&id) {
            photo.is_favorite = is_favorite;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: AlbumId, user_id: UserId) -> Album {
        Album {
            id,
            user_id,
            name: format!("album {}", id),
        }
    }

    fn photo(id: PhotoId) -> Photo {
        Photo {
            id,
            album_id: 1,
            title: String::new(),
            url: String::new(),
            thumbnail_url: String::new(),
            is_favorite: false,
        }
    }

    #[test]
    fn test_albums_merge_across_fetches() {
        let mut state = AppState::new();

        state.merge_albums(BTreeMap::from([(1, album(1, 1)), (2, album(2, 1))]));
        state.merge_albums(BTreeMap::from([(11, album(11, 2))]));

        assert!(state.album(1).is_some());
        assert!(state.album(2).is_some());
        assert_eq!(state.album(11).map(|a| a.user_id), Some(2));
    }

    #[test]
    fn test_users_are_replaced() {
        let mut state = AppState::new();
        let ann = User { id: 1, name: "Ann".to_string() };
        let bob = User { id: 2, name: "Bob".to_string() };

        state.set_users(BTreeMap::from([(1, ann)]));
        state.set_users(BTreeMap::from([(2, bob.clone())]));

        assert!(state.user(1).is_none());
        assert_eq!(state.user(2), Some(&bob));
    }

    #[test]
    fn test_toggle_favorite() {
        let mut state = AppState::new();
        state.merge_photos(BTreeMap::from([(4, photo(4))]));

        assert_eq!(state.toggle_favorite(4).map(|p| p.is_favorite), Some(true));
        assert_eq!(state.toggle_favorite(4).map(|p| p.is_favorite), Some(false));
        assert!(state.toggle_favorite(99).is_none());
    }

    #[test]
    fn test_set_favorite_ignores_unknown_photo() {
        let mut state = AppState::new();
        state.merge_photos(BTreeMap::from([(4, photo(4))]));

        state.set_favorite(4, true);
        state.set_favorite(5, true);

        assert!(state.photo(4).unwrap().is_favorite);
        assert!(state.photo(5).is_none());
    }
}
