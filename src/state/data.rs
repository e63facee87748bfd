//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the API layer, the favorites store and the UI layer.

use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type AlbumId = u64;
pub type PhotoId = u64;

/// A catalog user. Only users with a non-empty name are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// An album belonging to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: AlbumId,
    pub user_id: UserId,
    /// Display name (the API calls it `title`)
    pub name: String,
}

/// A single photo in an album
///
/// This is also the record stored in the favorites map, so the
/// on-disk field names follow the API's camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub album_id: AlbumId,
    pub title: String,
    /// Full-resolution image, shown in the modal
    pub url: String,
    /// Small image, shown in lists
    pub thumbnail_url: String,
    /// Joined from the favorites store when the photo is fetched
    pub is_favorite: bool,
}

/// The kinds of entity a fragment can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Album,
    Photo,
}

impl EntityKind {
    /// Attribute-style name of the kind (`user`, `album`, `photo`)
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Album => "album",
            EntityKind::Photo => "photo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_uses_camel_case_on_disk() {
        let photo = Photo {
            id: 7,
            album_id: 3,
            title: "T".to_string(),
            url: "u".to_string(),
            thumbnail_url: "t".to_string(),
            is_favorite: true,
        };

        let value = serde_json::to_value(&photo).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "albumId": 3,
                "title": "T",
                "url": "u",
                "thumbnailUrl": "t",
                "isFavorite": true,
            })
        );
    }
}
