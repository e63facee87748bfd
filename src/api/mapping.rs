//! Raw API records and their reshaping into id-keyed maps

use serde::Deserialize;

use crate::state::catalog::{Albums, Photos, Users};
use crate::state::data::{Album, AlbumId, Photo, PhotoId, User, UserId};
use crate::state::favorites::Favorites;

/// A user as returned by `users/`. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
}

/// An album as returned by `albums?userId=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    pub id: AlbumId,
    pub user_id: UserId,
    #[serde(default)]
    pub title: String,
}

/// A photo as returned by `photos?albumId=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub album_id: AlbumId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

/// Key users by id, dropping those without a name
pub fn users_from(records: Vec<UserRecord>) -> Users {
    records
        .into_iter()
        .filter_map(|record| match record.name {
            Some(name) if !name.is_empty() => Some((record.id, User { id: record.id, name })),
            _ => None,
        })
        .collect()
}

pub fn albums_from(records: Vec<AlbumRecord>) -> Albums {
    records
        .into_iter()
        .map(|record| {
            let album = Album {
                id: record.id,
                user_id: record.user_id,
                name: record.title,
            };
            (album.id, album)
        })
        .collect()
}

/// Key photos by id, marking those present in `favorites`
///
/// The favorites map is read once by the caller for the whole batch.
pub fn photos_from(records: Vec<PhotoRecord>, favorites: Option<&Favorites>) -> Photos {
    records
        .into_iter()
        .map(|record| {
            let is_favorite = favorites.is_some_and(|f| f.contains(record.id));
            let photo = Photo {
                id: record.id,
                album_id: record.album_id,
                title: record.title,
                url: record.url,
                thumbnail_url: record.thumbnail_url,
                is_favorite,
            };
            (photo.id, photo)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_without_name_are_dropped() {
        let records: Vec<UserRecord> = serde_json::from_str(
            r#"[{"id":1,"name":"Ann"},{"id":2,"name":""},{"id":3},{"id":4,"name":null}]"#,
        )
        .unwrap();

        let users = users_from(records);

        assert_eq!(users.len(), 1);
        assert_eq!(users.get(&1).map(|u| u.name.as_str()), Some("Ann"));
    }

    #[test]
    fn test_albums_take_title_as_name() {
        let records: Vec<AlbumRecord> = serde_json::from_str(
            r#"[{"id":10,"userId":1,"title":"Holidays","extra":true}]"#,
        )
        .unwrap();

        let albums = albums_from(records);

        assert_eq!(
            albums.get(&10),
            Some(&Album {
                id: 10,
                user_id: 1,
                name: "Holidays".to_string(),
            })
        );
    }

    #[test]
    fn test_photos_joined_with_favorites() {
        let records: Vec<PhotoRecord> = serde_json::from_str(
            r#"[
                {"id":7,"albumId":3,"title":"T","url":"u","thumbnailUrl":"t"},
                {"id":8,"albumId":3,"title":"S","url":"v","thumbnailUrl":"w"}
            ]"#,
        )
        .unwrap();
        let favorite = Photo {
            id: 7,
            album_id: 3,
            title: "T".to_string(),
            url: "u".to_string(),
            thumbnail_url: "t".to_string(),
            is_favorite: true,
        };
        let favorites = Favorites::default().merged(&favorite);

        let photos = photos_from(records.clone(), Some(&favorites));
        assert!(photos[&7].is_favorite);
        assert!(!photos[&8].is_favorite);

        let photos = photos_from(records, None);
        assert!(photos.values().all(|p| !p.is_favorite));
    }
}
