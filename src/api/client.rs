use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::mapping::{albums_from, photos_from, users_from, AlbumRecord, PhotoRecord, UserRecord};
use super::ApiError;
use crate::config::Config;
use crate::state::catalog::{Albums, Photos, Users};
use crate::state::data::{AlbumId, UserId};
use crate::state::favorites::FavoritesStore;

/// Read-only client for the catalog API
///
/// Cheap to clone; clones share the HTTP connection pool and the
/// favorites store.
#[derive(Debug, Clone)]
pub struct ServiceApi {
    client: Client,
    api_base: String,
    favorites: FavoritesStore,
}

impl ServiceApi {
    pub fn new(config: &Config, favorites: FavoritesStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_client(client, config.api_base.clone(), favorites))
    }

    fn with_client(client: Client, api_base: String, favorites: FavoritesStore) -> Self {
        Self {
            client,
            api_base,
            favorites,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// GET `{api_base}{path}` and decode the JSON body
    async fn get_resource<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "fetching");

        let response = self.client.get(&url).send().await?;
        ensure_success(response.status())?;

        Ok(response.json::<T>().await?)
    }

    /// All users with a non-empty name, keyed by id
    pub async fn get_users(&self) -> Result<Users, ApiError> {
        let records: Vec<UserRecord> = self.get_resource("users/").await?;
        Ok(users_from(records))
    }

    pub async fn get_albums(&self, user_id: UserId) -> Result<Albums, ApiError> {
        let records: Vec<AlbumRecord> = self
            .get_resource(&format!("albums?userId={user_id}"))
            .await?;
        Ok(albums_from(records))
    }

    /// Photos of an album, each marked with its current favorite status
    pub async fn get_photos(&self, album_id: AlbumId) -> Result<Photos, ApiError> {
        let records: Vec<PhotoRecord> = self
            .get_resource(&format!("photos?albumId={album_id}"))
            .await?;

        let favorites = self.favorites.load();
        Ok(photos_from(records, favorites.as_ref()))
    }

    /// Download raw image bytes (thumbnail or full size)
    pub async fn get_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        debug!(%url, "downloading image");

        let response = self.client.get(url).send().await?;
        ensure_success(response.status())?;

        Ok(response.bytes().await?.to_vec())
    }
}

fn ensure_success(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}
