/// Application controller
///
/// This module turns user intents and API responses into state changes:
/// - Which catalog nodes are expanded (outline.rs)
/// - Which tab is active (tabs.rs)
/// - The full-size image overlay (modal.rs)
///
/// The controller never performs I/O on the network itself. It answers
/// every intent with the commands the runtime should execute, and the
/// results come back through `Controller::receive`.

pub mod modal;
pub mod outline;
pub mod tabs;

use tracing::{debug, error, info, warn};

use crate::api::ApiError;
use crate::state::catalog::{Albums, AppState, Photos, Users};
use crate::state::data::{AlbumId, EntityKind, PhotoId, UserId};
use crate::state::favorites::{store_favorite, Favorites, FavoritesStore};
use crate::ui::fragment::fragment;
use modal::Modal;
use outline::{NodeKey, Outline};
use tabs::{Tab, Tabs};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open a collapsed catalog node
    Expand(NodeKey),
    /// Close an open catalog node
    Collapse(NodeKey),
    /// Star pressed on a photo in the catalog
    ToggleFavorite(PhotoId),
    /// Star pressed on a photo in the favorites tab
    RemoveFavorite(PhotoId),
    /// Show the full-resolution image at this url
    OpenImage(String),
    CloseImage,
    SwitchTab(Tab),
}

/// Result of a command, delivered back to the controller
#[derive(Debug, Clone)]
pub enum Response {
    Users(Result<Users, ApiError>),
    Albums(UserId, Result<Albums, ApiError>),
    Photos(AlbumId, Result<Photos, ApiError>),
}

/// Work the runtime should carry out on the controller's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchUsers,
    FetchAlbums(UserId),
    FetchPhotos(AlbumId),
    /// Download a photo thumbnail for the grid
    LoadThumbnail(String),
    /// Download the full-size image shown in the overlay
    LoadImage(String),
}

/// Owns all application state and applies intents to it
#[derive(Debug)]
pub struct Controller {
    state: AppState,
    outline: Outline,
    tabs: Tabs,
    modal: Modal,
    favorites: FavoritesStore,
    /// What the favorites tab shows, loaded each time it is opened
    favorites_view: Favorites,
    /// Last error worth telling the user about
    status: Option<String>,
}

impl Controller {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self {
            state: AppState::new(),
            outline: Outline::new(),
            tabs: Tabs::new(),
            modal: Modal::default(),
            favorites,
            favorites_view: Favorites::default(),
            status: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn favorites_view(&self) -> &Favorites {
        &self.favorites_view
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Apply a user intent
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Command> {
        match intent {
            Intent::Expand(node) => {
                if !self.outline.expand(node) {
                    return Vec::new();
                }
                match node {
                    NodeKey::User(id) => vec![Command::FetchAlbums(id)],
                    NodeKey::Album(id) => vec![Command::FetchPhotos(id)],
                }
            }
            Intent::Collapse(node) => {
                self.outline.collapse(node);
                Vec::new()
            }
            Intent::ToggleFavorite(id) => {
                self.toggle_favorite(id);
                Vec::new()
            }
            Intent::RemoveFavorite(id) => {
                self.remove_favorite(id);
                Vec::new()
            }
            Intent::OpenImage(url) => {
                self.modal.open(url.clone());
                vec![Command::LoadImage(url)]
            }
            Intent::CloseImage => {
                self.modal.close();
                Vec::new()
            }
            Intent::SwitchTab(tab) => self.switch_tab(tab),
        }
    }

    /// Apply the result of a fetch
    pub fn receive(&mut self, response: Response) -> Vec<Command> {
        match response {
            Response::Users(Ok(users)) => {
                if !self.tabs.is_active(Tab::Catalog) || self.outline.root().is_some() {
                    debug!(count = users.len(), "dropping users nobody is waiting for");
                    return Vec::new();
                }
                info!(count = users.len(), "users loaded");
                self.outline.mount_root(fragment(EntityKind::User, &users));
                self.state.set_users(users);
                Vec::new()
            }
            Response::Users(Err(e)) => {
                self.report("Failed to load users", &e);
                Vec::new()
            }
            Response::Albums(user_id, Ok(albums)) => {
                let listing = fragment(EntityKind::Album, &albums);
                self.state.merge_albums(albums);
                if !self.outline.attach(NodeKey::User(user_id), listing) {
                    debug!(user_id, "dropping albums for a node that is no longer waiting");
                }
                Vec::new()
            }
            Response::Albums(user_id, Err(e)) => {
                self.outline.fail(NodeKey::User(user_id));
                self.report("Failed to load albums", &e);
                Vec::new()
            }
            Response::Photos(album_id, Ok(photos)) => {
                let listing = fragment(EntityKind::Photo, &photos);
                let thumbnails: Vec<Command> = photos
                    .values()
                    .map(|photo| Command::LoadThumbnail(photo.thumbnail_url.clone()))
                    .collect();
                self.state.merge_photos(photos);

                if self.outline.attach(NodeKey::Album(album_id), listing) {
                    thumbnails
                } else {
                    debug!(album_id, "dropping photos for a node that is no longer waiting");
                    Vec::new()
                }
            }
            Response::Photos(album_id, Err(e)) => {
                self.outline.fail(NodeKey::Album(album_id));
                self.report("Failed to load photos", &e);
                Vec::new()
            }
        }
    }

    fn switch_tab(&mut self, tab: Tab) -> Vec<Command> {
        let Some(switch) = self.tabs.switch(tab) else {
            return Vec::new();
        };
        debug!(from = ?switch.from, to = ?switch.to, "switching tab");
        self.status = None;

        match switch.to {
            Tab::Catalog => {
                self.outline.clear();
                self.favorites_view = Favorites::default();
                vec![Command::FetchUsers]
            }
            Tab::Favorites => {
                self.favorites_view = self.favorites.load().unwrap_or_default();
                info!(count = self.favorites_view.len(), "favorites loaded");
                self.favorites_view
                    .photos()
                    .values()
                    .map(|photo| Command::LoadThumbnail(photo.thumbnail_url.clone()))
                    .collect()
            }
        }
    }

    fn toggle_favorite(&mut self, id: PhotoId) {
        let Some(photo) = self.state.toggle_favorite(id).cloned() else {
            warn!(photo_id = id, "favorite toggled on a photo that is not loaded");
            return;
        };

        if let Err(e) = store_favorite(&self.favorites, &photo) {
            // Keep memory in line with what is actually stored
            self.state.set_favorite(id, !photo.is_favorite);
            error!(photo_id = id, error = %e, "failed to save favorites");
            self.status = Some(format!("Could not save favorites: {e}"));
        }
    }

    fn remove_favorite(&mut self, id: PhotoId) {
        let Some(mut photo) = self.favorites_view.get(id).cloned() else {
            debug!(photo_id = id, "photo already gone from favorites");
            return;
        };

        photo.is_favorite = false;
        match store_favorite(&self.favorites, &photo) {
            Ok(_) => {
                self.favorites_view.take(id);
                self.state.set_favorite(id, false);
            }
            Err(e) => {
                error!(photo_id = id, error = %e, "failed to save favorites");
                self.status = Some(format!("Could not save favorites: {e}"));
            }
        }
    }

    fn report(&mut self, what: &str, e: &ApiError) {
        error!(error = %e, "{what}");
        self.status = Some(format!("{what}: {e}"));
    }
}
