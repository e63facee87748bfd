use iced::widget::image;
use iced::{Element, Task, Theme};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod app;
mod config;
mod state;
mod ui;

use api::{ApiError, ServiceApi};
use app::tabs::Tab;
use app::{Command, Controller, Intent, Response};
use config::Config;
use state::favorites::{FavoritesStore, FAVORITES_KEY};
use state::library::LocalStorage;
use state::StorageError;

/// Errors that stop the application from starting or running
#[derive(Debug, Error)]
enum Error {
    #[error("Local storage unavailable: {0}")]
    Storage(#[from] StorageError),

    #[error("Could not set up the HTTP client: {0}")]
    Api(#[from] ApiError),

    #[error("GUI error: {0}")]
    Gui(#[from] iced::Error),
}

/// Main application state
struct PhotoCatalog {
    /// Catalog, favorites, tabs and modal
    controller: Controller,
    /// Client for the catalog API
    api: ServiceApi,
    /// Thumbnails and full-size images downloaded so far
    images: ui::Images,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The user did something in the window
    Intent(Intent),
    /// A catalog fetch finished
    Response(Response),
    /// A thumbnail download finished
    ThumbnailLoaded(String, Result<image::Handle, ApiError>),
    /// A full-size image download finished
    ImageLoaded(String, Result<image::Handle, ApiError>),
}

impl PhotoCatalog {
    /// Create the application and open the catalog tab
    fn new(controller: Controller, api: ServiceApi) -> (Self, Task<Message>) {
        let mut catalog = PhotoCatalog {
            controller,
            api,
            images: ui::Images::new(),
        };

        let startup = catalog.update(Message::Intent(Intent::SwitchTab(Tab::Catalog)));
        (catalog, startup)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let commands = match message {
            Message::Intent(intent) => {
                let commands = self.controller.dispatch(intent);
                self.images
                    .release_full_size(self.controller.modal().source());
                commands
            }
            Message::Response(response) => self.controller.receive(response),
            Message::ThumbnailLoaded(url, Ok(handle)) => {
                self.images.insert_thumbnail(url, handle);
                Vec::new()
            }
            Message::ImageLoaded(url, Ok(handle)) => {
                self.images
                    .insert_full_size(url, handle, self.controller.modal().source());
                Vec::new()
            }
            Message::ThumbnailLoaded(url, Err(e)) | Message::ImageLoaded(url, Err(e)) => {
                warn!(%url, error = %e, "image download failed");
                Vec::new()
            }
        };

        Task::batch(commands.into_iter().map(|command| self.perform(command)))
    }

    /// Run a controller command in the background
    fn perform(&self, command: Command) -> Task<Message> {
        let api = self.api.clone();

        match command {
            Command::FetchUsers => Task::perform(
                async move { api.get_users().await },
                |result| Message::Response(Response::Users(result)),
            ),
            Command::FetchAlbums(user_id) => Task::perform(
                async move { api.get_albums(user_id).await },
                move |result| Message::Response(Response::Albums(user_id, result)),
            ),
            Command::FetchPhotos(album_id) => Task::perform(
                async move { api.get_photos(album_id).await },
                move |result| Message::Response(Response::Photos(album_id, result)),
            ),
            Command::LoadThumbnail(url) => self.download(url, Message::ThumbnailLoaded),
            Command::LoadImage(url) => self.download(url, Message::ImageLoaded),
        }
    }

    /// Fetch image bytes unless `url` is already in memory
    fn download(
        &self,
        url: String,
        done: fn(String, Result<image::Handle, ApiError>) -> Message,
    ) -> Task<Message> {
        if self.images.contains(&url) {
            return Task::none();
        }
        let api = self.api.clone();
        let target = url.clone();
        Task::perform(
            async move { api.get_image(&target).await },
            move |result| done(url.clone(), result.map(image::Handle::from_bytes)),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::view(&self.controller, &self.images).map(Message::Intent)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> Result<(), Error> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    info!(api_base = %config.api_base, "starting photo catalog");

    let storage = LocalStorage::open(&config.data_dir)?;
    if let Some(path) = storage.path() {
        info!(path = %path.display(), "favorites are kept in local storage");
    }
    let favorites = FavoritesStore::new(storage, FAVORITES_KEY);
    let api = ServiceApi::new(&config, favorites.clone())?;
    let controller = Controller::new(favorites);

    iced::application("Photo Catalog", PhotoCatalog::update, PhotoCatalog::view)
        .theme(PhotoCatalog::theme)
        .centered()
        .run_with(move || PhotoCatalog::new(controller, api))?;

    Ok(())
}
