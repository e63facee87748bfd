/// User interface
///
/// Widgets are built from the controller's state on every frame:
/// - Fragment producers (fragment.rs)
/// - The catalog tree, the favorites grid and the image overlay (here)
///
/// Every widget emits an `Intent`; the caller maps it into its own message.

pub mod fragment;

use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, row, scrollable, stack, text,
    Column, Row, Space,
};
use iced::{Alignment, Color, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::app::outline::{Disclosure, NodeKey};
use crate::app::tabs::Tab;
use crate::app::{Controller, Intent};
use crate::state::data::{EntityKind, Photo};
use fragment::{fragment, Fragment, Template};

/// Downloaded images, keyed by the url they came from.
///
/// Thumbnails are kept for the session. Only the full-size image currently
/// shown in the overlay is kept; it is released when the overlay closes.
#[derive(Debug, Default)]
pub struct Images {
    thumbnails: HashMap<String, image::Handle>,
    full_size: Option<(String, image::Handle)>,
}

impl Images {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&image::Handle> {
        self.thumbnails.get(url).or_else(|| match &self.full_size {
            Some((shown, handle)) if shown == url => Some(handle),
            _ => None,
        })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    pub fn insert_thumbnail(&mut self, url: String, handle: image::Handle) {
        self.thumbnails.insert(url, handle);
    }

    /// Keep a downloaded full-size image if it is still the one shown
    pub fn insert_full_size(&mut self, url: String, handle: image::Handle, shown: Option<&str>) {
        if shown == Some(url.as_str()) {
            self.full_size = Some((url, handle));
        }
    }

    /// Drop the full-size image unless it is the one shown
    pub fn release_full_size(&mut self, shown: Option<&str>) {
        if let Some((url, _)) = &self.full_size {
            if shown != Some(url.as_str()) {
                self.full_size = None;
            }
        }
    }
}

/// Side of a thumbnail in the photo grid
const THUMBNAIL_SIZE: f32 = 150.0;
/// Indentation of each nesting level in the catalog
const INDENT: f32 = 24.0;

/// Build the whole window
pub fn view<'a>(ctl: &'a Controller, images: &'a Images) -> Element<'a, Intent> {
    let panel: Element<'a, Intent> = match ctl.tabs().active() {
        Some(Tab::Catalog) => catalog_panel(ctl, images),
        Some(Tab::Favorites) => favorites_panel(ctl, images),
        None => Space::new(Length::Fill, Length::Fill).into(),
    };

    let mut content: Column<'a, Intent> = column![
        tab_bar(ctl),
        scrollable(panel).width(Length::Fill).height(Length::Fill),
    ]
    .spacing(16)
    .padding(20);

    if let Some(status) = ctl.status() {
        content = content.push(text(status).size(14));
    }

    let base = container(content)
        .width(Length::Fill)
        .height(Length::Fill);

    match ctl.modal().source() {
        Some(url) => image_overlay(base, url, images),
        None => base.into(),
    }
}

fn tab_bar<'a>(ctl: &'a Controller) -> Element<'a, Intent> {
    let links = Tab::ALL.iter().map(|&tab| -> Element<'a, Intent> {
        let style = if ctl.tabs().is_active(tab) {
            button::primary
        } else {
            button::secondary
        };

        button(text(tab.title()))
            .style(style)
            .padding(8)
            .on_press(Intent::SwitchTab(tab))
            .into()
    });

    Row::with_children(links).spacing(8).into()
}

fn catalog_panel<'a>(ctl: &'a Controller, images: &'a Images) -> Element<'a, Intent> {
    match ctl.outline().root() {
        Some(root) => view_fragment(ctl, images, root),
        None => text("Loading catalog...").into(),
    }
}

/// Render a fragment attached somewhere in the catalog tree
fn view_fragment<'a>(
    ctl: &'a Controller,
    images: &'a Images,
    fragment: &'a Fragment,
) -> Element<'a, Intent> {
    if fragment.is_empty() {
        return text(format!("No {}s here.", fragment.kind().name()))
            .size(14)
            .into();
    }

    match fragment.template() {
        Template::Item => Column::with_children(
            fragment
                .ids()
                .iter()
                .filter_map(|&id| view_item(ctl, images, fragment.kind(), id)),
        )
        .spacing(4)
        .into(),
        Template::Photo => photo_grid(
            fragment
                .ids()
                .iter()
                .filter_map(|&id| ctl.state().photo(id))
                .map(|photo| photo_card(photo, images, Intent::ToggleFavorite(photo.id))),
        ),
    }
}

/// A user or album entry: its disclosure button, then its children if open
fn view_item<'a>(
    ctl: &'a Controller,
    images: &'a Images,
    kind: EntityKind,
    id: u64,
) -> Option<Element<'a, Intent>> {
    let node = NodeKey::for_entry(kind, id)?;
    let name = match node {
        NodeKey::User(id) => ctl.state().user(id)?.name.as_str(),
        NodeKey::Album(id) => ctl.state().album(id)?.name.as_str(),
    };

    let disclosure = ctl.outline().disclosure(node);
    let (marker, intent) = match disclosure {
        Disclosure::Collapsed => ("▸", Intent::Expand(node)),
        Disclosure::Pending | Disclosure::Expanded(_) => ("▾", Intent::Collapse(node)),
    };

    let toggle = button(text(format!("{marker} {name}")))
        .style(button::text)
        .on_press(intent);

    let children: Element<'a, Intent> = match disclosure {
        Disclosure::Collapsed => return Some(toggle.into()),
        Disclosure::Pending => text(format!("Loading {}s...", node.child_kind().name()))
            .size(14)
            .into(),
        Disclosure::Expanded(fragment) => view_fragment(ctl, images, fragment),
    };

    Some(
        column![toggle, row![Space::with_width(Length::Fixed(INDENT)), children]]
            .spacing(4)
            .into(),
    )
}

fn favorites_panel<'a>(ctl: &'a Controller, images: &'a Images) -> Element<'a, Intent> {
    let favorites = ctl.favorites_view();
    if favorites.is_empty() {
        return text("Nothing has been added to favorites!").size(24).into();
    }

    let listing = fragment(EntityKind::Photo, favorites.photos());
    photo_grid(
        listing
            .ids()
            .iter()
            .filter_map(|&id| favorites.get(id))
            .map(|photo| photo_card(photo, images, Intent::RemoveFavorite(photo.id))),
    )
}

fn photo_grid<'a>(cards: impl Iterator<Item = Element<'a, Intent>>) -> Element<'a, Intent> {
    Wrap::with_elements(cards.collect())
        .spacing(12.0)
        .line_spacing(12.0)
        .into()
}

/// Star control, clickable thumbnail and title of one photo
fn photo_card<'a>(photo: &'a Photo, images: &'a Images, on_star: Intent) -> Element<'a, Intent> {
    let star = button(text(if photo.is_favorite { "★" } else { "☆" }).size(18))
        .style(if photo.is_favorite {
            button::primary
        } else {
            button::secondary
        })
        .on_press(on_star);

    let thumbnail: Element<'a, Intent> = match images.get(&photo.thumbnail_url) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(THUMBNAIL_SIZE))
            .height(Length::Fixed(THUMBNAIL_SIZE))
            .into(),
        None => container(text("..."))
            .center(Length::Fixed(THUMBNAIL_SIZE))
            .into(),
    };

    let picture = button(thumbnail)
        .style(button::text)
        .padding(0)
        .on_press(Intent::OpenImage(photo.url.clone()));

    column![star, picture, text(photo.title.as_str()).size(12)]
        .spacing(4)
        .width(Length::Fixed(THUMBNAIL_SIZE))
        .into()
}

/// Full-size image on top of `base`; clicking outside closes it
fn image_overlay<'a>(
    base: impl Into<Element<'a, Intent>>,
    url: &'a str,
    images: &'a Images,
) -> Element<'a, Intent> {
    let picture: Element<'a, Intent> = match images.get(url) {
        Some(handle) => image(handle.clone()).into(),
        None => text("Loading image...").into(),
    };

    let content = container(
        column![
            button(text("Close"))
                .style(button::secondary)
                .on_press(Intent::CloseImage),
            picture,
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(16)
    .style(container::rounded_box);

    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into()
                ),
                ..container::Style::default()
            }))
            .on_press(Intent::CloseImage)
        )
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> image::Handle {
        image::Handle::from_bytes(vec![0u8; 4])
    }

    #[test]
    fn test_full_size_released_when_overlay_closes() {
        let mut images = Images::new();
        images.insert_thumbnail("t".to_string(), handle());
        images.insert_full_size("u".to_string(), handle(), Some("u"));
        assert!(images.contains("u"));

        images.release_full_size(Some("u"));
        assert!(images.contains("u"));

        images.release_full_size(None);
        assert!(!images.contains("u"));
        assert!(images.contains("t"));
    }

    #[test]
    fn test_late_full_size_download_is_not_kept() {
        let mut images = Images::new();

        images.insert_full_size("u".to_string(), handle(), None);
        assert!(!images.contains("u"));

        images.insert_full_size("u".to_string(), handle(), Some("v"));
        assert!(!images.contains("u"));
    }

    #[test]
    fn test_opening_another_image_replaces_the_previous() {
        let mut images = Images::new();
        images.insert_full_size("u".to_string(), handle(), Some("u"));

        images.insert_full_size("v".to_string(), handle(), Some("v"));

        assert!(!images.contains("u"));
        assert!(images.contains("v"));
    }
}
