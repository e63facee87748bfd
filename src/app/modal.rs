/// Full-size image overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Hidden,
    /// Showing the image at `url`
    Shown { url: String },
}

impl Modal {
    /// Show the overlay with the full-resolution image at `url`
    pub fn open(&mut self, url: impl Into<String>) {
        *self = Modal::Shown { url: url.into() };
    }

    pub fn close(&mut self) {
        *self = Modal::Hidden;
    }

    /// Image source of the overlay, if shown
    pub fn source(&self) -> Option<&str> {
        match self {
            Modal::Shown { url } => Some(url),
            Modal::Hidden => None,
        }
    }
}
