/// The two panels of the window and which one is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Catalog,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Catalog, Tab::Favorites];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Catalog => "Catalog",
            Tab::Favorites => "Favorites",
        }
    }
}

/// A change of active tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    pub from: Option<Tab>,
    pub to: Tab,
}

/// At most one tab is active; none until the first switch.
#[derive(Debug, Default)]
pub struct Tabs {
    active: Option<Tab>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Tab> {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == Some(tab)
    }

    /// Activate `tab`, or do nothing if it is already active
    pub fn switch(&mut self, tab: Tab) -> Option<Switch> {
        if self.is_active(tab) {
            return None;
        }
        let from = self.active.replace(tab);
        Some(Switch { from, to: tab })
    }
}
