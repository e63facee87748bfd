//! Disclosure state of the catalog tree
//!
//! The outline records which fragment hangs under which node. A node is
//! collapsed when it has no entry, pending while its children are being
//! fetched, and expanded once the fragment is attached.

use std::collections::HashMap;

use crate::state::data::{AlbumId, EntityKind, UserId};
use crate::ui::fragment::Fragment;

/// A catalog node that can be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKey {
    User(UserId),
    Album(AlbumId),
}

impl NodeKey {
    /// Kind of entity listed under this node once expanded
    pub fn child_kind(self) -> EntityKind {
        match self {
            NodeKey::User(_) => EntityKind::Album,
            NodeKey::Album(_) => EntityKind::Photo,
        }
    }

    /// The expandable node for an entry of a fragment, if the kind has one
    pub fn for_entry(kind: EntityKind, id: u64) -> Option<NodeKey> {
        match kind {
            EntityKind::User => Some(NodeKey::User(id)),
            EntityKind::Album => Some(NodeKey::Album(id)),
            EntityKind::Photo => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disclosure {
    Collapsed,
    Pending,
    Expanded(Fragment),
}

#[derive(Debug, Default)]
pub struct Outline {
    root: Option<Fragment>,
    nodes: HashMap<NodeKey, Disclosure>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level fragment (users), once loaded
    pub fn root(&self) -> Option<&Fragment> {
        self.root.as_ref()
    }

    /// Mount the top-level fragment of an emptied tree.
    ///
    /// Returns false, and leaves the tree alone, if a root is already
    /// mounted: only the first listing after `clear` is shown.
    pub fn mount_root(&mut self, fragment: Fragment) -> bool {
        if self.root.is_some() {
            return false;
        }
        self.root = Some(fragment);
        true
    }

    /// Forget everything, as when the catalog panel is emptied
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn disclosure(&self, node: NodeKey) -> &Disclosure {
        self.nodes.get(&node).unwrap_or(&Disclosure::Collapsed)
    }

    pub fn is_open(&self, node: NodeKey) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Start expanding a collapsed node.
    ///
    /// Returns true when the caller should fetch the node's children.
    pub fn expand(&mut self, node: NodeKey) -> bool {
        if self.is_open(node) {
            return false;
        }
        self.nodes.insert(node, Disclosure::Pending);
        true
    }

    /// Attach fetched children under a pending node.
    ///
    /// Returns false, and leaves the outline alone, if the node stopped
    /// waiting for them in the meantime.
    pub fn attach(&mut self, node: NodeKey, fragment: Fragment) -> bool {
        match self.nodes.get_mut(&node) {
            Some(slot) if matches!(slot, Disclosure::Pending) => {
                *slot = Disclosure::Expanded(fragment);
                true
            }
            _ => false,
        }
    }

    /// Give up on a pending fetch so the node can be expanded again
    pub fn fail(&mut self, node: NodeKey) {
        if matches!(self.nodes.get(&node), Some(Disclosure::Pending)) {
            self.nodes.remove(&node);
        }
    }

    /// Collapse a node, dropping its fragment and everything opened below it.
    ///
    /// Returns false if the node was not open.
    pub fn collapse(&mut self, node: NodeKey) -> bool {
        let Some(removed) = self.nodes.remove(&node) else {
            return false;
        };

        if let Disclosure::Expanded(fragment) = removed {
            for &id in fragment.ids() {
                if let Some(child) = NodeKey::for_entry(fragment.kind(), id) {
                    self.collapse(child);
                }
            }
        }
        true
    }
}
