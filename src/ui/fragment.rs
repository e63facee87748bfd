//! Fragments: the list of entities rendered under one container
//!
//! A fragment is produced from an entity map without touching state, and
//! only stores ids. Widgets look the entities up when they are drawn, so a
//! favorite toggled after the fragment was built still shows correctly.

use std::collections::BTreeMap;

use crate::state::data::EntityKind;

/// How each entry of a fragment is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// A disclosure button with the entity name
    Item,
    /// A photo card with star control and thumbnail
    Photo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    kind: EntityKind,
    ids: Vec<u64>,
}

impl Fragment {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn template(&self) -> Template {
        match self.kind {
            EntityKind::User | EntityKind::Album => Template::Item,
            EntityKind::Photo => Template::Photo,
        }
    }
}

/// Build the fragment listing every entry of `items`, in id order
pub fn fragment<T>(kind: EntityKind, items: &BTreeMap<u64, T>) -> Fragment {
    Fragment {
        kind,
        ids: items.keys().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mapping::{users_from, UserRecord};

    #[test]
    fn test_catalog_lists_only_named_users() {
        let records: Vec<UserRecord> =
            serde_json::from_str(r#"[{"id":1,"name":"Ann"},{"id":2,"name":""}]"#).unwrap();
        let users = users_from(records);

        let fragment = fragment(EntityKind::User, &users);

        assert_eq!(fragment.ids(), &[1]);
        assert_eq!(fragment.template(), Template::Item);
    }

    #[test]
    fn test_ids_follow_map_order() {
        let items = BTreeMap::from([(30, ()), (4, ()), (12, ())]);

        let fragment = fragment(EntityKind::Photo, &items);

        assert_eq!(fragment.ids(), &[4, 12, 30]);
        assert_eq!(fragment.kind(), EntityKind::Photo);
        assert_eq!(fragment.template(), Template::Photo);
    }

    #[test]
    fn test_empty_map_gives_empty_fragment() {
        let items: BTreeMap<u64, ()> = BTreeMap::new();
        assert!(fragment(EntityKind::Album, &items).is_empty());
    }
}
