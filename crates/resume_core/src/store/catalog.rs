//! Item catalog.
//!
//! # Responsibility
//! - Map item ids to canonical item content.
//!
//! # Invariants
//! - `put` replaces content only; it never changes where an item is placed.
//! - `remove` is a pure map deletion and does not fix up collections.

use crate::model::item::{Bullet, Item, ItemId, ItemKind, SubSection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by catalog lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No item with this id exists.
    ItemNotFound(ItemId),
    /// Item exists but has a different kind than required.
    WrongKind {
        id: ItemId,
        expected: ItemKind,
        found: ItemKind,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::WrongKind {
                id,
                expected,
                found,
            } => write!(f, "item {id} is a {found}, expected a {expected}"),
        }
    }
}

impl Error for CatalogError {}

/// Id to content mapping for every item regardless of placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> CatalogResult<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Inserts or overwrites one item, returning the previous content.
    pub fn put(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id().to_string(), item)
    }

    /// Deletes one catalog entry without touching any collection.
    pub fn remove(&mut self, id: &str) -> Option<Item> {
        self.items.remove(id)
    }

    pub fn bullet(&self, id: &str) -> CatalogResult<&Bullet> {
        match self.get(id)? {
            Item::Bullet(bullet) => Ok(bullet),
            other => Err(wrong_kind(id, ItemKind::Bullet, other.kind())),
        }
    }

    pub fn bullet_mut(&mut self, id: &str) -> CatalogResult<&mut Bullet> {
        match self.get_mut(id)? {
            Item::Bullet(bullet) => Ok(bullet),
            other => Err(wrong_kind(id, ItemKind::Bullet, other.kind())),
        }
    }

    pub fn sub_section(&self, id: &str) -> CatalogResult<&SubSection> {
        match self.get(id)? {
            Item::SubSection(sub_section) => Ok(sub_section),
            other => Err(wrong_kind(id, ItemKind::SubSection, other.kind())),
        }
    }

    pub fn sub_section_mut(&mut self, id: &str) -> CatalogResult<&mut SubSection> {
        match self.get_mut(id)? {
            Item::SubSection(sub_section) => Ok(sub_section),
            other => Err(wrong_kind(id, ItemKind::SubSection, other.kind())),
        }
    }

    /// Returns the sub-section whose children contain `bullet_id`, if any.
    pub fn parent_of(&self, bullet_id: &str) -> Option<&SubSection> {
        self.items.values().find_map(|item| match item {
            Item::SubSection(sub_section)
                if sub_section.children.iter().any(|child| child == bullet_id) =>
            {
                Some(sub_section)
            }
            _ => None,
        })
    }

    /// Strips `id` from every sub-section's children.
    ///
    /// Returns `true` when at least one reference was removed.
    pub fn detach_from_sub_sections(&mut self, id: &str) -> bool {
        let mut removed = false;
        for item in self.items.values_mut() {
            if let Item::SubSection(sub_section) = item {
                let before = sub_section.children.len();
                sub_section.children.retain(|child| child != id);
                removed |= sub_section.children.len() != before;
            }
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get_mut(&mut self, id: &str) -> CatalogResult<&mut Item> {
        self.items
            .get_mut(id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))
    }
}

fn wrong_kind(id: &str, expected: ItemKind, found: ItemKind) -> CatalogError {
    CatalogError::WrongKind {
        id: id.to_string(),
        expected,
        found,
    }
}
