//! Item domain model.
//!
//! # Responsibility
//! - Define the bullet and sub-section content units.
//! - Provide typed accessors so callers match on kind exhaustively.
//!
//! # Invariants
//! - `id` is assigned once and never changes, including across moves.
//! - `SubSection::children` only ever references bullet ids.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one catalog item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = String;

/// Allocates a fresh globally unique item id.
pub fn new_item_id() -> ItemId {
    Uuid::new_v4().to_string()
}

/// Discriminant of an [`Item`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "BULLET")]
    Bullet,
    #[serde(rename = "SUBSECTION")]
    SubSection,
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullet => write!(f, "bullet"),
            Self::SubSection => write!(f, "sub-section"),
        }
    }
}

/// One line of resume content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: ItemId,
    pub text: String,
}

impl Bullet {
    /// Creates a bullet with a generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(new_item_id(), text)
    }

    /// Creates a bullet with a caller-provided id.
    pub fn with_id(id: impl Into<ItemId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Heading block (e.g. one job) owning an ordered list of bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
    pub id: ItemId,
    pub title: String,
    pub subtitle: String,
    /// Free-form date range, e.g. `2021 - 2023`.
    pub time_range: String,
    /// Bullet ids in display order.
    pub children: Vec<ItemId>,
}

impl SubSection {
    /// Creates an empty sub-section from header fields with a generated id.
    pub fn new(draft: SubSectionDraft) -> Self {
        Self::with_id(new_item_id(), draft)
    }

    /// Creates an empty sub-section with a caller-provided id.
    pub fn with_id(id: impl Into<ItemId>, draft: SubSectionDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            subtitle: draft.subtitle,
            time_range: draft.time_range,
            children: Vec::new(),
        }
    }

    /// Replaces header fields, leaving `children` untouched.
    pub fn apply(&mut self, draft: SubSectionDraft) {
        self.title = draft.title;
        self.subtitle = draft.subtitle;
        self.time_range = draft.time_range;
    }
}

/// Header fields used to create or update a sub-section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubSectionDraft {
    pub title: String,
    pub subtitle: String,
    pub time_range: String,
}

impl SubSectionDraft {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        time_range: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            time_range: time_range.into(),
        }
    }
}

/// Catalog content unit.
///
/// Serialized with a `kind` tag (`BULLET` / `SUBSECTION`) to match the view
/// layer schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Item {
    #[serde(rename = "BULLET")]
    Bullet(Bullet),
    #[serde(rename = "SUBSECTION")]
    SubSection(SubSection),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Self::Bullet(bullet) => &bullet.id,
            Self::SubSection(sub_section) => &sub_section.id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Bullet(_) => ItemKind::Bullet,
            Self::SubSection(_) => ItemKind::SubSection,
        }
    }

    pub fn as_bullet(&self) -> Option<&Bullet> {
        match self {
            Self::Bullet(bullet) => Some(bullet),
            Self::SubSection(_) => None,
        }
    }

    pub fn as_sub_section(&self) -> Option<&SubSection> {
        match self {
            Self::Bullet(_) => None,
            Self::SubSection(sub_section) => Some(sub_section),
        }
    }

    /// Returns nested bullet ids; empty for bullets.
    pub fn children(&self) -> &[ItemId] {
        match self {
            Self::Bullet(_) => &[],
            Self::SubSection(sub_section) => &sub_section.children,
        }
    }
}

impl From<Bullet> for Item {
    fn from(value: Bullet) -> Self {
        Self::Bullet(value)
    }
}

impl From<SubSection> for Item {
    fn from(value: SubSection) -> Self {
        Self::SubSection(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bullet, Item, ItemKind, SubSection, SubSectionDraft};

    #[test]
    fn generated_ids_are_unique() {
        let first = Bullet::new("a");
        let second = Bullet::new("a");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn apply_keeps_children() {
        let mut sub_section = SubSection::with_id("job", SubSectionDraft::new("Acme", "", ""));
        sub_section.children.push("b1".to_string());

        sub_section.apply(SubSectionDraft::new("Acme Corp", "Engineer", "2020 - 2022"));

        assert_eq!(sub_section.title, "Acme Corp");
        assert_eq!(sub_section.children, vec!["b1".to_string()]);
    }

    #[test]
    fn bullet_has_no_children() {
        let item = Item::from(Bullet::with_id("b", "text"));
        assert!(item.children().is_empty());
        assert_eq!(item.kind(), ItemKind::Bullet);
    }
}
