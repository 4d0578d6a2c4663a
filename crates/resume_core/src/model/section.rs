//! Section domain model.

use crate::model::item::ItemId;
use serde::{Deserialize, Serialize};

/// Stable section identifier.
pub type SectionId = String;

/// Named, ordered container of top-level items (a resume heading).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub display_name: String,
    /// Top-level item ids in display order.
    pub items: Vec<ItemId>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(id: impl Into<SectionId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            items: Vec::new(),
        }
    }

    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|id| id == item_id)
    }
}
