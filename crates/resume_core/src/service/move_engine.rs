//! Move engine: relocation of top-level items and sections.
//!
//! # Responsibility
//! - Move one item id between or within the menu and section item lists.
//! - Reorder the section list and the menu with array-move semantics.
//!
//! # Invariants
//! - An item is first stripped from every top-level collection, then inserted
//!   exactly once; both steps land in one committed snapshot.
//! - Unknown items or sections leave state unchanged; an item is never dropped.
//! - Moving an item to the index it already occupies is an identity.
//! - Section moves never touch any section's `items`.

use crate::model::item::ItemId;
use crate::model::section::SectionId;
use crate::service::editor_service::{EditorError, EditorResult, EditorService};
use crate::store::ordering::Placement;
use crate::store::state::EditorState;
use crate::store::state_store::EditorStore;

/// Destination container of an item move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTarget {
    Menu,
    Section(SectionId),
}

impl MoveTarget {
    /// Maps the view layer's section id convention (`""` means menu).
    pub fn from_section_id(section_id: &str) -> Self {
        if section_id.is_empty() {
            Self::Menu
        } else {
            Self::Section(section_id.to_string())
        }
    }
}

impl<S: EditorStore> EditorService<S> {
    /// Moves one top-level item to `target` at `target_index`.
    ///
    /// Returns the placement the item ended up at (index is clamped).
    pub fn move_item(
        &mut self,
        item_id: &str,
        target: MoveTarget,
        target_index: usize,
    ) -> EditorResult<Placement> {
        self.commit("item_move", |draft| {
            relocate_item(draft, item_id, &target, target_index)
        })
    }

    /// Moves one section to `target_index` in document order.
    pub fn move_section(&mut self, section_id: &str, target_index: usize) -> EditorResult<usize> {
        self.commit("section_move", |draft| {
            Ok(draft.ordering.reorder_sections(section_id, target_index)?)
        })
    }

    /// Reorders one menu entry with array-move semantics.
    pub fn move_within_menu(&mut self, item_id: &str, target_index: usize) -> EditorResult<usize> {
        self.commit("menu_reorder", |draft| {
            draft.item_map.get(item_id)?;
            match draft.ordering.reorder_menu(item_id, target_index) {
                Some(index) => Ok(index),
                None => relocate_item(draft, item_id, &MoveTarget::Menu, target_index)
                    .map(|placement| match placement {
                        Placement::Menu { index } => index,
                        Placement::Section { index, .. } => index,
                    }),
            }
        })
    }

    /// Sends one item back to the menu, at `index` or at the end.
    pub fn send_to_menu(&mut self, item_id: &str, index: Option<usize>) -> EditorResult<Placement> {
        self.commit("item_to_menu", |draft| {
            let target_index = index.unwrap_or(usize::MAX);
            relocate_item(draft, item_id, &MoveTarget::Menu, target_index)
        })
    }
}

/// Strip-then-insert relocation applied to a draft state.
pub(crate) fn relocate_item(
    draft: &mut EditorState,
    item_id: &str,
    target: &MoveTarget,
    target_index: usize,
) -> EditorResult<Placement> {
    draft.item_map.get(item_id)?;
    if let Some(parent) = draft.item_map.parent_of(item_id) {
        return Err(EditorError::NestedItem {
            id: item_id.to_string(),
            parent: parent.id.clone(),
        });
    }
    if let MoveTarget::Section(section_id) = target {
        if draft.section(section_id).is_none() {
            return Err(EditorError::SectionNotFound(section_id.clone()));
        }
    }

    let id: ItemId = item_id.to_string();
    draft.ordering.remove_from_all_collections(item_id);
    let placement = match target {
        MoveTarget::Menu => Placement::Menu {
            index: draft.ordering.insert_into_menu(id, target_index),
        },
        MoveTarget::Section(section_id) => Placement::Section {
            section_id: section_id.clone(),
            index: draft
                .ordering
                .insert_into_section(section_id, id, target_index)?,
        },
    };
    Ok(placement)
}
