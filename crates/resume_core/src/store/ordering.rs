//! Ordering store: menu list, section list and per-section item lists.
//!
//! # Responsibility
//! - Own the placement and order of top-level item ids.
//! - Provide the primitive mutators composed by the move engine.
//!
//! # Invariants
//! - Insert indices are clamped to `0..=len`; an index past the end appends.
//! - Section reorder is a stable array move; no `items` list is touched.
//! - Section ids are unique within one store.

use crate::model::item::ItemId;
use crate::model::section::{Section, SectionId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by ordering primitives.
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Errors from ordering primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingError {
    /// No section with this id exists.
    SectionNotFound(SectionId),
    /// A section with this id already exists.
    DuplicateSectionId(SectionId),
}

impl Display for OrderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SectionNotFound(id) => write!(f, "section not found: {id}"),
            Self::DuplicateSectionId(id) => write!(f, "section id already in use: {id}"),
        }
    }
}

impl Error for OrderingError {}

/// Where one top-level id currently sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "container")]
pub enum Placement {
    Menu {
        index: usize,
    },
    #[serde(rename_all = "camelCase")]
    Section {
        section_id: SectionId,
        index: usize,
    },
}

/// Ordered collections over item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingStore {
    menu: Vec<ItemId>,
    sections: Vec<Section>,
}

impl OrderingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(menu: Vec<ItemId>, sections: Vec<Section>) -> Self {
        Self { menu, sections }
    }

    pub fn menu(&self) -> &[ItemId] {
        &self.menu
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> OrderingResult<&mut Section> {
        self.sections
            .iter_mut()
            .find(|section| section.id == section_id)
            .ok_or_else(|| OrderingError::SectionNotFound(section_id.to_string()))
    }

    /// Returns every top-level placement of `id`, in menu-then-section order.
    ///
    /// More than one entry means the disjointness invariant is broken.
    pub fn placements(&self, id: &str) -> Vec<Placement> {
        let mut found = Vec::new();
        for (index, entry) in self.menu.iter().enumerate() {
            if entry == id {
                found.push(Placement::Menu { index });
            }
        }
        for section in &self.sections {
            for (index, entry) in section.items.iter().enumerate() {
                if entry == id {
                    found.push(Placement::Section {
                        section_id: section.id.clone(),
                        index,
                    });
                }
            }
        }
        found
    }

    /// Returns the first top-level placement of `id`.
    pub fn locate(&self, id: &str) -> Option<Placement> {
        if let Some(index) = self.menu.iter().position(|entry| entry == id) {
            return Some(Placement::Menu { index });
        }
        self.sections.iter().find_map(|section| {
            section.position_of(id).map(|index| Placement::Section {
                section_id: section.id.clone(),
                index,
            })
        })
    }

    /// Filters `id` out of the menu and every section's items.
    ///
    /// Returns `true` when at least one occurrence was removed.
    pub fn remove_from_all_collections(&mut self, id: &str) -> bool {
        let in_menu = remove_all(&mut self.menu, id);
        let in_sections = self.filter_from_sections(id);
        in_menu || in_sections
    }

    /// Filters `id` out of every section's items, leaving the menu alone.
    pub fn filter_from_sections(&mut self, id: &str) -> bool {
        let mut removed = false;
        for section in &mut self.sections {
            removed |= remove_all(&mut section.items, id);
        }
        removed
    }

    /// Inserts into the menu at a clamped index and returns the used index.
    pub fn insert_into_menu(&mut self, id: ItemId, index: usize) -> usize {
        insert_clamped(&mut self.menu, id, index)
    }

    /// Inserts into one section at a clamped index and returns the used index.
    pub fn insert_into_section(
        &mut self,
        section_id: &str,
        id: ItemId,
        index: usize,
    ) -> OrderingResult<usize> {
        let section = self.section_mut(section_id)?;
        Ok(insert_clamped(&mut section.items, id, index))
    }

    /// Moves one section to `to_index`, keeping other sections' relative order.
    pub fn reorder_sections(&mut self, from_id: &str, to_index: usize) -> OrderingResult<usize> {
        let from = self
            .section_index(from_id)
            .ok_or_else(|| OrderingError::SectionNotFound(from_id.to_string()))?;
        Ok(array_move(&mut self.sections, from, to_index))
    }

    /// Moves one menu entry to `to_index` with array-move semantics.
    ///
    /// Returns `None` when `id` is not in the menu.
    pub fn reorder_menu(&mut self, id: &str, to_index: usize) -> Option<usize> {
        let from = self.menu.iter().position(|entry| entry == id)?;
        Some(array_move(&mut self.menu, from, to_index))
    }

    /// Appends one empty or pre-filled section.
    pub fn push_section(&mut self, section: Section) -> OrderingResult<()> {
        if self.section_index(&section.id).is_some() {
            return Err(OrderingError::DuplicateSectionId(section.id));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Removes one section and returns it with its items.
    pub fn remove_section(&mut self, section_id: &str) -> OrderingResult<Section> {
        let index = self
            .section_index(section_id)
            .ok_or_else(|| OrderingError::SectionNotFound(section_id.to_string()))?;
        Ok(self.sections.remove(index))
    }
}

/// Stable move of one element, equivalent to remove-then-insert.
///
/// `to` is clamped to the last valid position; returns the final index.
pub fn array_move<T>(values: &mut Vec<T>, from: usize, to: usize) -> usize {
    let value = values.remove(from);
    insert_clamped(values, value, to)
}

fn insert_clamped<T>(values: &mut Vec<T>, value: T, index: usize) -> usize {
    let index = index.min(values.len());
    values.insert(index, value);
    index
}

fn remove_all(values: &mut Vec<ItemId>, id: &str) -> bool {
    let before = values.len();
    values.retain(|entry| entry != id);
    values.len() != before
}
