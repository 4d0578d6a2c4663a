//! Editor state aggregate root.
//!
//! # Responsibility
//! - Bundle the item catalog, the ordering store and the resume header.
//! - Report integrity violations of the placement invariants.
//!
//! # Invariants
//! - Every catalog id is placed exactly once: in the menu, in one section, or
//!   as a child of one sub-section.
//! - Every referenced id exists in the catalog.
//! - Sub-section children are bullets.

use crate::model::header::ResumeHeader;
use crate::model::item::{Bullet, Item, ItemId, ItemKind};
use crate::model::section::{Section, SectionId};
use crate::store::catalog::ItemCatalog;
use crate::store::ordering::OrderingStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// Aggregate editor state shared read-only with views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub item_map: ItemCatalog,
    #[serde(flatten)]
    pub ordering: OrderingStore,
    #[serde(default)]
    pub header: ResumeHeader,
}

/// One broken placement invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// Catalog entry is not referenced by any collection.
    Unplaced(ItemId),
    /// Id appears in more than one placement.
    MultiplePlacements { id: ItemId, count: usize },
    /// A collection references an id missing from the catalog.
    DanglingReference { id: ItemId, container: String },
    /// A sub-section lists a non-bullet child.
    NonBulletChild { parent: ItemId, child: ItemId },
    /// Two sections share one id.
    DuplicateSectionId(SectionId),
}

impl Display for IntegrityViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unplaced(id) => write!(f, "item {id} is not placed anywhere"),
            Self::MultiplePlacements { id, count } => {
                write!(f, "item {id} is placed {count} times")
            }
            Self::DanglingReference { id, container } => {
                write!(f, "{container} references missing item {id}")
            }
            Self::NonBulletChild { parent, child } => {
                write!(f, "sub-section {parent} lists non-bullet child {child}")
            }
            Self::DuplicateSectionId(id) => write!(f, "section id {id} is used twice"),
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu(&self) -> &[ItemId] {
        self.ordering.menu()
    }

    pub fn sections(&self) -> &[Section] {
        self.ordering.sections()
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.ordering.section(section_id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.item_map.get(id).ok()
    }

    /// Lists every invariant violation; empty means the state is consistent.
    pub fn check_integrity(&self) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for id in self.ordering.menu() {
            *counts.entry(id.as_str()).or_default() += 1;
            if !self.item_map.contains(id) {
                violations.push(IntegrityViolation::DanglingReference {
                    id: id.clone(),
                    container: "menu".to_string(),
                });
            }
        }

        let mut section_ids = BTreeSet::new();
        for section in self.ordering.sections() {
            if !section_ids.insert(section.id.as_str()) {
                violations.push(IntegrityViolation::DuplicateSectionId(section.id.clone()));
            }
            for id in &section.items {
                *counts.entry(id.as_str()).or_default() += 1;
                if !self.item_map.contains(id) {
                    violations.push(IntegrityViolation::DanglingReference {
                        id: id.clone(),
                        container: format!("section {}", section.id),
                    });
                }
            }
        }

        for item in self.item_map.iter() {
            for child in item.children() {
                *counts.entry(child.as_str()).or_default() += 1;
                match self.item_map.get(child) {
                    Err(_) => violations.push(IntegrityViolation::DanglingReference {
                        id: child.clone(),
                        container: format!("sub-section {}", item.id()),
                    }),
                    Ok(found) if found.kind() != ItemKind::Bullet => {
                        violations.push(IntegrityViolation::NonBulletChild {
                            parent: item.id().to_string(),
                            child: child.clone(),
                        })
                    }
                    Ok(_) => {}
                }
            }
        }

        for item in self.item_map.iter() {
            match counts.get(item.id()).copied().unwrap_or(0) {
                0 => violations.push(IntegrityViolation::Unplaced(item.id().to_string())),
                1 => {}
                count => violations.push(IntegrityViolation::MultiplePlacements {
                    id: item.id().to_string(),
                    count,
                }),
            }
        }

        violations
    }

    /// Editor content shown on first open.
    pub fn sample() -> Self {
        let mut state = Self::new();
        for (id, text) in [
            ("test", "Test point 1"),
            ("test2", "Test point 2"),
            ("skill", "Skill: CSS, JS, HTML, Golang"),
            (
                "education",
                "Bachelor of Engineering in Computer Engineering (with Honours)",
            ),
        ] {
            state.item_map.put(Item::from(Bullet::with_id(id, text)));
        }

        let mut default_section = Section::new("default", "Default Section");
        default_section.items.push("test2".to_string());
        state.ordering = OrderingStore::from_parts(
            vec![
                "test".to_string(),
                "skill".to_string(),
                "education".to_string(),
            ],
            vec![default_section],
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorState, IntegrityViolation};
    use crate::model::item::{Bullet, Item, SubSection, SubSectionDraft};

    #[test]
    fn sample_state_is_consistent() {
        assert!(EditorState::sample().check_integrity().is_empty());
    }

    #[test]
    fn detects_duplicate_and_dangling_placements() {
        let mut state = EditorState::sample();
        state
            .ordering
            .insert_into_section("default", "test".to_string(), 0)
            .unwrap();
        state.ordering.insert_into_menu("ghost".to_string(), 0);

        let violations = state.check_integrity();
        assert!(violations.contains(&IntegrityViolation::MultiplePlacements {
            id: "test".to_string(),
            count: 2,
        }));
        assert!(violations.contains(&IntegrityViolation::DanglingReference {
            id: "ghost".to_string(),
            container: "menu".to_string(),
        }));
    }

    #[test]
    fn detects_unplaced_and_nested_sub_section() {
        let mut state = EditorState::new();
        state.item_map.put(Item::from(Bullet::with_id("loose", "x")));
        let mut outer = SubSection::with_id("outer", SubSectionDraft::default());
        outer.children.push("inner".to_string());
        state.item_map.put(Item::from(outer));
        state.item_map.put(Item::from(SubSection::with_id(
            "inner",
            SubSectionDraft::default(),
        )));
        state.ordering.insert_into_menu("outer".to_string(), 0);

        let violations = state.check_integrity();
        assert!(violations.contains(&IntegrityViolation::Unplaced("loose".to_string())));
        assert!(violations.contains(&IntegrityViolation::NonBulletChild {
            parent: "outer".to_string(),
            child: "inner".to_string(),
        }));
    }

    #[test]
    fn serializes_with_view_layer_field_names() {
        let json = serde_json::to_value(EditorState::sample()).unwrap();
        assert_eq!(json["menu"][0], "test");
        assert_eq!(json["sections"][0]["displayName"], "Default Section");
        assert_eq!(json["itemMap"]["skill"]["kind"], "BULLET");

        let decoded: EditorState = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, EditorState::sample());
    }
}
