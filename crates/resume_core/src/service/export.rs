//! Export projection for the document renderer.
//!
//! # Responsibility
//! - Resolve section item ids through the catalog into printable content.
//!
//! # Invariants
//! - Projection is pure: it reads one snapshot and never mutates it.
//! - Section and item order match document order.
//! - Empty contact fields are not exported.

use crate::model::item::Item;
use crate::service::editor_service::EditorService;
use crate::store::state::EditorState;
use crate::store::state_store::EditorStore;
use log::warn;
use serde::{Deserialize, Serialize};

/// Read-only document consumed by the page renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub display_name: String,
    pub contact_fields: Vec<String>,
    pub sections: Vec<ExportSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSection {
    pub title: String,
    pub items: Vec<ResolvedItem>,
}

/// Catalog-resolved item content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ResolvedItem {
    #[serde(rename = "BULLET")]
    Bullet { text: String },
    #[serde(rename = "SUBSECTION", rename_all = "camelCase")]
    SubSection {
        title: String,
        subtitle: String,
        time_range: String,
        bullets: Vec<String>,
    },
}

/// Builds the export projection of `state`.
///
/// Ids missing from the catalog are skipped and logged.
pub fn export_document(state: &EditorState) -> ExportDocument {
    let sections = state
        .sections()
        .iter()
        .map(|section| ExportSection {
            title: section.display_name.clone(),
            items: section
                .items
                .iter()
                .filter_map(|id| resolve_item(state, id))
                .collect(),
        })
        .collect();

    ExportDocument {
        display_name: state.header.display_name.clone(),
        contact_fields: state
            .header
            .contact_fields
            .iter()
            .map(|field| field.value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect(),
        sections,
    }
}

fn resolve_item(state: &EditorState, id: &str) -> Option<ResolvedItem> {
    match state.item(id) {
        Some(Item::Bullet(bullet)) => Some(ResolvedItem::Bullet {
            text: bullet.text.clone(),
        }),
        Some(Item::SubSection(sub_section)) => Some(ResolvedItem::SubSection {
            title: sub_section.title.clone(),
            subtitle: sub_section.subtitle.clone(),
            time_range: sub_section.time_range.clone(),
            bullets: sub_section
                .children
                .iter()
                .filter_map(|child| match state.item(child) {
                    Some(Item::Bullet(bullet)) => Some(bullet.text.clone()),
                    _ => {
                        warn!("event=export module=export status=error reason=bad_child");
                        None
                    }
                })
                .collect(),
        }),
        None => {
            warn!("event=export module=export status=error reason=dangling_item");
            None
        }
    }
}

impl<S: EditorStore> EditorService<S> {
    /// Projects the committed snapshot for the document renderer.
    pub fn export(&self) -> ExportDocument {
        export_document(&self.snapshot())
    }
}
