//! Editor service facade and mutation API.
//!
//! # Responsibility
//! - Own the single writer path to the committed editor state.
//! - Provide structural edits: create/update/delete items, sections and
//!   header fields.
//!
//! # Invariants
//! - Operations run against a private draft; the draft replaces the committed
//!   snapshot only when the whole operation succeeds.
//! - Failed operations leave the committed snapshot untouched and are logged.
//! - Item placement stays exclusive: every edit that detaches an item also
//!   re-homes it.

use crate::config::EditorConfig;
use crate::model::header::{ContactField, ContactFieldId};
use crate::model::item::{Bullet, Item, ItemId, ItemKind, SubSection, SubSectionDraft};
use crate::model::section::{Section, SectionId};
use crate::store::catalog::CatalogError;
use crate::store::ordering::OrderingError;
use crate::store::state::EditorState;
use crate::store::state_store::{EditorStore, InMemoryEditorStore};
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Errors from editor operations. All of them leave state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Referenced item is absent from the catalog.
    ItemNotFound(ItemId),
    /// Referenced section does not exist.
    SectionNotFound(SectionId),
    /// Item exists but has the wrong kind for this operation.
    WrongKind {
        id: ItemId,
        expected: ItemKind,
        found: ItemKind,
    },
    /// Item sits inside a sub-section and cannot be moved as a top-level item.
    NestedItem { id: ItemId, parent: ItemId },
    /// Bullet is not a child of the given sub-section.
    BulletNotAttached { bullet: ItemId, sub_section: ItemId },
    /// Display name is blank after trim.
    InvalidDisplayName,
    /// Section id is blank.
    InvalidSectionId,
    /// Section id is already used.
    DuplicateSectionId(SectionId),
    /// Header already holds the configured number of contact fields.
    ContactFieldLimit(usize),
    /// Referenced contact field does not exist.
    ContactFieldNotFound(ContactFieldId),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::SectionNotFound(id) => write!(f, "section not found: {id}"),
            Self::WrongKind {
                id,
                expected,
                found,
            } => write!(f, "item {id} is a {found}, expected a {expected}"),
            Self::NestedItem { id, parent } => {
                write!(f, "item {id} is nested in sub-section {parent}")
            }
            Self::BulletNotAttached {
                bullet,
                sub_section,
            } => write!(f, "bullet {bullet} is not a child of {sub_section}"),
            Self::InvalidDisplayName => write!(f, "display name must not be blank"),
            Self::InvalidSectionId => write!(f, "section id must not be blank"),
            Self::DuplicateSectionId(id) => write!(f, "section id already in use: `{id}`"),
            Self::ContactFieldLimit(max) => {
                write!(f, "contact line already holds {max} fields")
            }
            Self::ContactFieldNotFound(id) => write!(f, "contact field not found: {id}"),
        }
    }
}

impl Error for EditorError {}

impl From<CatalogError> for EditorError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::ItemNotFound(id) => Self::ItemNotFound(id),
            CatalogError::WrongKind {
                id,
                expected,
                found,
            } => Self::WrongKind {
                id,
                expected,
                found,
            },
        }
    }
}

impl From<OrderingError> for EditorError {
    fn from(value: OrderingError) -> Self {
        match value {
            OrderingError::SectionNotFound(id) => Self::SectionNotFound(id),
            OrderingError::DuplicateSectionId(id) => Self::DuplicateSectionId(id),
        }
    }
}

/// Result type used by editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Single-writer editor facade.
pub struct EditorService<S: EditorStore = InMemoryEditorStore> {
    store: S,
    config: EditorConfig,
}

impl EditorService<InMemoryEditorStore> {
    /// Creates an in-memory editor seeded with `state`.
    pub fn in_memory(state: EditorState, config: EditorConfig) -> Self {
        Self::new(InMemoryEditorStore::new(state), config)
    }
}

impl<S: EditorStore> EditorService<S> {
    /// Creates service from store implementation.
    pub fn new(store: S, config: EditorConfig) -> Self {
        Self { store, config }
    }

    /// Returns the committed snapshot for rendering.
    pub fn snapshot(&self) -> Arc<EditorState> {
        self.store.load()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Applies `operation` to a draft copy and commits it on success.
    pub(crate) fn commit<T>(
        &mut self,
        event: &'static str,
        operation: impl FnOnce(&mut EditorState) -> EditorResult<T>,
    ) -> EditorResult<T> {
        let mut draft = EditorState::clone(&self.store.load());
        match operation(&mut draft) {
            Ok(value) => {
                if cfg!(debug_assertions) {
                    let violations = draft.check_integrity();
                    if !violations.is_empty() {
                        error!(
                            "event={event} module=editor status=error violations={}",
                            violations.len()
                        );
                    }
                }
                self.store.replace(Arc::new(draft));
                debug!("event={event} module=editor status=ok");
                Ok(value)
            }
            Err(err) => {
                warn!("event={event} module=editor status=noop reason=\"{err}\"");
                Err(err)
            }
        }
    }

    /// Creates one bullet and appends it to the menu.
    pub fn create_bullet(&mut self, text: impl Into<String>) -> EditorResult<ItemId> {
        let bullet = Bullet::new(text);
        self.commit("item_create", move |draft| {
            let id = bullet.id.clone();
            draft.item_map.put(Item::from(bullet));
            let len = draft.menu().len();
            draft.ordering.insert_into_menu(id.clone(), len);
            Ok(id)
        })
    }

    /// Creates one empty sub-section and appends it to the menu.
    ///
    /// A blank title falls back to the configured default title.
    pub fn create_sub_section(&mut self, draft_fields: SubSectionDraft) -> EditorResult<ItemId> {
        let fields = self.with_default_title(draft_fields);
        let sub_section = SubSection::new(fields);
        self.commit("item_create", move |draft| {
            let id = sub_section.id.clone();
            draft.item_map.put(Item::from(sub_section));
            let len = draft.menu().len();
            draft.ordering.insert_into_menu(id.clone(), len);
            Ok(id)
        })
    }

    /// Appends one empty section.
    pub fn create_section(
        &mut self,
        section_id: impl Into<SectionId>,
        display_name: impl Into<String>,
    ) -> EditorResult<()> {
        let section_id = section_id.into();
        let display_name = display_name.into();
        self.commit("section_create", move |draft| {
            let display_name = normalize_display_name(display_name)?;
            if section_id.trim().is_empty() {
                return Err(EditorError::InvalidSectionId);
            }
            draft
                .ordering
                .push_section(Section::new(section_id, display_name))?;
            Ok(())
        })
    }

    /// Renames one section.
    pub fn rename_section(
        &mut self,
        section_id: &str,
        display_name: impl Into<String>,
    ) -> EditorResult<()> {
        let display_name = display_name.into();
        self.commit("section_rename", move |draft| {
            let display_name = normalize_display_name(display_name)?;
            draft.ordering.section_mut(section_id)?.display_name = display_name;
            Ok(())
        })
    }

    /// Deletes one section; its items return to the end of the menu in order.
    pub fn delete_section(&mut self, section_id: &str) -> EditorResult<Vec<ItemId>> {
        self.commit("section_delete", |draft| {
            let section = draft.ordering.remove_section(section_id)?;
            for id in &section.items {
                let len = draft.menu().len();
                draft.ordering.insert_into_menu(id.clone(), len);
            }
            Ok(section.items)
        })
    }

    /// Replaces one bullet's text.
    pub fn update_bullet_text(&mut self, id: &str, text: impl Into<String>) -> EditorResult<()> {
        let text = text.into();
        self.commit("bullet_update", move |draft| {
            draft.item_map.bullet_mut(id)?.text = text;
            Ok(())
        })
    }

    /// Replaces one sub-section's header fields, keeping its children.
    pub fn update_sub_section(
        &mut self,
        id: &str,
        draft_fields: SubSectionDraft,
    ) -> EditorResult<()> {
        let fields = self.with_default_title(draft_fields);
        self.commit("sub_section_update", move |draft| {
            draft.item_map.sub_section_mut(id)?.apply(fields);
            Ok(())
        })
    }

    /// Appends one bullet to a sub-section's children.
    ///
    /// The bullet is detached from wherever it was (menu, a section, or another
    /// sub-section) in the same step, so it keeps exactly one placement.
    pub fn attach_bullet_to_sub_section(
        &mut self,
        bullet_id: &str,
        sub_section_id: &str,
    ) -> EditorResult<()> {
        self.commit("bullet_attach", |draft| {
            draft.item_map.bullet(bullet_id)?;
            draft.item_map.sub_section(sub_section_id)?;

            draft.ordering.remove_from_all_collections(bullet_id);
            draft.item_map.detach_from_sub_sections(bullet_id);
            draft
                .item_map
                .sub_section_mut(sub_section_id)?
                .children
                .push(bullet_id.to_string());
            Ok(())
        })
    }

    /// Removes one bullet from a sub-section and appends it to the menu.
    pub fn detach_bullet_from_sub_section(
        &mut self,
        bullet_id: &str,
        sub_section_id: &str,
    ) -> EditorResult<()> {
        self.commit("bullet_detach", |draft| {
            draft.item_map.bullet(bullet_id)?;
            let sub_section = draft.item_map.sub_section_mut(sub_section_id)?;
            let index = sub_section
                .children
                .iter()
                .position(|child| child == bullet_id)
                .ok_or_else(|| EditorError::BulletNotAttached {
                    bullet: bullet_id.to_string(),
                    sub_section: sub_section_id.to_string(),
                })?;
            sub_section.children.remove(index);

            let len = draft.menu().len();
            draft.ordering.insert_into_menu(bullet_id.to_string(), len);
            Ok(())
        })
    }

    /// Deletes one item and strips every reference to it.
    ///
    /// Deleting a sub-section returns its bullets to the end of the menu.
    pub fn delete_item(&mut self, id: &str) -> EditorResult<Item> {
        self.commit("item_delete", |draft| {
            draft.item_map.get(id)?;
            draft.ordering.remove_from_all_collections(id);
            draft.item_map.detach_from_sub_sections(id);
            let removed = draft
                .item_map
                .remove(id)
                .ok_or_else(|| EditorError::ItemNotFound(id.to_string()))?;
            for child in removed.children() {
                let len = draft.menu().len();
                draft.ordering.insert_into_menu(child.clone(), len);
            }
            Ok(removed)
        })
    }

    /// Removes one item from every section's items.
    ///
    /// An item left without any placement is appended to the menu; an item
    /// already in the menu stays where it is.
    pub fn filter_from_sections(&mut self, id: &str) -> EditorResult<()> {
        self.commit("item_filter", |draft| {
            draft.item_map.get(id)?;
            draft.ordering.filter_from_sections(id);
            let in_menu = draft.menu().iter().any(|entry| entry == id);
            if !in_menu && draft.item_map.parent_of(id).is_none() {
                let len = draft.menu().len();
                draft.ordering.insert_into_menu(id.to_string(), len);
            }
            Ok(())
        })
    }

    /// Sets the person name printed at the top of the resume.
    pub fn set_display_name(&mut self, name: impl Into<String>) -> EditorResult<()> {
        let name = collapse_whitespace(&name.into());
        self.commit("header_update", move |draft| {
            draft.header.display_name = name;
            Ok(())
        })
    }

    /// Appends one contact field and returns its id.
    pub fn add_contact_field(&mut self, value: impl Into<String>) -> EditorResult<ContactFieldId> {
        let value = value.into();
        let max = self.config.max_contact_fields;
        self.commit("contact_add", move |draft| {
            if draft.header.contact_fields.len() >= max {
                return Err(EditorError::ContactFieldLimit(max));
            }
            let id = draft.header.next_contact_id();
            draft.header.contact_fields.push(ContactField { id, value });
            Ok(id)
        })
    }

    /// Replaces one contact field's value.
    pub fn update_contact_field(
        &mut self,
        id: ContactFieldId,
        value: impl Into<String>,
    ) -> EditorResult<()> {
        let value = value.into();
        self.commit("contact_update", move |draft| {
            draft
                .header
                .contact_field_mut(id)
                .ok_or(EditorError::ContactFieldNotFound(id))?
                .value = value;
            Ok(())
        })
    }

    /// Removes one contact field.
    pub fn remove_contact_field(&mut self, id: ContactFieldId) -> EditorResult<()> {
        self.commit("contact_remove", |draft| {
            let fields = &mut draft.header.contact_fields;
            let index = fields
                .iter()
                .position(|field| field.id == id)
                .ok_or(EditorError::ContactFieldNotFound(id))?;
            fields.remove(index);
            Ok(())
        })
    }

    fn with_default_title(&self, mut fields: SubSectionDraft) -> SubSectionDraft {
        if fields.title.trim().is_empty() {
            fields.title = self.config.default_sub_section_title.clone();
        }
        fields
    }
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

fn normalize_display_name(value: String) -> EditorResult<String> {
    let collapsed = collapse_whitespace(&value);
    if collapsed.is_empty() {
        return Err(EditorError::InvalidDisplayName);
    }
    Ok(collapsed)
}
