//! Drag session controller.
//!
//! # Responsibility
//! - Track the one in-flight drag started by the drag-interaction library.
//! - Resolve reported hover/drop metadata into concrete destinations.
//! - Dispatch drops to the move engine by dragged entity kind.
//!
//! # Invariants
//! - At most one drag is active; a second pick-up is rejected.
//! - Every drop or cancel returns the controller to `Idle`.
//! - A drop over an item inserts before that item; a drop over a section body
//!   inserts at the head of that section.
//! - Drops without a recognizable target are cancelled gestures, not errors.

use crate::config::EditorConfig;
use crate::model::section::SectionId;
use crate::service::editor_service::{EditorError, EditorResult, EditorService};
use crate::service::move_engine::MoveTarget;
use crate::store::ordering::Placement;
use crate::store::state::EditorState;
use crate::store::state_store::EditorStore;
use log::{debug, info, warn};

/// Role of the dragged element, as declared by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A whole section being reordered.
    Section,
    /// An item rendered inside a section.
    Item,
    /// An item rendered in the menu palette.
    MenuEntry,
}

/// Collection the dragged entity came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOrigin {
    Menu,
    Section(SectionId),
    /// The section list itself (section drags).
    TopLevel,
}

/// Structured drag source: where the entity came from and its catalog or
/// section id, with no id-prefix encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSource {
    pub origin: DragOrigin,
    pub id: String,
}

/// Role of a hovered or drop-target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRole {
    Section,
    Item,
    MenuEntry,
    /// Empty area of the menu palette.
    Menu,
}

/// Target metadata reported by the drag library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMetadata {
    pub id: String,
    pub role: TargetRole,
    pub parent_id: Option<String>,
    pub index: Option<usize>,
}

impl TargetMetadata {
    pub fn new(id: impl Into<String>, role: TargetRole) -> Self {
        Self {
            id: id.into(),
            role,
            parent_id: None,
            index: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>, index: usize) -> Self {
        self.parent_id = Some(parent_id.into());
        self.index = Some(index);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickUpEvent {
    pub source_id: String,
    pub role: DragKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverEvent {
    pub source_id: String,
    pub hovered: TargetMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub source_id: String,
    /// `None` when the pointer was released outside every drop zone.
    pub target: Option<TargetMetadata>,
}

/// Destination resolved against the committed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    SectionBody {
        section_id: SectionId,
        section_index: usize,
    },
    Item {
        item_id: String,
        section_id: SectionId,
        index: usize,
    },
    MenuEntry {
        item_id: String,
        index: usize,
    },
    MenuArea,
}

/// The drag currently in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub kind: DragKind,
    pub source: DragSource,
    /// Last resolved hover target, for preview rendering.
    pub hovered: Option<DropTarget>,
    raw_source_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Started(DragSource),
    Hovered(Option<DropTarget>),
    /// Item landed at this placement.
    Placed(Placement),
    SectionMoved { section_id: SectionId, index: usize },
    /// Drop had a target that does not apply to this drag kind.
    NoOp,
    Cancelled,
    /// The move engine refused the operation; state is unchanged.
    Rejected(EditorError),
    /// Event does not apply in the current controller state.
    Ignored,
}

/// State machine over one drag gesture.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    menu_drag_prefix: String,
}

impl DragController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: DragState::Idle,
            menu_drag_prefix: config.menu_drag_prefix.clone(),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the active drag for preview rendering.
    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(active) => Some(active),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active().is_some()
    }

    /// Starts a drag session.
    pub fn on_pick_up<S: EditorStore>(
        &mut self,
        editor: &EditorService<S>,
        event: PickUpEvent,
    ) -> DragOutcome {
        if self.is_dragging() {
            warn!("event=drag_start module=drag status=noop reason=already_dragging");
            return DragOutcome::Ignored;
        }

        let snapshot = editor.snapshot();
        match self.resolve_source(&snapshot, event.role, &event.source_id) {
            Ok(source) => {
                info!("event=drag_start module=drag status=ok kind={:?}", event.role);
                self.state = DragState::Dragging(ActiveDrag {
                    kind: event.role,
                    source: source.clone(),
                    hovered: None,
                    raw_source_id: event.source_id,
                });
                DragOutcome::Started(source)
            }
            Err(err) => {
                warn!("event=drag_start module=drag status=noop reason=\"{err}\"");
                DragOutcome::Rejected(err)
            }
        }
    }

    /// Records the hovered target without mutating editor state.
    pub fn on_hover<S: EditorStore>(
        &mut self,
        editor: &EditorService<S>,
        event: HoverEvent,
    ) -> DragOutcome {
        let snapshot = editor.snapshot();
        let target = self.resolve_target(&snapshot, &event.hovered);
        match &mut self.state {
            DragState::Dragging(active) if active.raw_source_id == event.source_id => {
                active.hovered = target.clone();
                DragOutcome::Hovered(target)
            }
            _ => DragOutcome::Ignored,
        }
    }

    /// Ends the drag without a drop target.
    pub fn on_cancel(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Dragging(_) => {
                debug!("event=drag_cancel module=drag status=ok");
                DragOutcome::Cancelled
            }
        }
    }

    /// Ends the drag and applies the resulting move, if any.
    pub fn on_drop<S: EditorStore>(
        &mut self,
        editor: &mut EditorService<S>,
        event: DropEvent,
    ) -> DragOutcome {
        let active = match std::mem::take(&mut self.state) {
            DragState::Idle => return DragOutcome::Ignored,
            DragState::Dragging(active) => active,
        };
        if active.raw_source_id != event.source_id {
            warn!("event=drag_drop module=drag status=noop reason=source_mismatch");
            return DragOutcome::Cancelled;
        }

        let snapshot = editor.snapshot();
        let target = match event
            .target
            .as_ref()
            .and_then(|meta| self.resolve_target(&snapshot, meta))
        {
            Some(target) => target,
            None => {
                debug!("event=drag_drop module=drag status=noop reason=no_target");
                return DragOutcome::Cancelled;
            }
        };

        let result = match active.kind {
            DragKind::Section => drop_section(editor, &active.source, &target),
            DragKind::Item => drop_item(editor, &active.source, &target),
            DragKind::MenuEntry => drop_menu_entry(editor, &active.source, &target),
        };
        match result {
            Ok(outcome) => outcome,
            Err(err) => DragOutcome::Rejected(err),
        }
    }

    /// Maps a pick-up report to a structured source descriptor.
    pub fn resolve_source(
        &self,
        state: &EditorState,
        kind: DragKind,
        raw_id: &str,
    ) -> EditorResult<DragSource> {
        match kind {
            DragKind::Section => {
                if state.section(raw_id).is_none() {
                    return Err(EditorError::SectionNotFound(raw_id.to_string()));
                }
                Ok(DragSource {
                    origin: DragOrigin::TopLevel,
                    id: raw_id.to_string(),
                })
            }
            DragKind::Item => {
                state.item_map.get(raw_id)?;
                if let Some(parent) = state.item_map.parent_of(raw_id) {
                    return Err(EditorError::NestedItem {
                        id: raw_id.to_string(),
                        parent: parent.id.clone(),
                    });
                }
                let origin = match state.ordering.locate(raw_id) {
                    Some(Placement::Section { section_id, .. }) => DragOrigin::Section(section_id),
                    Some(Placement::Menu { .. }) | None => DragOrigin::Menu,
                };
                Ok(DragSource {
                    origin,
                    id: raw_id.to_string(),
                })
            }
            DragKind::MenuEntry => {
                let id = self.strip_menu_prefix(raw_id);
                state.item_map.get(id)?;
                Ok(DragSource {
                    origin: DragOrigin::Menu,
                    id: id.to_string(),
                })
            }
        }
    }

    /// Resolves reported target metadata against `state`.
    ///
    /// Positions come from `state`; reported parent/index are only hints.
    pub fn resolve_target(&self, state: &EditorState, meta: &TargetMetadata) -> Option<DropTarget> {
        match meta.role {
            TargetRole::Section => {
                state
                    .ordering
                    .section_index(&meta.id)
                    .map(|section_index| DropTarget::SectionBody {
                        section_id: meta.id.clone(),
                        section_index,
                    })
            }
            TargetRole::Item => {
                let located = state.ordering.locate(&meta.id)?;
                let target = match located {
                    Placement::Section { section_id, index } => DropTarget::Item {
                        item_id: meta.id.clone(),
                        section_id,
                        index,
                    },
                    Placement::Menu { index } => DropTarget::MenuEntry {
                        item_id: meta.id.clone(),
                        index,
                    },
                };
                if let (Some(parent), DropTarget::Item { section_id, .. }) =
                    (meta.parent_id.as_deref(), &target)
                {
                    if parent != section_id {
                        debug!("event=drag_resolve module=drag status=ok reason=stale_parent");
                    }
                }
                Some(target)
            }
            TargetRole::MenuEntry => {
                let id = self.strip_menu_prefix(&meta.id);
                match state.menu().iter().position(|entry| entry == id) {
                    Some(index) => Some(DropTarget::MenuEntry {
                        item_id: id.to_string(),
                        index,
                    }),
                    None => Some(DropTarget::MenuArea),
                }
            }
            TargetRole::Menu => Some(DropTarget::MenuArea),
        }
    }

    fn strip_menu_prefix<'a>(&self, raw_id: &'a str) -> &'a str {
        raw_id
            .strip_prefix(self.menu_drag_prefix.as_str())
            .unwrap_or(raw_id)
    }
}

fn drop_section<S: EditorStore>(
    editor: &mut EditorService<S>,
    source: &DragSource,
    target: &DropTarget,
) -> EditorResult<DragOutcome> {
    match target {
        DropTarget::SectionBody {
            section_id,
            section_index,
        } => {
            if *section_id == source.id {
                return Ok(DragOutcome::NoOp);
            }
            let index = editor.move_section(&source.id, *section_index)?;
            Ok(DragOutcome::SectionMoved {
                section_id: source.id.clone(),
                index,
            })
        }
        DropTarget::Item { .. } | DropTarget::MenuEntry { .. } | DropTarget::MenuArea => {
            Ok(DragOutcome::NoOp)
        }
    }
}

fn drop_item<S: EditorStore>(
    editor: &mut EditorService<S>,
    source: &DragSource,
    target: &DropTarget,
) -> EditorResult<DragOutcome> {
    match target {
        DropTarget::MenuEntry { item_id, index } => {
            if *item_id == source.id {
                return Ok(DragOutcome::NoOp);
            }
            Ok(DragOutcome::Placed(
                editor.send_to_menu(&source.id, Some(*index))?,
            ))
        }
        DropTarget::MenuArea => Ok(DragOutcome::Placed(editor.send_to_menu(&source.id, None)?)),
        DropTarget::SectionBody { .. } | DropTarget::Item { .. } => {
            drop_into_section(editor, source, target)
        }
    }
}

fn drop_menu_entry<S: EditorStore>(
    editor: &mut EditorService<S>,
    source: &DragSource,
    target: &DropTarget,
) -> EditorResult<DragOutcome> {
    match target {
        DropTarget::MenuEntry { item_id, index } => {
            if *item_id == source.id {
                return Ok(DragOutcome::NoOp);
            }
            let index = editor.move_within_menu(&source.id, *index)?;
            Ok(DragOutcome::Placed(Placement::Menu { index }))
        }
        DropTarget::MenuArea => {
            let index = editor.move_within_menu(&source.id, usize::MAX)?;
            Ok(DragOutcome::Placed(Placement::Menu { index }))
        }
        DropTarget::SectionBody { .. } | DropTarget::Item { .. } => {
            drop_into_section(editor, source, target)
        }
    }
}

fn drop_into_section<S: EditorStore>(
    editor: &mut EditorService<S>,
    source: &DragSource,
    target: &DropTarget,
) -> EditorResult<DragOutcome> {
    let (section_id, index) = match target {
        DropTarget::SectionBody { section_id, .. } => (section_id.clone(), 0),
        DropTarget::Item {
            item_id,
            section_id,
            index,
        } => {
            if *item_id == source.id {
                return Ok(DragOutcome::NoOp);
            }
            (section_id.clone(), *index)
        }
        DropTarget::MenuEntry { .. } | DropTarget::MenuArea => return Ok(DragOutcome::NoOp),
    };
    let placement = editor.move_item(&source.id, MoveTarget::Section(section_id), index)?;
    Ok(DragOutcome::Placed(placement))
}
