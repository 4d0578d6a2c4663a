//! Core editing engine for the resume builder.
//! This crate is the single source of truth for placement invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, EditorConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::header::{ContactField, ContactFieldId, ResumeHeader};
pub use model::item::{new_item_id, Bullet, Item, ItemId, ItemKind, SubSection, SubSectionDraft};
pub use model::section::{Section, SectionId};
pub use service::drag_session::{
    ActiveDrag, DragController, DragKind, DragOrigin, DragOutcome, DragSource, DragState,
    DropEvent, DropTarget, HoverEvent, PickUpEvent, TargetMetadata, TargetRole,
};
pub use service::editor_service::{EditorError, EditorResult, EditorService};
pub use service::export::{export_document, ExportDocument, ExportSection, ResolvedItem};
pub use service::move_engine::MoveTarget;
pub use store::catalog::{CatalogError, ItemCatalog};
pub use store::ordering::{array_move, OrderingError, OrderingStore, Placement};
pub use store::state::{EditorState, IntegrityViolation};
pub use store::state_store::{EditorStore, InMemoryEditorStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
