//! Editor use-case services.
//!
//! # Responsibility
//! - Compose store primitives into atomic, invariant-preserving operations.
//! - Translate drag-library events into moves.
//! - Project committed state for the document exporter.
//!
//! # Invariants
//! - Every public mutation is one snapshot replacement or no change at all.

pub mod drag_session;
pub mod editor_service;
pub mod export;
pub mod move_engine;
