//! Committed-state holder.
//!
//! # Responsibility
//! - Hand out immutable snapshots of the committed editor state.
//! - Accept wholesale replacement of the committed state.
//!
//! # Invariants
//! - A snapshot never changes after it is handed out.
//! - `replace` swaps the whole state in one step.

use crate::store::state::EditorState;
use std::sync::Arc;

/// Storage contract for the committed editor state.
///
/// Implementations have exactly one writer; readers keep their `Arc`
/// snapshot for as long as they render from it.
pub trait EditorStore {
    /// Returns the current committed snapshot.
    fn load(&self) -> Arc<EditorState>;
    /// Replaces the committed snapshot.
    fn replace(&mut self, next: Arc<EditorState>);
}

/// Process-local store holding one snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEditorStore {
    current: Arc<EditorState>,
}

impl InMemoryEditorStore {
    pub fn new(state: EditorState) -> Self {
        Self {
            current: Arc::new(state),
        }
    }
}

impl EditorStore for InMemoryEditorStore {
    fn load(&self) -> Arc<EditorState> {
        Arc::clone(&self.current)
    }

    fn replace(&mut self, next: Arc<EditorState>) {
        self.current = next;
    }
}
