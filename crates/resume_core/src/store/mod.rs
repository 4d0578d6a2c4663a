//! In-memory editor stores.
//!
//! # Responsibility
//! - Own the item catalog and the ordered collections that place items.
//! - Provide the primitive mutators composed by the service layer.
//! - Hold the committed editor state behind a snapshot-replacing store.
//!
//! # Invariants
//! - Catalog primitives never touch placement; ordering primitives never
//!   touch content.
//! - Committed state is replaced wholesale, never mutated in place.

pub mod catalog;
pub mod ordering;
pub mod state;
pub mod state_store;
