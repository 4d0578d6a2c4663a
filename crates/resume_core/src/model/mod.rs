//! Resume editor domain model.
//!
//! # Responsibility
//! - Define the canonical content records placed by the editor.
//! - Keep item identity separate from item placement.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId` that is never reused.
//! - Sub-sections hold bullet ids only; they never nest.

pub mod header;
pub mod item;
pub mod section;
