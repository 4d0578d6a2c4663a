//! Resume header model (name and contact line).
//!
//! # Invariants
//! - Contact field ids are unique within one header.

use serde::{Deserialize, Serialize};

/// Stable id of one contact field.
pub type ContactFieldId = u64;

/// One entry of the contact line, e.g. an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactField {
    pub id: ContactFieldId,
    pub value: String,
}

/// Person name and contact line printed above every section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeHeader {
    pub display_name: String,
    pub contact_fields: Vec<ContactField>,
}

impl ResumeHeader {
    /// Returns the id the next appended contact field receives.
    pub fn next_contact_id(&self) -> ContactFieldId {
        self.contact_fields
            .iter()
            .map(|field| field.id + 1)
            .max()
            .unwrap_or(1)
    }

    pub fn contact_field_mut(&mut self, id: ContactFieldId) -> Option<&mut ContactField> {
        self.contact_fields.iter_mut().find(|field| field.id == id)
    }
}
