//! Editor configuration.
//!
//! # Responsibility
//! - Hold tunables shared by the editor service and the drag controller.
//! - Load them from JSON with per-field defaults.
//!
//! # Invariants
//! - Missing fields fall back to defaults; unknown fields are rejected.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_MAX_CONTACT_FIELDS: usize = 5;
const DEFAULT_MENU_DRAG_PREFIX: &str = "menu-";
const DEFAULT_SUB_SECTION_TITLE: &str = "Untitled";

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Input is not valid config JSON.
    Parse(serde_json::Error),
    /// `menu_drag_prefix` is blank.
    EmptyMenuDragPrefix,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid editor config: {err}"),
            Self::EmptyMenuDragPrefix => write!(f, "menu_drag_prefix must not be blank"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::EmptyMenuDragPrefix => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Editor tunables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Upper bound on contact fields in the resume header.
    pub max_contact_fields: usize,
    /// Marker the drag library prepends to ids of menu-sourced drags.
    pub menu_drag_prefix: String,
    /// Title used when a sub-section is created with a blank title.
    pub default_sub_section_title: String,
    /// Log level passed to `init_logging`.
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_contact_fields: DEFAULT_MAX_CONTACT_FIELDS,
            menu_drag_prefix: DEFAULT_MENU_DRAG_PREFIX.to_string(),
            default_sub_section_title: DEFAULT_SUB_SECTION_TITLE.to_string(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl EditorConfig {
    /// Parses a JSON object, filling absent fields with defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        if config.menu_drag_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyMenuDragPrefix);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EditorConfig};

    #[test]
    fn empty_object_yields_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.max_contact_fields, 5);
        assert_eq!(config.menu_drag_prefix, "menu-");
    }

    #[test]
    fn partial_object_overrides_fields() {
        let config =
            EditorConfig::from_json_str(r#"{"max_contact_fields": 3, "log_level": "warn"}"#)
                .unwrap();
        assert_eq!(config.max_contact_fields, 3);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_sub_section_title, "Untitled");
    }

    #[test]
    fn rejects_unknown_fields_and_blank_prefix() {
        assert!(matches!(
            EditorConfig::from_json_str(r#"{"colour": "red"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EditorConfig::from_json_str(r#"{"menu_drag_prefix": "  "}"#),
            Err(ConfigError::EmptyMenuDragPrefix)
        ));
    }
}
