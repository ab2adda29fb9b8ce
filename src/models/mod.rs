//! Data models module
//!
//! Defines chat completion data structures, supported languages and the
//! summarizer capability descriptor

use crate::config::schema::ConfigKey;
use serde::Serialize;

pub mod language;
pub mod openai;

pub use language::Language;

/// A user-configurable field shown by the settings UI
#[derive(Debug, Clone, Serialize)]
pub struct ConfigField {
    /// Store key
    pub config_key: &'static str,
    /// Placeholder shown when unset (also the default value)
    pub place_hold: &'static str,
    /// Label for the field
    pub display_name: &'static str,
}

impl ConfigField {
    /// Field bound to a schema key
    pub fn new(key: ConfigKey, place_hold: &'static str, display_name: &'static str) -> Self {
        Self {
            config_key: key.as_str(),
            place_hold,
            display_name,
        }
    }
}

/// Static descriptor of a summarization service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    /// Human-readable provider name
    pub name: &'static str,
    /// Supported target languages (code, display name) in display order
    pub support_language: Vec<(&'static str, &'static str)>,
    /// Configurable fields
    pub needs: Vec<ConfigField>,
}

impl ServiceInfo {
    /// Display name for a language code, if supported
    pub fn language_name(&self, code: &str) -> Option<&'static str> {
        self.support_language
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }
}
