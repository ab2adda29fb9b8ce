//! Configuration schema
//!
//! Enumerates every store key this crate reads, its type and its default.
//! Values are resolved once per load instead of being defaulted at each use.

use serde_json::Value;
use tracing::debug;

use super::store::ConfigStore;
use crate::utils::error::{helpers, AppResult};

/// Default upstream host
pub const DEFAULT_DOMAIN: &str = "api.openai.com";

/// Default system prompt for summaries
pub const DEFAULT_SUMMARY_PROMPT: &str =
    "You are a text summarizer, you can only summarize the text, don't interpret it.";

/// Default global translate shortcut
pub const DEFAULT_TRANSLATE_SHORTCUT: &str = "CommandOrControl+Alt+T";

/// Message shown when no API key is configured
pub const MISSING_API_KEY_MESSAGE: &str = "请先配置apikey";

/// Store keys read by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Upstream host, string
    OpenAIDomain,
    /// API key, string, required
    OpenAIApiKey,
    /// Custom system prompt, string
    OpenAISummaryPrompt,
    /// Streaming flag, bool
    OpenAIStream,
    /// Global translate shortcut, string
    TranslateShortcut,
}

impl ConfigKey {
    /// Store key
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::OpenAIDomain => "openai_domain",
            ConfigKey::OpenAIApiKey => "openai_apikey",
            ConfigKey::OpenAISummaryPrompt => "openai_summary_prompt",
            ConfigKey::OpenAIStream => "openai_stream",
            ConfigKey::TranslateShortcut => "translate_shortcut",
        }
    }

    /// Default used when the key is unset or empty, `None` when required
    pub fn default_value(self) -> Option<Value> {
        match self {
            ConfigKey::OpenAIDomain => Some(Value::from(DEFAULT_DOMAIN)),
            ConfigKey::OpenAIApiKey => None,
            ConfigKey::OpenAISummaryPrompt => Some(Value::from(DEFAULT_SUMMARY_PROMPT)),
            ConfigKey::OpenAIStream => Some(Value::Bool(false)),
            ConfigKey::TranslateShortcut => Some(Value::from(DEFAULT_TRANSLATE_SHORTCUT)),
        }
    }
}

/// Read a string key; unset and empty both fall back to the default
fn read_string(store: &dyn ConfigStore, key: ConfigKey) -> AppResult<Option<String>> {
    let value = match store.get(key.as_str())? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::String(_)) | None => None,
        Some(other) => {
            return Err(helpers::config_error(format!(
                "{} must be a string, found: {}",
                key.as_str(),
                other
            )))
        }
    };

    Ok(value.or_else(|| {
        key.default_value()
            .and_then(|v| v.as_str().map(str::to_string))
    }))
}

/// Read a bool key; the strings "true"/"false" are accepted as written by older stores
fn read_bool(store: &dyn ConfigStore, key: ConfigKey) -> AppResult<bool> {
    match store.get(key.as_str())? {
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) if s == "true" => Ok(true),
        Some(Value::String(s)) if s == "false" || s.is_empty() => Ok(false),
        None => Ok(key
            .default_value()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)),
        Some(other) => Err(helpers::config_error(format!(
            "{} must be a boolean, found: {}",
            key.as_str(),
            other
        ))),
    }
}

/// Provider configuration for one summarization call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Upstream host, without scheme
    pub domain: String,
    /// API key, never empty
    pub api_key: String,
    /// System prompt
    pub prompt: String,
    /// Whether to stream the response
    pub stream: bool,
}

impl SummaryConfig {
    /// Load and validate from the store
    ///
    /// Fails with `MissingCredential` when the API key is unset or empty.
    pub fn load(store: &dyn ConfigStore) -> AppResult<Self> {
        let api_key = read_string(store, ConfigKey::OpenAIApiKey)?
            .ok_or_else(|| helpers::missing_credential_error(MISSING_API_KEY_MESSAGE))?;

        let config = Self {
            domain: read_string(store, ConfigKey::OpenAIDomain)?
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            api_key,
            prompt: read_string(store, ConfigKey::OpenAISummaryPrompt)?
                .unwrap_or_else(|| DEFAULT_SUMMARY_PROMPT.to_string()),
            stream: read_bool(store, ConfigKey::OpenAIStream)?,
        };

        debug!("Loaded summary config: domain={}, stream={}", config.domain, config.stream);
        Ok(config)
    }

    /// Chat completions endpoint
    pub fn endpoint(&self) -> String {
        format!("https://{}/v1/chat/completions", self.domain)
    }
}

/// Shortcut settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutConfig {
    /// Translate shortcut accelerator string
    pub translate_shortcut: String,
}

impl ShortcutConfig {
    /// Load from the store
    pub fn load(store: &dyn ConfigStore) -> AppResult<Self> {
        Ok(Self {
            translate_shortcut: read_string(store, ConfigKey::TranslateShortcut)?
                .unwrap_or_else(|| DEFAULT_TRANSLATE_SHORTCUT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::MemoryStore;
    use crate::utils::error::AppError;

    #[test]
    fn test_defaults_applied() {
        let store: MemoryStore = [("openai_apikey", "sk-test")].into_iter().collect();
        let config = SummaryConfig::load(&store).unwrap();

        assert_eq!(config.domain, DEFAULT_DOMAIN);
        assert_eq!(config.prompt, DEFAULT_SUMMARY_PROMPT);
        assert!(!config.stream);
        assert_eq!(config.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let store: MemoryStore = [
            ("openai_apikey", "sk-test"),
            ("openai_domain", ""),
            ("openai_summary_prompt", ""),
        ]
        .into_iter()
        .collect();
        let config = SummaryConfig::load(&store).unwrap();

        assert_eq!(config.domain, DEFAULT_DOMAIN);
        assert_eq!(config.prompt, DEFAULT_SUMMARY_PROMPT);
    }

    #[test]
    fn test_missing_api_key() {
        let store = MemoryStore::new();
        let err = SummaryConfig::load(&store).unwrap_err();
        assert!(matches!(err, AppError::MissingCredential(_)));

        store.set("openai_apikey", "");
        let err = SummaryConfig::load(&store).unwrap_err();
        assert!(matches!(err, AppError::MissingCredential(_)));
    }

    #[test]
    fn test_stream_flag_types() {
        let store: MemoryStore = [("openai_apikey", "sk-test")].into_iter().collect();

        store.set("openai_stream", true);
        assert!(SummaryConfig::load(&store).unwrap().stream);

        store.set("openai_stream", "true");
        assert!(SummaryConfig::load(&store).unwrap().stream);

        store.set("openai_stream", 1);
        assert!(matches!(SummaryConfig::load(&store), Err(AppError::Config(_))));
    }

    #[test]
    fn test_wrong_type_for_string_key() {
        let store: MemoryStore = [("openai_apikey", "sk-test")].into_iter().collect();
        store.set("openai_domain", 42);
        assert!(matches!(SummaryConfig::load(&store), Err(AppError::Config(_))));
    }

    #[test]
    fn test_shortcut_default() {
        let store = MemoryStore::new();
        assert_eq!(
            ShortcutConfig::load(&store).unwrap().translate_shortcut,
            DEFAULT_TRANSLATE_SHORTCUT
        );
    }
}
