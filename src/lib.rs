//! AI Summary Library
//!
//! Summarizes text through an OpenAI-compatible chat completion API and binds
//! the translate shortcut setting to the host runtime

pub mod config;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

// Re-export common types
pub use config::{ConfigStore, JsonFileStore, MemoryStore, Settings, SummaryConfig};
pub use models::Language;
pub use services::{HttpClient, OpenAISummarizer, ReqwestClient, SummaryStream};
pub use utils::error::{AppError, AppResult};
pub use views::{HostCommands, ShortcutRegistrar, ShortcutSettingsView};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
