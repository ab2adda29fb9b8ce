//! Configuration management module
//!
//! Process settings from the environment, the persisted key-value store and
//! the schema that resolves store values into typed configuration.

pub mod schema;
pub mod settings;
pub mod store;

pub use schema::{ConfigKey, ShortcutConfig, SummaryConfig};
pub use settings::{HttpConfig, LoggingConfig, Settings};
pub use store::{ConfigStore, JsonFileStore, MemoryStore};
