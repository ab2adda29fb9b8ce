//! Settings views
//!
//! View bindings between configuration values and host commands

pub mod host;
pub mod shortcut;

pub use host::{HostCommands, REGISTER_TRANSLATE_SHORTCUT};
pub use shortcut::{ShortcutRegistrar, ShortcutRow, ShortcutSettingsView};
