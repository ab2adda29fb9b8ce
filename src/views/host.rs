//! Host command interface
//!
//! Commands exposed by the desktop host runtime, invoked by name with JSON
//! arguments.

use crate::utils::error::AppResult;
use async_trait::async_trait;
use serde_json::Value;

/// Command registering the global translate shortcut, args `{ "shortcut": string }`
pub const REGISTER_TRANSLATE_SHORTCUT: &str = "register_translate_shortcut";

/// Host command capability
#[async_trait]
pub trait HostCommands: Send + Sync {
    /// Invoke a host command
    async fn invoke(&self, command: &str, args: Value) -> AppResult<Value>;
}
