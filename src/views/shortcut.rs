//! Shortcut settings view
//!
//! Shows the configured translate shortcut and registers it with the host
//! when the view is mounted.

use super::host::{HostCommands, REGISTER_TRANSLATE_SHORTCUT};
use crate::config::schema::{ShortcutConfig, DEFAULT_TRANSLATE_SHORTCUT};
use crate::config::ConfigStore;
use crate::utils::error::AppResult;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// i18n key of the row label
pub const TRANSLATE_SHORTCUT_LABEL: &str = "config.shortcut.translate";

/// Registers shortcuts with the host
///
/// Shared by every mount of the view. Registrations are serialized, and a
/// value the host already accepted is not sent again.
pub struct ShortcutRegistrar {
    host: Arc<dyn HostCommands>,
    registered: Mutex<Option<String>>,
}

impl ShortcutRegistrar {
    /// Create a registrar over the host command interface
    pub fn new(host: Arc<dyn HostCommands>) -> Self {
        Self {
            host,
            registered: Mutex::new(None),
        }
    }

    /// Register `shortcut` unless it is already the registered one
    ///
    /// Returns whether the host was called. A failed registration is not
    /// remembered, so the next attempt calls the host again.
    pub async fn register(&self, shortcut: &str) -> AppResult<bool> {
        let mut registered = self.registered.lock().await;
        if registered.as_deref() == Some(shortcut) {
            debug!("Shortcut {} already registered, skipping", shortcut);
            return Ok(false);
        }

        self.host
            .invoke(
                REGISTER_TRANSLATE_SHORTCUT,
                serde_json::json!({ "shortcut": shortcut }),
            )
            .await?;

        info!("Registered translate shortcut: {}", shortcut);
        *registered = Some(shortcut.to_string());
        Ok(true)
    }

    /// Last shortcut the host accepted
    pub async fn registered(&self) -> Option<String> {
        self.registered.lock().await.clone()
    }
}

/// Rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutRow {
    /// i18n key of the label
    pub label_key: &'static str,
    /// Current shortcut, read-only
    pub value: String,
}

/// A mounted shortcut settings view
pub struct ShortcutSettingsView {
    store: Arc<dyn ConfigStore>,
}

fn current_shortcut(store: &dyn ConfigStore) -> String {
    match ShortcutConfig::load(store) {
        Ok(config) => config.translate_shortcut,
        Err(e) => {
            warn!("Failed to read translate shortcut, using default: {}", e);
            DEFAULT_TRANSLATE_SHORTCUT.to_string()
        }
    }
}

impl ShortcutSettingsView {
    /// Mount the view, registering the current shortcut once
    ///
    /// Registration failures are logged and otherwise ignored.
    pub async fn mount(store: Arc<dyn ConfigStore>, registrar: &ShortcutRegistrar) -> Self {
        let shortcut = current_shortcut(store.as_ref());

        if let Err(e) = registrar.register(&shortcut).await {
            warn!("Failed to register translate shortcut {}: {}", shortcut, e);
        }

        Self { store }
    }

    /// Render the row with the store's current value
    pub fn render(&self) -> ShortcutRow {
        ShortcutRow {
            label_key: TRANSLATE_SHORTCUT_LABEL,
            value: current_shortcut(self.store.as_ref()),
        }
    }
}
