//! UI action registration and dispatch.
//!
//! The exporter is triggered by a toolbar button. Wiring that up is a
//! one-time setup call: [`setup`] registers the `export-html` item with an
//! [`ActionRegistry`], and the host later calls back by key. The handler
//! holds no state of its own; everything it needs arrives with the call.
//!
//! [`Toolbar`] is the in-process registry used by the CLI and tests. It
//! records registered items and runs the export for a clicked key.

use crate::config::ExportConfig;
use crate::convert::{convert, ExportContext};
use crate::error::ExportError;
use crate::model::Outcome;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Key of the export action.
pub const EXPORT_HTML: &str = "export-html";

/// Where a UI item is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Toolbar,
}

/// A clickable UI item bound to an action key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiItem {
    pub key: String,
    pub title: String,
    /// Markup the host renders for the item; `data-on-click` names the key.
    pub template: String,
}

/// The toolbar button that triggers the export.
pub fn export_html_item() -> UiItem {
    let title = "Export current page as HTML";
    UiItem {
        key: EXPORT_HTML.to_string(),
        title: title.to_string(),
        template: format!(
            r##"<a class="button" data-on-click="{EXPORT_HTML}" title="{title}"><svg class="w-6 h-6" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" width="24" height="24" fill="none" viewBox="0 0 24 24"><path stroke="#ffffff" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="m8 8-4 4 4 4m8 0 4-4-4-4m-2-3-4 14"/></svg></a>"##
        ),
    }
}

/// Host-side registry of UI items.
pub trait ActionRegistry {
    /// Register `item` in `slot`. Registering the same key twice is an error.
    fn register_ui_item(&mut self, slot: Slot, item: UiItem) -> Result<(), ExportError>;
}

/// One-time setup: register the export action.
pub fn setup(registry: &mut dyn ActionRegistry) -> Result<(), ExportError> {
    registry.register_ui_item(Slot::Toolbar, export_html_item())
}

/// In-process toolbar.
#[derive(Debug, Default)]
pub struct Toolbar {
    items: Vec<(Slot, UiItem)>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> impl Iterator<Item = &UiItem> {
        self.items.iter().map(|(_, item)| item)
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.items.iter().any(|(_, item)| item.key == key)
    }

    /// Run the action bound to `key`, as the host does on click.
    ///
    /// This is the top-level handler: an export failure is logged here
    /// before being returned to the caller.
    pub async fn dispatch(
        &self,
        key: &str,
        ctx: &ExportContext,
        config: &ExportConfig,
    ) -> Result<Outcome, ExportError> {
        if !self.is_registered(key) {
            return Err(ExportError::Action {
                key: key.to_string(),
                reason: "no such action registered".to_string(),
            });
        }
        debug!("Dispatching action: {}", key);
        match key {
            EXPORT_HTML => convert(ctx, config).await.inspect_err(|e| {
                error!("Export failed: {e}");
            }),
            other => Err(ExportError::Action {
                key: other.to_string(),
                reason: "registered without a handler".to_string(),
            }),
        }
    }
}

impl ActionRegistry for Toolbar {
    fn register_ui_item(&mut self, slot: Slot, item: UiItem) -> Result<(), ExportError> {
        if self.is_registered(&item.key) {
            return Err(ExportError::Action {
                key: item.key,
                reason: "already registered".to_string(),
            });
        }
        debug!("Registered UI item '{}' in {:?}", item.key, slot);
        self.items.push((slot, item));
        Ok(())
    }
}
