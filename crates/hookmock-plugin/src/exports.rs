//! Export bundle for registering a plugin together with its handlers.

use std::sync::Arc;

use crate::hooks::registry::ResolveIdHandler;
use crate::registry::Plugin;

/// A fully assembled plugin ready for [`crate::PluginManager::load_plugin`].
#[derive(Debug)]
pub struct PluginExport {
    /// The plugin instance.
    pub plugin: Arc<dyn Plugin>,
    /// `resolve_id` handlers to register.
    pub handlers: Vec<Arc<dyn ResolveIdHandler>>,
}

impl PluginExport {
    /// Creates a new plugin export with no handlers.
    pub fn new(plugin: Arc<dyn Plugin>) -> Self {
        Self {
            plugin,
            handlers: Vec::new(),
        }
    }

    /// Adds a `resolve_id` handler.
    pub fn with_handler(mut self, handler: Arc<dyn ResolveIdHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Returns the exported plugin's ID.
    pub fn plugin_id(&self) -> String {
        self.plugin.info().id
    }
}
