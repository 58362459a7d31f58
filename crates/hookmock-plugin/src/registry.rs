//! Loaded plugin instances and their metadata.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::hooks::definitions::PluginOrder;

/// Metadata about a loaded plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Order bucket the plugin's handlers run in.
    pub order: PluginOrder,
}

/// Trait that all plugins must implement.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once when the plugin is loaded.
    async fn on_load(&self) -> Result<(), String> {
        Ok(())
    }

    /// Called when the plugin is unloaded.
    async fn on_unload(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug)]
struct Loaded {
    plugin: Arc<dyn Plugin>,
    info: PluginInfo,
}

/// Loaded plugins keyed by id, with their metadata captured at load time.
#[derive(Debug)]
pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, Loaded>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a plugin; fails if its id is taken.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> Result<(), String> {
        let info = plugin.info();
        let mut plugins = self.plugins.write().await;

        if plugins.contains_key(&info.id) {
            return Err(format!("Plugin '{}' is already registered", info.id));
        }

        info!(plugin_id = %info.id, order = %info.order, "Registering plugin");
        plugins.insert(info.id.clone(), Loaded { plugin, info });
        Ok(())
    }

    /// Removes a plugin, returning the instance.
    pub async fn unregister(&self, plugin_id: &str) -> Result<Arc<dyn Plugin>, String> {
        let loaded = self
            .plugins
            .write()
            .await
            .remove(plugin_id)
            .ok_or_else(|| format!("Plugin '{}' not found", plugin_id))?;

        info!(plugin_id = %plugin_id, "Plugin unregistered");
        Ok(loaded.plugin)
    }

    /// Gets a plugin by id.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .read()
            .await
            .get(plugin_id)
            .map(|loaded| loaded.plugin.clone())
    }

    /// Lists metadata in pre/normal/post order, then by id.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let mut infos: Vec<PluginInfo> = self
            .plugins
            .read()
            .await
            .values()
            .map(|loaded| loaded.info.clone())
            .collect();
        infos.sort_by(|a, b| (a.order.rank(), &a.id).cmp(&(b.order.rank(), &b.id)));
        infos
    }

    /// Number of loaded plugins.
    pub async fn count(&self) -> usize {
        self.plugins.read().await.len()
    }

    /// Whether `plugin_id` is loaded.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        self.plugins.read().await.contains_key(plugin_id)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
