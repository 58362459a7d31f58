//! Hook registry: plugins register `resolve_id` handlers, kept sorted by
//! plugin order and priority.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use super::definitions::{HookResult, PluginOrder, ResolveIdArgs};
use crate::api::context::PluginContext;

/// Trait for `resolve_id` handler implementations.
#[async_trait]
pub trait ResolveIdHandler: Send + Sync + std::fmt::Debug {
    /// Handles one resolution request.
    ///
    /// Return `HookResult::defer` to let later handlers and the host decide.
    async fn resolve_id(&self, ctx: &PluginContext, args: &ResolveIdArgs) -> HookResult;

    /// Returns the plugin ID owning this handler.
    fn plugin_id(&self) -> &str;

    /// Returns the plugin order bucket.
    fn order(&self) -> PluginOrder {
        PluginOrder::Normal
    }

    /// Returns the priority within the order bucket (lower = runs first).
    fn priority(&self) -> i32 {
        100
    }
}

/// Entry in the hook registry.
#[derive(Debug)]
struct HookEntry {
    /// The handler.
    handler: Arc<dyn ResolveIdHandler>,
    /// Order bucket.
    order: PluginOrder,
    /// Priority inside the bucket.
    priority: i32,
    /// Plugin that registered this handler.
    plugin_id: String,
}

/// Registry of `resolve_id` handlers.
///
/// Handlers with the same order and priority keep registration order.
#[derive(Debug)]
pub struct HookRegistry {
    handlers: RwLock<Vec<HookEntry>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Registers a handler.
    pub async fn register(&self, handler: Arc<dyn ResolveIdHandler>) {
        let plugin_id = handler.plugin_id().to_string();
        let order = handler.order();
        let priority = handler.priority();

        let mut handlers = self.handlers.write().await;
        handlers.push(HookEntry {
            handler,
            order,
            priority,
            plugin_id: plugin_id.clone(),
        });

        // Stable sort keeps registration order for ties
        handlers.sort_by_key(|e| (e.order.rank(), e.priority));

        info!(
            plugin_id = %plugin_id,
            order = %order,
            priority = priority,
            "resolve_id handler registered"
        );
    }

    /// Unregisters all handlers for a specific plugin.
    pub async fn unregister_plugin(&self, plugin_id: &str) {
        let mut handlers = self.handlers.write().await;
        handlers.retain(|e| e.plugin_id != plugin_id);

        info!(plugin_id = %plugin_id, "All handlers unregistered for plugin");
    }

    /// Returns all handlers in dispatch order.
    pub async fn get_handlers(&self) -> Vec<Arc<dyn ResolveIdHandler>> {
        let handlers = self.handlers.read().await;
        handlers.iter().map(|e| e.handler.clone()).collect()
    }

    /// Returns the number of registered handlers.
    pub async fn handler_count(&self) -> usize {
        self.handlers.read().await.len()
    }

    /// Returns the owning plugin IDs in dispatch order.
    pub async fn registered_plugins(&self) -> Vec<String> {
        let handlers = self.handlers.read().await;
        handlers.iter().map(|e| e.plugin_id.clone()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
