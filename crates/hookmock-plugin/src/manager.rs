//! Plugin manager: lifecycle management and the resolution entry point.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use hookmock_core::config::AppConfig;
use hookmock_core::config::plugin::PluginConfig;
use hookmock_core::error::AppError;

use crate::exports::PluginExport;
use crate::hooks::definitions::{ResolveIdArgs, ResolvedId};
use crate::hooks::dispatcher::{DispatchResult, HookDispatcher};
use crate::hooks::registry::HookRegistry;
use crate::host::{FsResolver, HostResolver};
use crate::registry::{PluginInfo, PluginRegistry};

/// Owns the plugin and hook registries and the dispatcher.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    plugin_registry: Arc<PluginRegistry>,
    /// Hook registry.
    hook_registry: Arc<HookRegistry>,
    /// Hook dispatcher.
    hook_dispatcher: Arc<HookDispatcher>,
}

impl PluginManager {
    /// Creates a manager that falls back to `host` when plugins defer.
    pub fn new(host: Arc<dyn HostResolver>, config: &PluginConfig) -> Self {
        let hook_registry = Arc::new(HookRegistry::new());
        let hook_dispatcher = HookDispatcher::new(
            hook_registry.clone(),
            host,
            Duration::from_secs(config.hook_timeout_seconds),
        );

        Self {
            plugin_registry: Arc::new(PluginRegistry::new()),
            hook_registry,
            hook_dispatcher,
        }
    }

    /// Creates a manager backed by the filesystem resolver.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(FsResolver::from_config(&config.resolver)),
            &config.plugins,
        )
    }

    /// Loads a plugin and registers its handlers.
    pub async fn load_plugin(&self, export: PluginExport) -> Result<(), AppError> {
        let PluginExport { plugin, handlers } = export;
        let info = plugin.info();
        let plugin_id = info.id.clone();

        plugin.on_load().await.map_err(|e| {
            error!(plugin_id = %plugin_id, error = %e, "Plugin load failed");
            AppError::plugin(format!("Plugin '{}' load failed: {}", plugin_id, e))
        })?;

        self.plugin_registry
            .register(plugin.clone())
            .await
            .map_err(|e| AppError::conflict(format!("Plugin registration failed: {e}")))?;

        let handler_count = handlers.len();
        for handler in handlers {
            self.hook_registry.register(handler).await;
        }

        info!(
            plugin_id = %plugin_id,
            name = %info.name,
            version = %info.version,
            order = %info.order,
            handlers = handler_count,
            "Plugin loaded"
        );

        Ok(())
    }

    /// Unregisters and unloads a plugin.
    pub async fn unload_plugin(&self, plugin_id: &str) -> Result<(), AppError> {
        let plugin = self
            .plugin_registry
            .get(plugin_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Plugin '{}' not found", plugin_id)))?;

        self.hook_registry.unregister_plugin(plugin_id).await;

        self.plugin_registry
            .unregister(plugin_id)
            .await
            .map_err(|e| AppError::internal(format!("Plugin unregistration failed: {e}")))?;

        if let Err(e) = plugin.on_unload().await {
            warn!(
                plugin_id = %plugin_id,
                error = %e,
                "Plugin unload returned error"
            );
        }

        info!(plugin_id = %plugin_id, "Plugin unloaded");

        Ok(())
    }

    /// Unloads all plugins.
    pub async fn unload_all(&self) -> Result<(), AppError> {
        let plugins = self.plugin_registry.list().await;

        for info in &plugins {
            if let Err(e) = self.unload_plugin(&info.id).await {
                error!(
                    plugin_id = %info.id,
                    error = %e,
                    "Error unloading plugin"
                );
            }
        }

        info!("All plugins unloaded");
        Ok(())
    }

    /// Runs the full pipeline and reports which plugin answered.
    pub async fn dispatch(&self, specifier: &str, importer: Option<&Path>) -> DispatchResult {
        let args = request(specifier, importer);
        self.hook_dispatcher.dispatch(&args, &[]).await
    }

    /// Resolves a specifier, returning `None` when nothing resolves it.
    pub async fn try_resolve(&self, specifier: &str, importer: Option<&Path>) -> Option<ResolvedId> {
        self.dispatch(specifier, importer).await.resolved
    }

    /// Resolves a specifier, failing with `NotFound` when nothing resolves it.
    pub async fn resolve(
        &self,
        specifier: &str,
        importer: Option<&Path>,
    ) -> Result<ResolvedId, AppError> {
        self.try_resolve(specifier, importer).await.ok_or_else(|| {
            let from = importer
                .map(|p| format!(" from '{}'", p.display()))
                .unwrap_or_default();
            AppError::not_found(format!("Cannot resolve '{}'{}", specifier, from))
        })
    }

    /// Returns the hook registry.
    pub fn hook_registry(&self) -> &Arc<HookRegistry> {
        &self.hook_registry
    }

    /// Lists all loaded plugins.
    pub async fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugin_registry.list().await
    }
}

fn request(specifier: &str, importer: Option<&Path>) -> ResolveIdArgs {
    let args = ResolveIdArgs::new(specifier);
    match importer {
        Some(path) => args.with_importer(path),
        None => args.as_entry(),
    }
}
