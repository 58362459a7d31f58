//! Plugin context: the capabilities a handler may call back into.

use std::path::Path;
use std::sync::Weak;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::hooks::definitions::{ResolveIdArgs, ResolvedId};

/// Options for a delegated resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Exclude the calling plugin from the nested dispatch.
    pub skip_self: bool,
    /// Resolve as a build entry point.
    pub is_entry: bool,
}

impl ResolveOptions {
    /// Options with `skip_self` set.
    pub fn skip_self() -> Self {
        Self {
            skip_self: true,
            is_entry: false,
        }
    }
}

/// The host side of delegated resolution.
#[async_trait]
pub trait PluginResolver: Send + Sync {
    /// Runs the full resolution pipeline, skipping the listed plugin IDs.
    async fn resolve_skipping(&self, args: ResolveIdArgs, skip: Vec<String>) -> Option<ResolvedId>;
}

/// Context passed to handlers while they process a request.
///
/// Holds a weak handle on the host so a context outliving its dispatcher
/// simply stops resolving.
#[derive(Clone)]
pub struct PluginContext {
    /// Host resolution pipeline.
    resolver: Weak<dyn PluginResolver>,
    /// Plugin currently handling the request.
    plugin_id: String,
    /// Plugins already excluded by enclosing `skip_self` calls.
    skip: Vec<String>,
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext")
            .field("plugin_id", &self.plugin_id)
            .field("skip", &self.skip)
            .finish()
    }
}

impl PluginContext {
    /// Creates a context for `plugin_id`.
    pub fn new(resolver: Weak<dyn PluginResolver>, plugin_id: &str, skip: Vec<String>) -> Self {
        Self {
            resolver,
            plugin_id: plugin_id.to_string(),
            skip,
        }
    }

    /// Returns the plugin ID this context was issued to.
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Returns the plugin IDs excluded from nested resolution.
    pub fn skipped(&self) -> &[String] {
        &self.skip
    }

    /// Asks the host to resolve `specifier` as if imported from `importer`.
    ///
    /// Returns `None` when nothing resolves it or the host is gone.
    pub async fn resolve(
        &self,
        specifier: &str,
        importer: Option<&Path>,
        options: ResolveOptions,
    ) -> Option<ResolvedId> {
        let resolver = self.resolver.upgrade()?;

        let mut skip = self.skip.clone();
        if options.skip_self && !skip.iter().any(|id| id == &self.plugin_id) {
            skip.push(self.plugin_id.clone());
        }

        let args = ResolveIdArgs {
            specifier: specifier.to_string(),
            importer: importer.map(Path::to_path_buf),
            is_entry: options.is_entry,
        };

        resolver.resolve_skipping(args, skip).await
    }
}
