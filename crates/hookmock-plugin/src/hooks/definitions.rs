//! Typed payloads for the `resolve_id` hook.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a plugin's handlers run relative to other plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginOrder {
    /// Runs before normal plugins.
    Pre,
    /// Default position.
    #[default]
    Normal,
    /// Runs after normal plugins.
    Post,
}

impl PluginOrder {
    /// Sort rank (lower runs first).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Pre => 0,
            Self::Normal => 1,
            Self::Post => 2,
        }
    }

    /// Returns the string name of this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Normal => "normal",
            Self::Post => "post",
        }
    }
}

impl std::fmt::Display for PluginOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single resolution request: one import edge in the module graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveIdArgs {
    /// Raw specifier as written after the import keyword.
    pub specifier: String,
    /// Absolute path of the importing module. `None` for entry imports.
    pub importer: Option<PathBuf>,
    /// Whether this request resolves a build entry point.
    pub is_entry: bool,
}

impl ResolveIdArgs {
    /// Creates a request with no importer.
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            importer: None,
            is_entry: false,
        }
    }

    /// Sets the importing module.
    pub fn with_importer(mut self, importer: impl Into<PathBuf>) -> Self {
        self.importer = Some(importer.into());
        self
    }

    /// Marks the request as an entry-point resolution.
    pub fn as_entry(mut self) -> Self {
        self.is_entry = true;
        self
    }

    /// Returns the importer path, if any.
    pub fn importer(&self) -> Option<&Path> {
        self.importer.as_deref()
    }
}

/// Host-canonical identity of a resolved module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedId {
    /// Canonical module id.
    pub id: String,
    /// Whether the module is left outside the graph (e.g. URL imports).
    pub external: bool,
}

impl ResolvedId {
    /// Creates an internal module identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: false,
        }
    }

    /// Creates an external module identity.
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: true,
        }
    }

    /// Builds an identity from a file path and a `?query#fragment` suffix.
    pub fn from_path(path: &Path, suffix: &str) -> Self {
        Self::new(format!("{}{}", path.display(), suffix))
    }
}

/// Action returned by a `resolve_id` handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveAction {
    /// Not handled here; the next handler (or the host fallback) decides.
    Defer,
    /// Resolution overridden with this identity.
    Resolve(ResolvedId),
}

/// Result returned from a handler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookResult {
    /// What the dispatcher should do next.
    pub action: ResolveAction,
    /// Plugin ID that produced this result.
    pub plugin_id: String,
}

impl HookResult {
    /// Creates a defer result.
    pub fn defer(plugin_id: &str) -> Self {
        Self {
            action: ResolveAction::Defer,
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Creates a result that overrides resolution.
    pub fn resolved(plugin_id: &str, resolved: ResolvedId) -> Self {
        Self {
            action: ResolveAction::Resolve(resolved),
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Returns `true` if the handler deferred.
    pub fn is_defer(&self) -> bool {
        matches!(self.action, ResolveAction::Defer)
    }

    /// Consumes the result, returning the identity if one was produced.
    pub fn into_resolved(self) -> Option<ResolvedId> {
        match self.action {
            ResolveAction::Defer => None,
            ResolveAction::Resolve(resolved) => Some(resolved),
        }
    }
}
