//! Fallback resolver configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the host's filesystem resolver, which runs when no plugin
/// claims an import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Project root. Importer-less relative specifiers resolve against it.
    /// Defaults to the current working directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Extensions probed, in order, when a specifier has no exact match.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// File stem probed inside directories (`<dir>/<index_file><ext>`).
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root: None,
            extensions: default_extensions(),
            index_file: default_index_file(),
        }
    }
}

impl ResolverConfig {
    /// Returns the configured root, falling back to the working directory.
    pub fn effective_root(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_extensions() -> Vec<String> {
    [".ts", ".tsx", ".js", ".jsx", ".mjs", ".json"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_index_file() -> String {
    "index".to_string()
}
