//! Shared test helpers for integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use hookmock_core::config::AppConfig;
use hookmock_core::config::resolver::ResolverConfig;
use hookmock_plugin::PluginManager;
use plugin_use_hook_mock::{UseHookMockOptions, use_hook_mock};

/// A throwaway project tree with a plugin manager rooted at it
pub struct TestProject {
    /// Temporary project root, removed on drop
    pub dir: TempDir,
    /// Manager with the mock plugin loaded
    pub manager: Arc<PluginManager>,
}

impl TestProject {
    /// Create an empty project with the default mock options
    pub async fn new() -> Self {
        Self::with_options(UseHookMockOptions::default()).await
    }

    /// Create an empty project; the plugin is only loaded when enabled
    pub async fn with_options(options: UseHookMockOptions) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let config = AppConfig {
            resolver: ResolverConfig {
                root: Some(dir.path().to_path_buf()),
                ..ResolverConfig::default()
            },
            ..AppConfig::default()
        };

        let manager = PluginManager::from_config(&config);
        if options.enabled {
            manager
                .load_plugin(use_hook_mock(options).expect("Failed to build plugin"))
                .await
                .expect("Failed to load plugin");
        }

        Self {
            dir,
            manager: Arc::new(manager),
        }
    }

    /// Project root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty file (and parents) at `rel`
    pub fn touch(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create dirs");
        }
        std::fs::write(&path, "export {};\n").expect("Failed to write file");
        path
    }

    /// Resolve `specifier` from the project file `importer`, returning the id
    pub async fn resolve(&self, specifier: &str, importer: &str) -> Option<String> {
        let importer = self.root().join(importer);
        self.manager
            .try_resolve(specifier, Some(&importer))
            .await
            .map(|r| r.id)
    }

    /// Canonical id of a project file
    pub fn id(&self, rel: &str) -> String {
        self.root().join(rel).display().to_string()
    }
}
