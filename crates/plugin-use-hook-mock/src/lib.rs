//! # Plugin Use Hook Mock
//!
//! A resolution plugin that intercepts imports following the hook naming
//! convention (final path segment starting with `use-`) and, when a sibling
//! `<specifier>.mock<ext>` file exists next to the importer, resolves the
//! import to that mock instead of the real module.
//!
//! The plugin is fail-open: anything it cannot decide is deferred to the
//! rest of the resolution pipeline.

pub mod candidates;
pub mod config;
pub mod error;
pub mod pattern;
pub mod plugin;
pub mod specifier;

use std::sync::Arc;

use hookmock_plugin::PluginExport;

pub use config::UseHookMockOptions;
pub use error::MockPluginError;
pub use pattern::HookPattern;
pub use plugin::{CandidateReport, Interception, PLUGIN_ID, UseHookMockPlugin};
pub use specifier::SpecifierKind;

/// Builds the plugin and bundles it for [`hookmock_plugin::PluginManager::load_plugin`].
pub fn use_hook_mock(options: UseHookMockOptions) -> Result<PluginExport, MockPluginError> {
    let plugin = Arc::new(UseHookMockPlugin::new(options)?);
    Ok(PluginExport::new(plugin.clone()).with_handler(plugin))
}
