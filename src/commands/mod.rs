//! CLI command definitions and dispatch.

pub mod config;
pub mod explain;
pub mod resolve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use hookmock_core::config::AppConfig;
use hookmock_core::error::AppError;
use hookmock_core::path::normalize_lexically;
use hookmock_plugin::PluginManager;
use plugin_use_hook_mock::{UseHookMockOptions, use_hook_mock};

use crate::output::OutputFormat;

/// Config section holding the mock plugin options.
pub const PLUGIN_SECTION: &str = "use_hook_mock";

/// HookMock: resolve hook imports to co-located mocks
#[derive(Debug, Parser)]
#[command(name = "hookmock", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a specifier through the plugin pipeline
    Resolve(resolve::ResolveArgs),
    /// Show how the mock plugin treats a specifier
    Explain(explain::ExplainArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Resolve(args) => resolve::execute(args, &self.config, self.format).await,
            Commands::Explain(args) => explain::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: load the `[use_hook_mock]` section, defaulting when absent
pub fn load_plugin_options(config_path: &str) -> Result<UseHookMockOptions, AppError> {
    Ok(AppConfig::load_section::<UseHookMockOptions>(config_path, PLUGIN_SECTION)?
        .unwrap_or_default())
}

/// Helper: build a plugin manager with the mock plugin installed (if enabled)
pub async fn build_manager(config_path: &str) -> Result<PluginManager, AppError> {
    let config = load_config(config_path)?;
    let options = load_plugin_options(config_path)?;
    let manager = PluginManager::from_config(&config);

    if options.enabled {
        let export =
            use_hook_mock(options).map_err(|e| AppError::from(e).context(PLUGIN_SECTION))?;
        manager.load_plugin(export).await?;
    } else {
        tracing::info!("use_hook_mock disabled by configuration");
    }

    Ok(manager)
}

/// Helper: make an importer path absolute against the working directory
pub fn absolute_importer(importer: &Path) -> Result<PathBuf, AppError> {
    if importer.is_absolute() {
        return Ok(normalize_lexically(importer));
    }
    let cwd = std::env::current_dir()?;
    Ok(normalize_lexically(&cwd.join(importer)))
}
