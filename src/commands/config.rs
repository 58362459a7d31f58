//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use hookmock_core::config::AppConfig;
use hookmock_core::error::AppError;
use plugin_use_hook_mock::{UseHookMockOptions, UseHookMockPlugin};

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file plus environment)
    Show,
    /// Validate the configuration, including the hook pattern
    Validate,
}

#[derive(Debug, Serialize)]
struct EffectiveConfig {
    #[serde(flatten)]
    app: AppConfig,
    use_hook_mock: UseHookMockOptions,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let effective = load(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&effective, "{}"),
                OutputFormat::Table => println!("{:#?}", effective),
            }
        }
        ConfigCommand::Validate => match load(config_path).and_then(check) {
            Ok(effective) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                output::print_kv(
                    "Resolver root",
                    &effective.app.resolver.effective_root().display().to_string(),
                );
                output::print_kv(
                    "Resolver exts",
                    &effective.app.resolver.extensions.join(", "),
                );
                let timeout = match effective.app.plugins.hook_timeout_seconds {
                    0 => "unlimited".to_string(),
                    secs => format!("{secs}s"),
                };
                output::print_kv("Hook timeout", &timeout);
                output::print_kv("Mock enabled", &effective.use_hook_mock.enabled.to_string());
                output::print_kv("Mock pattern", &effective.use_hook_mock.hook_pattern);
                output::print_kv("Mock exts", &effective.use_hook_mock.extensions.join(", "));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn load(config_path: &str) -> Result<EffectiveConfig, AppError> {
    Ok(EffectiveConfig {
        app: super::load_config(config_path)?,
        use_hook_mock: super::load_plugin_options(config_path)?,
    })
}

fn check(effective: EffectiveConfig) -> Result<EffectiveConfig, AppError> {
    if effective.app.resolver.extensions.is_empty() {
        return Err(AppError::validation("resolver.extensions must not be empty"));
    }
    UseHookMockPlugin::new(effective.use_hook_mock.clone())?;
    Ok(effective)
}
