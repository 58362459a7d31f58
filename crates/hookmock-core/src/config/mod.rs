//! Application configuration schemas.
//!
//! Configuration is read from a TOML file via the `config` crate and
//! overlaid with `HOOKMOCK__`-prefixed environment variables. Every section
//! has defaults, so a missing file yields a usable configuration.

pub mod logging;
pub mod plugin;
pub mod resolver;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;
use self::resolver::ResolverConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "HOOKMOCK";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fallback filesystem resolver settings.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Plugin host settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file plus environment overrides.
    ///
    /// The file is optional; environment variables use the `HOOKMOCK`
    /// prefix and `__` as the section separator.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = build(path)?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load a plugin-specific section (e.g. `use_hook_mock`) from the same
    /// sources as [`AppConfig::load`].
    ///
    /// Returns `Ok(None)` when the section is absent.
    pub fn load_section<T: DeserializeOwned>(path: &str, key: &str) -> Result<Option<T>, AppError> {
        let config = build(path)?;

        match config.get::<T>(key) {
            Ok(section) => Ok(Some(section)),
            Err(config::ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(AppError::configuration(format!(
                "Failed to deserialize config section '{key}': {e}"
            ))),
        }
    }
}

fn build(path: &str) -> Result<config::Config, AppError> {
    tracing::debug!(path = %path, "Loading configuration");

    config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))
}
