//! Plugin host configuration.

use serde::{Deserialize, Serialize};

/// Plugin host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Upper bound for a single `resolve_id` handler invocation, in seconds.
    ///
    /// A handler that exceeds it is treated as having deferred. `0` means
    /// no limit.
    #[serde(default = "default_hook_timeout")]
    pub hook_timeout_seconds: u64,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            hook_timeout_seconds: default_hook_timeout(),
        }
    }
}

fn default_hook_timeout() -> u64 {
    30
}
