//! Options for the mock plugin.
//!
//! Read from the `[use_hook_mock]` section of the application config or
//! built in code. Every field has a default.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pattern::DEFAULT_HOOK_PATTERN;

/// Options for [`crate::UseHookMockPlugin`].
#[derive(Debug, Clone, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct UseHookMockOptions {
    /// Extensions tried, in order, after the `.mock` infix.
    #[validate(length(min = 1, message = "at least one mock extension is required"))]
    pub extensions: Vec<String>,

    /// Regular expression deciding which specifiers are hook imports.
    ///
    /// Applied to the specifier with its query and fragment removed.
    #[validate(length(min = 1, message = "hook pattern must not be empty"))]
    pub hook_pattern: String,

    /// Whether the plugin should be installed at all.
    pub enabled: bool,
}

impl Default for UseHookMockOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            hook_pattern: DEFAULT_HOOK_PATTERN.to_string(),
            enabled: true,
        }
    }
}

impl UseHookMockOptions {
    /// Replaces the extension list.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the hook pattern.
    pub fn with_hook_pattern(mut self, pattern: &str) -> Self {
        self.hook_pattern = pattern.to_string();
        self
    }
}

fn default_extensions() -> Vec<String> {
    [".ts", ".tsx", ".js", ".jsx"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}
