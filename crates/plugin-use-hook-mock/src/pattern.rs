//! Hook import classification.

use regex::Regex;

use crate::error::MockPluginError;

/// Matches specifiers whose final path segment starts with `use-`.
pub const DEFAULT_HOOK_PATTERN: &str = r"(^|/)use-[^/]+$";

/// Compiled hook pattern.
#[derive(Debug, Clone)]
pub struct HookPattern {
    regex: Regex,
}

impl HookPattern {
    /// Compiles a hook pattern.
    pub fn new(pattern: &str) -> Result<Self, MockPluginError> {
        let regex = Regex::new(pattern).map_err(|source| MockPluginError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Returns `true` if `clean_specifier` is a hook import.
    pub fn is_match(&self, clean_specifier: &str) -> bool {
        self.regex.is_match(clean_specifier)
    }

    /// Returns the source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for HookPattern {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_HOOK_PATTERN).expect("default hook pattern is valid"),
        }
    }
}
