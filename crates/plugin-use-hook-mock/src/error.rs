//! Construction errors for the mock plugin.
//!
//! Resolution never fails; these only surface while building the plugin
//! from options.

use hookmock_core::error::AppError;
use thiserror::Error;

/// Error raised while building the plugin from options.
#[derive(Debug, Error)]
pub enum MockPluginError {
    /// The hook pattern is not a valid regular expression.
    #[error("Invalid hook pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// An extension cannot be appended to a file name.
    #[error("Invalid mock extension '{extension}': must be non-empty and contain no path separators")]
    InvalidExtension {
        /// The rejected extension.
        extension: String,
    },

    /// Option validation failed.
    #[error("Invalid options: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl From<MockPluginError> for AppError {
    fn from(err: MockPluginError) -> Self {
        AppError::configuration(err.to_string())
    }
}
