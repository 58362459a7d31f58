//! Pre-filter deciding whether an import can be a mock candidate at all.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use hookmock_core::path::{has_url_scheme, is_absolute_specifier, is_virtual};

/// How the plugin classifies an import before matching the hook pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecifierKind {
    /// Entry import with no importer to be relative to.
    NoImporter,
    /// Plugin-internal id starting with `\0`.
    Virtual,
    /// Scheme-qualified URL such as `https://...`.
    Url,
    /// Absolute filesystem path.
    Absolute,
    /// Anything else; continues on to the hook pattern.
    Eligible,
}

impl SpecifierKind {
    /// Classifies `specifier` imported from `importer`.
    ///
    /// Checks run in order, so a virtual id without importer reports
    /// `NoImporter`.
    pub fn classify(specifier: &str, importer: Option<&Path>) -> Self {
        if importer.is_none() {
            Self::NoImporter
        } else if is_virtual(specifier) {
            Self::Virtual
        } else if has_url_scheme(specifier) {
            Self::Url
        } else if is_absolute_specifier(specifier) {
            Self::Absolute
        } else {
            Self::Eligible
        }
    }

    /// Returns `true` if the import may be redirected to a mock.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Returns the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoImporter => "no_importer",
            Self::Virtual => "virtual",
            Self::Url => "url",
            Self::Absolute => "absolute",
            Self::Eligible => "eligible",
        }
    }
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
