//! Mock candidate paths and existence probing.

use std::path::{Path, PathBuf};

use hookmock_core::path::{parent_dir, resolve_from};

/// Infix inserted between the specifier and the extension.
pub const MOCK_INFIX: &str = ".mock";

/// Builds `<dir(importer)>/<clean>.mock<ext>` for each extension, in order.
pub fn mock_candidates(clean_specifier: &str, importer: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let base = parent_dir(importer);
    extensions
        .iter()
        .map(|ext| resolve_from(base, format!("{clean_specifier}{MOCK_INFIX}{ext}")))
        .collect()
}

/// Returns `true` if `path` exists.
///
/// Errors while checking count as "does not exist".
pub async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
