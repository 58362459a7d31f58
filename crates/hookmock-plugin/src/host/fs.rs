//! Filesystem fallback resolver.
//!
//! Resolves absolute and `./`/`../` specifiers by probing, in order: the
//! exact path, `<path><ext>` for each configured extension, then
//! `<path>/<index><ext>`. Entry requests without an importer also accept
//! bare root-relative paths. Canonical ids are lexically normalised absolute
//! paths with the original `?query#fragment` suffix re-attached.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use hookmock_core::config::resolver::ResolverConfig;
use hookmock_core::path::{
    has_url_scheme, is_absolute_specifier, is_relative_specifier, is_virtual,
    normalize_lexically, parent_dir, resolve_from, split_query,
};
use hookmock_core::{AppError, AppResult};

use super::HostResolver;
use crate::hooks::definitions::{ResolveIdArgs, ResolvedId};

/// Resolver backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct FsResolver {
    /// Base directory for importer-less relative specifiers.
    root: PathBuf,
    /// Extensions probed after the exact path.
    extensions: Vec<String>,
    /// Stem of directory index files.
    index_file: String,
}

impl FsResolver {
    /// Creates a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>, index_file: &str) -> Self {
        Self {
            root: root.into(),
            extensions,
            index_file: index_file.to_string(),
        }
    }

    /// Creates a resolver from configuration.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(
            config.effective_root(),
            config.extensions.clone(),
            &config.index_file,
        )
    }

    /// Returns the resolver root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the first existing file for `base`.
    async fn probe(&self, base: &Path) -> AppResult<Option<PathBuf>> {
        if is_file(base).await? {
            return Ok(Some(base.to_path_buf()));
        }

        for ext in &self.extensions {
            let candidate = with_suffix(base, ext);
            if is_file(&candidate).await? {
                return Ok(Some(candidate));
            }
        }

        for ext in &self.extensions {
            let candidate = base.join(format!("{}{}", self.index_file, ext));
            if is_file(&candidate).await? {
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }

    /// Path to probe for `path_part`, or `None` for bare specifiers.
    ///
    /// Entry requests treat bare paths (`src/main.ts`) as root-relative.
    fn base_for(&self, path_part: &str, args: &ResolveIdArgs) -> Option<PathBuf> {
        if is_absolute_specifier(path_part) {
            Some(normalize_lexically(Path::new(path_part)))
        } else if is_relative_specifier(path_part) {
            let dir = args.importer().map(parent_dir).unwrap_or(self.root.as_path());
            Some(resolve_from(dir, path_part))
        } else if args.is_entry && args.importer().is_none() {
            Some(resolve_from(&self.root, path_part))
        } else {
            None
        }
    }
}

#[async_trait]
impl HostResolver for FsResolver {
    async fn resolve(&self, args: &ResolveIdArgs) -> AppResult<Option<ResolvedId>> {
        let specifier = args.specifier.as_str();

        if is_virtual(specifier) {
            return Ok(None);
        }

        if has_url_scheme(specifier) {
            return Ok(Some(ResolvedId::external(specifier)));
        }

        let (path_part, suffix) = split_query(specifier);

        let Some(base) = self.base_for(path_part, args) else {
            debug!(specifier = %specifier, "Bare specifier left unresolved");
            return Ok(None);
        };

        let mut found = self.probe(&base).await?.map(|path| (path, suffix));

        // `?` and `#` are legal in directory names; retry an absolute path unsplit.
        if found.is_none() && !suffix.is_empty() && is_absolute_specifier(specifier) {
            let whole = normalize_lexically(Path::new(specifier));
            found = self.probe(&whole).await?.map(|path| (path, ""));
        }

        match &found {
            Some((path, _)) => {
                debug!(specifier = %specifier, path = %path.display(), "Resolved on disk")
            }
            None => debug!(specifier = %specifier, base = %base.display(), "No file found"),
        }

        Ok(found.map(|(path, suffix)| ResolvedId::from_path(&path, suffix)))
    }
}

/// Appends `suffix` to the final path segment (`a/b` + `.ts` = `a/b.ts`).
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Returns whether `path` is a regular file.
///
/// Missing paths and paths through non-directories are not files; a
/// permission failure is reported.
async fn is_file(path: &Path) -> AppResult<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Err(AppError::with_source(
            hookmock_core::error::ErrorKind::Io,
            format!("Cannot stat '{}': {e}", path.display()),
            e,
        )),
        Err(_) => Ok(false),
    }
}
