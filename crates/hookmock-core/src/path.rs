//! Specifier and path helpers shared by the host resolver and plugins.
//!
//! Paths are normalised lexically: `.` and `..` segments are folded without
//! touching the filesystem, so symlinks are never followed.

use std::path::{Component, Path, PathBuf};

/// Prefix marking a virtual (plugin-internal) module id.
pub const VIRTUAL_PREFIX: char = '\0';

/// Returns the specifier with any query string and fragment removed.
///
/// Everything from the first `?` or `#` onwards is dropped.
pub fn strip_query_and_fragment(specifier: &str) -> &str {
    split_query(specifier).0
}

/// Splits a specifier into its path part and its `?query#fragment` suffix.
pub fn split_query(specifier: &str) -> (&str, &str) {
    match specifier.find(|c: char| c == '?' || c == '#') {
        Some(idx) => specifier.split_at(idx),
        None => (specifier, ""),
    }
}

/// Returns `true` for scheme-qualified specifiers such as `https://cdn/x.js`.
///
/// The scheme must be one or more ASCII letters followed by `://`.
pub fn has_url_scheme(specifier: &str) -> bool {
    match specifier.find("://") {
        Some(0) | None => false,
        Some(idx) => specifier[..idx].bytes().all(|b| b.is_ascii_alphabetic()),
    }
}

/// Returns `true` for ids carrying the virtual module marker.
pub fn is_virtual(specifier: &str) -> bool {
    specifier.starts_with(VIRTUAL_PREFIX)
}

/// Returns `true` for specifiers that are absolute filesystem paths.
pub fn is_absolute_specifier(specifier: &str) -> bool {
    specifier.starts_with('/') || Path::new(specifier).is_absolute()
}

/// Returns `true` for `./` and `../` style specifiers.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Folds `.` and `..` components without consulting the filesystem.
///
/// `..` above the root is dropped; `..` at the start of a relative path is
/// kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(segment) => out.push(segment),
        }
    }

    out
}

/// Resolves `target` against `base_dir` and normalises the result.
///
/// An absolute `target` replaces `base_dir` entirely.
pub fn resolve_from(base_dir: &Path, target: impl AsRef<Path>) -> PathBuf {
    normalize_lexically(&base_dir.join(target))
}

/// Returns the directory containing `file`, or `file` itself when it has no
/// parent (e.g. the filesystem root).
pub fn parent_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(file)
}
