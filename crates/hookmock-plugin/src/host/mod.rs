//! Host resolution: what runs when no plugin claims an import.

pub mod fs;

use async_trait::async_trait;

use hookmock_core::AppResult;

use crate::hooks::definitions::{ResolveIdArgs, ResolvedId};

pub use fs::FsResolver;

/// Resolver the dispatcher falls back to once every handler has deferred.
#[async_trait]
pub trait HostResolver: Send + Sync + std::fmt::Debug {
    /// Resolves a request to a canonical identity.
    ///
    /// `Ok(None)` means the module could not be found.
    async fn resolve(&self, args: &ResolveIdArgs) -> AppResult<Option<ResolvedId>>;
}
