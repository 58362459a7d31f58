//! # hookmock-plugin
//!
//! Module resolution plugin host for HookMock. Provides:
//!
//! - Plugin lifecycle management (load, unload)
//! - `resolve_id` hook registry ordered by pre/normal/post and priority
//! - Hook dispatcher with first-result-wins / defer semantics
//! - Plugin context exposing delegated resolution (`skip_self`)
//! - A filesystem fallback resolver that assigns canonical module ids

pub mod api;
pub mod exports;
pub mod hooks;
pub mod host;
pub mod macros;
pub mod manager;
pub mod prelude;
pub mod registry;

pub use api::context::{PluginContext, ResolveOptions};
pub use exports::PluginExport;
pub use hooks::definitions::{HookResult, PluginOrder, ResolveAction, ResolveIdArgs, ResolvedId};
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::HookRegistry;
pub use host::{FsResolver, HostResolver};
pub use manager::PluginManager;
pub use registry::PluginRegistry;
