//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use crate::api::context::{PluginContext, ResolveOptions};
pub use crate::exports::PluginExport;
pub use crate::hooks::definitions::{
    HookResult, PluginOrder, ResolveAction, ResolveIdArgs, ResolvedId,
};
pub use crate::hooks::registry::ResolveIdHandler;
pub use crate::registry::{Plugin, PluginInfo};

pub use crate::plugin_info;
