//! Hook system: registry, dispatcher, and typed resolution definitions.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{HookResult, PluginOrder, ResolveAction, ResolveIdArgs, ResolvedId};
pub use dispatcher::HookDispatcher;
pub use registry::{HookRegistry, ResolveIdHandler};
