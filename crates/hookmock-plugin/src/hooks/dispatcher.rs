//! Hook dispatcher: runs `resolve_id` handlers in order and falls back to
//! the host resolver.
//!
//! - Handlers are called in registry order, skipping excluded plugins.
//! - The first handler returning `Resolve` wins; later handlers do not run.
//! - A handler exceeding the timeout is treated as having deferred. A zero
//!   timeout means no limit.
//! - When every handler defers, the host resolver decides.

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::definitions::{ResolveAction, ResolveIdArgs, ResolvedId};
use super::registry::HookRegistry;
use crate::api::context::{PluginContext, PluginResolver};
use crate::host::HostResolver;

/// Name reported in [`DispatchResult::resolved_by`] for fallback results.
pub const HOST_RESOLVER_ID: &str = "host";

/// Outcome of dispatching one resolution request.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// The resolved identity, if anything resolved the request.
    pub resolved: Option<ResolvedId>,
    /// Plugin ID (or [`HOST_RESOLVER_ID`]) that produced the identity.
    pub resolved_by: Option<String>,
    /// Number of handlers invoked.
    pub handlers_invoked: usize,
}

/// Dispatches resolution requests to registered handlers.
#[derive(Debug)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
    /// Resolver used when all handlers defer.
    fallback: Arc<dyn HostResolver>,
    /// Per-handler time limit; zero disables it.
    handler_timeout: Duration,
    /// Handle on ourselves for building plugin contexts.
    this: Weak<HookDispatcher>,
}

impl HookDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        registry: Arc<HookRegistry>,
        fallback: Arc<dyn HostResolver>,
        handler_timeout: Duration,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            registry,
            fallback,
            handler_timeout,
            this: this.clone(),
        })
    }

    /// Dispatches a request to all handlers not listed in `skip`.
    pub async fn dispatch(&self, args: &ResolveIdArgs, skip: &[String]) -> DispatchResult {
        let handlers = self.registry.get_handlers().await;
        let mut invoked = 0;

        debug!(
            specifier = %args.specifier,
            importer = ?args.importer,
            handler_count = handlers.len(),
            skipped = skip.len(),
            "Dispatching resolve_id"
        );

        for handler in &handlers {
            let plugin_id = handler.plugin_id();
            if skip.iter().any(|id| id == plugin_id) {
                continue;
            }

            let resolver: Weak<dyn PluginResolver> = self.this.clone();
            let ctx = PluginContext::new(resolver, plugin_id, skip.to_vec());
            invoked += 1;

            let outcome = if self.handler_timeout.is_zero() {
                Ok(handler.resolve_id(&ctx, args).await)
            } else {
                tokio::time::timeout(self.handler_timeout, handler.resolve_id(&ctx, args)).await
            };

            let result = match outcome {
                Ok(r) => r,
                Err(_) => {
                    error!(
                        specifier = %args.specifier,
                        plugin_id = %plugin_id,
                        timeout_ms = self.handler_timeout.as_millis() as u64,
                        "resolve_id handler timed out"
                    );
                    continue;
                }
            };

            match result.action {
                ResolveAction::Defer => {
                    debug!(
                        specifier = %args.specifier,
                        plugin_id = %result.plugin_id,
                        "Handler deferred"
                    );
                }
                ResolveAction::Resolve(resolved) => {
                    debug!(
                        specifier = %args.specifier,
                        plugin_id = %result.plugin_id,
                        id = %resolved.id,
                        "Handler resolved"
                    );
                    return DispatchResult {
                        resolved: Some(resolved),
                        resolved_by: Some(result.plugin_id),
                        handlers_invoked: invoked,
                    };
                }
            }
        }

        let resolved = match self.fallback.resolve(args).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(
                    specifier = %args.specifier,
                    error = %e,
                    "Host resolver failed"
                );
                None
            }
        };

        DispatchResult {
            resolved_by: resolved.as_ref().map(|_| HOST_RESOLVER_ID.to_string()),
            resolved,
            handlers_invoked: invoked,
        }
    }

    /// Dispatches a request to every handler.
    pub async fn resolve(&self, args: &ResolveIdArgs) -> Option<ResolvedId> {
        self.dispatch(args, &[]).await.resolved
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

#[async_trait]
impl PluginResolver for HookDispatcher {
    async fn resolve_skipping(&self, args: ResolveIdArgs, skip: Vec<String>) -> Option<ResolvedId> {
        self.dispatch(&args, &skip).await.resolved
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hookmock_core::AppResult;

    use super::*;
    use crate::hooks::definitions::{HookResult, PluginOrder};
    use crate::hooks::registry::ResolveIdHandler;
    use crate::api::context::ResolveOptions;

    /// Host stand-in resolving every specifier to `host:<specifier>`.
    #[derive(Debug)]
    struct EchoHost;

    #[async_trait]
    impl HostResolver for EchoHost {
        async fn resolve(&self, args: &ResolveIdArgs) -> AppResult<Option<ResolvedId>> {
            Ok(Some(ResolvedId::new(format!("host:{}", args.specifier))))
        }
    }

    #[derive(Debug)]
    struct Fixed {
        id: &'static str,
        order: PluginOrder,
        answer: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(id: &'static str, order: PluginOrder, answer: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                id,
                order,
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ResolveIdHandler for Fixed {
        async fn resolve_id(&self, _ctx: &PluginContext, _args: &ResolveIdArgs) -> HookResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Some(id) => HookResult::resolved(self.id, ResolvedId::new(id)),
                None => HookResult::defer(self.id),
            }
        }

        fn plugin_id(&self) -> &str {
            self.id
        }

        fn order(&self) -> PluginOrder {
            self.order
        }
    }

    /// Re-resolves `<specifier>.real` through the context with `skip_self`.
    #[derive(Debug)]
    struct Delegating;

    #[async_trait]
    impl ResolveIdHandler for Delegating {
        async fn resolve_id(&self, ctx: &PluginContext, args: &ResolveIdArgs) -> HookResult {
            let target = format!("{}.real", args.specifier);
            match ctx
                .resolve(&target, args.importer(), ResolveOptions::skip_self())
                .await
            {
                Some(resolved) => HookResult::resolved("delegating", resolved),
                None => HookResult::defer("delegating"),
            }
        }

        fn plugin_id(&self) -> &str {
            "delegating"
        }
    }

    #[derive(Debug)]
    struct Slow;

    #[async_trait]
    impl ResolveIdHandler for Slow {
        async fn resolve_id(&self, _ctx: &PluginContext, _args: &ResolveIdArgs) -> HookResult {
            tokio::time::sleep(Duration::from_secs(60)).await;
            HookResult::resolved("slow", ResolvedId::new("too-late"))
        }

        fn plugin_id(&self) -> &str {
            "slow"
        }
    }

    fn dispatcher(registry: Arc<HookRegistry>) -> Arc<HookDispatcher> {
        HookDispatcher::new(registry, Arc::new(EchoHost), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_first_resolving_handler_wins() {
        let registry = Arc::new(HookRegistry::new());
        let deferring = Fixed::new("deferring", PluginOrder::Pre, None);
        let first = Fixed::new("first", PluginOrder::Normal, Some("/first.ts"));
        let second = Fixed::new("second", PluginOrder::Normal, Some("/second.ts"));
        registry.register(deferring.clone()).await;
        registry.register(first.clone()).await;
        registry.register(second.clone()).await;

        let result = dispatcher(registry)
            .dispatch(&ResolveIdArgs::new("./x"), &[])
            .await;

        assert_eq!(result.resolved, Some(ResolvedId::new("/first.ts")));
        assert_eq!(result.resolved_by.as_deref(), Some("first"));
        assert_eq!(result.handlers_invoked, 2);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_deferring_falls_back_to_host() {
        let registry = Arc::new(HookRegistry::new());
        registry
            .register(Fixed::new("a", PluginOrder::Normal, None))
            .await;

        let result = dispatcher(registry)
            .dispatch(&ResolveIdArgs::new("./x"), &[])
            .await;

        assert_eq!(result.resolved, Some(ResolvedId::new("host:./x")));
        assert_eq!(result.resolved_by.as_deref(), Some(HOST_RESOLVER_ID));
    }

    #[tokio::test]
    async fn test_skipped_plugins_are_not_invoked() {
        let registry = Arc::new(HookRegistry::new());
        let skipped = Fixed::new("skipped", PluginOrder::Pre, Some("/nope.ts"));
        registry.register(skipped.clone()).await;

        let result = dispatcher(registry)
            .dispatch(&ResolveIdArgs::new("./x"), &["skipped".to_string()])
            .await;

        assert_eq!(skipped.calls.load(Ordering::SeqCst), 0);
        assert_eq!(result.resolved, Some(ResolvedId::new("host:./x")));
    }

    #[tokio::test]
    async fn test_delegation_skips_caller() {
        let registry = Arc::new(HookRegistry::new());
        registry.register(Arc::new(Delegating)).await;

        let resolved = dispatcher(registry)
            .resolve(&ResolveIdArgs::new("./use-a").with_importer("/proj/a.ts"))
            .await;

        // Without skip_self this would recurse into Delegating forever
        assert_eq!(resolved, Some(ResolvedId::new("host:./use-a.real")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_handler_counts_as_defer() {
        let registry = Arc::new(HookRegistry::new());
        registry.register(Arc::new(Slow)).await;

        let resolved = dispatcher(registry).resolve(&ResolveIdArgs::new("./x")).await;

        assert_eq!(resolved, Some(ResolvedId::new("host:./x")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_means_unbounded() {
        let registry = Arc::new(HookRegistry::new());
        registry.register(Arc::new(Slow)).await;

        let dispatcher = HookDispatcher::new(registry, Arc::new(EchoHost), Duration::ZERO);
        let result = dispatcher.dispatch(&ResolveIdArgs::new("./x"), &[]).await;

        assert_eq!(result.resolved, Some(ResolvedId::new("too-late")));
        assert_eq!(result.resolved_by.as_deref(), Some("slow"));
    }
}
