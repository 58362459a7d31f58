//! The `resolve_id` interceptor that redirects hook imports to mocks.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use validator::Validate;

use hookmock_core::path::strip_query_and_fragment;
use hookmock_plugin::api::context::{PluginContext, ResolveOptions};
use hookmock_plugin::hooks::definitions::{HookResult, PluginOrder, ResolveIdArgs, ResolvedId};
use hookmock_plugin::hooks::registry::ResolveIdHandler;
use hookmock_plugin::registry::{Plugin, PluginInfo};

use crate::candidates::{exists, mock_candidates};
use crate::config::UseHookMockOptions;
use crate::error::MockPluginError;
use crate::pattern::HookPattern;
use crate::specifier::SpecifierKind;

/// Plugin id used for registration and `skip_self`.
pub const PLUGIN_ID: &str = "use-hook-mock";

/// Redirects `use-*` imports to a sibling `.mock` file when one exists.
#[derive(Debug, Clone)]
pub struct UseHookMockPlugin {
    extensions: Vec<String>,
    pattern: HookPattern,
}

/// One candidate mock path and whether it was found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateReport {
    /// Absolute candidate path.
    pub path: PathBuf,
    /// Whether the path exists.
    pub exists: bool,
}

/// Read-only account of how the plugin treats one import.
#[derive(Debug, Clone, Serialize)]
pub struct Interception {
    /// Raw specifier.
    pub specifier: String,
    /// Pre-filter classification.
    pub kind: SpecifierKind,
    /// Specifier without query and fragment.
    pub clean: String,
    /// Whether the clean specifier matched the hook pattern.
    pub pattern_matched: bool,
    /// Candidates in probe order. Empty unless the pattern matched.
    pub candidates: Vec<CandidateReport>,
}

impl Interception {
    /// First existing candidate, i.e. the one delegation would try first.
    pub fn selected(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .find(|c| c.exists)
            .map(|c| c.path.as_path())
    }
}

impl UseHookMockPlugin {
    /// Validates `options` and compiles the hook pattern.
    pub fn new(options: UseHookMockOptions) -> Result<Self, MockPluginError> {
        options.validate()?;

        if let Some(bad) = options
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains('/') || ext.contains('\\'))
        {
            return Err(MockPluginError::InvalidExtension {
                extension: bad.clone(),
            });
        }

        let pattern = HookPattern::new(&options.hook_pattern)?;

        Ok(Self {
            extensions: options.extensions,
            pattern,
        })
    }

    /// Configured extensions, in probe order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Compiled hook pattern.
    pub fn pattern(&self) -> &HookPattern {
        &self.pattern
    }

    /// Candidate mock paths for `args`, or `None` if the import is not
    /// interceptable.
    fn candidates_for(&self, args: &ResolveIdArgs) -> Option<Vec<PathBuf>> {
        let importer = args.importer()?;
        if !SpecifierKind::classify(&args.specifier, Some(importer)).is_eligible() {
            return None;
        }

        let clean = strip_query_and_fragment(&args.specifier);
        if !self.pattern.is_match(clean) {
            return None;
        }

        Some(mock_candidates(clean, importer, &self.extensions))
    }

    /// Describes what the plugin would do for `args` without delegating.
    pub async fn explain(&self, args: &ResolveIdArgs) -> Interception {
        let kind = SpecifierKind::classify(&args.specifier, args.importer());
        let clean = strip_query_and_fragment(&args.specifier).to_string();
        let pattern_matched = kind.is_eligible() && self.pattern.is_match(&clean);

        let mut candidates = Vec::new();
        if let Some(paths) = self.candidates_for(args) {
            for path in paths {
                let exists = exists(&path).await;
                candidates.push(CandidateReport { path, exists });
            }
        }

        Interception {
            specifier: args.specifier.clone(),
            kind,
            clean,
            pattern_matched,
            candidates,
        }
    }
}

#[async_trait]
impl Plugin for UseHookMockPlugin {
    fn info(&self) -> PluginInfo {
        hookmock_plugin::plugin_info!(
            id: PLUGIN_ID,
            name: "Use Hook Mock",
            version: env!("CARGO_PKG_VERSION"),
            description: "Resolves `use-*` hook imports to sibling `.mock` files",
            order: PluginOrder::Pre
        )
    }

    async fn on_load(&self) -> Result<(), String> {
        debug!(
            plugin_id = PLUGIN_ID,
            pattern = %self.pattern.as_str(),
            extensions = ?self.extensions,
            "Mock interceptor ready"
        );
        Ok(())
    }
}

#[async_trait]
impl ResolveIdHandler for UseHookMockPlugin {
    async fn resolve_id(&self, ctx: &PluginContext, args: &ResolveIdArgs) -> HookResult {
        let Some(candidates) = self.candidates_for(args) else {
            return HookResult::defer(PLUGIN_ID);
        };

        for candidate in candidates {
            if !exists(&candidate).await {
                continue;
            }

            let Some(target) = candidate.to_str() else {
                debug!(
                    specifier = %args.specifier,
                    candidate = %candidate.display(),
                    "Mock path is not valid UTF-8, skipping"
                );
                continue;
            };
            match ctx
                .resolve(target, args.importer(), ResolveOptions::skip_self())
                .await
            {
                Some(resolved) => {
                    debug!(
                        specifier = %args.specifier,
                        mock = %resolved.id,
                        "Hook import redirected to mock"
                    );
                    return HookResult::resolved(PLUGIN_ID, ResolvedId::new(resolved.id));
                }
                None => {
                    debug!(
                        specifier = %args.specifier,
                        candidate = %target,
                        "Mock exists but host did not resolve it"
                    );
                }
            }
        }

        HookResult::defer(PLUGIN_ID)
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    fn order(&self) -> PluginOrder {
        PluginOrder::Pre
    }
}
