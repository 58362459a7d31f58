//! `hookmock resolve`: run a specifier through the full pipeline.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hookmock_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the resolve command
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Import specifier, e.g. `./use-theme`
    pub specifier: String,

    /// File containing the import; omit for an entry import
    #[arg(short, long)]
    pub importer: Option<PathBuf>,
}

/// One resolution outcome
#[derive(Debug, Serialize, Tabled)]
pub struct ResolutionRow {
    /// Requested specifier
    #[tabled(rename = "Specifier")]
    pub specifier: String,
    /// Resolved module id
    #[tabled(rename = "Id")]
    pub id: String,
    /// Plugin (or `host`) that produced the id
    #[tabled(rename = "Resolved By")]
    pub resolved_by: String,
    /// Whether the id is external
    #[tabled(rename = "External")]
    pub external: bool,
}

/// Execute the resolve command
pub async fn execute(
    args: &ResolveArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let manager = super::build_manager(config_path).await?;
    let importer = args
        .importer
        .as_deref()
        .map(super::absolute_importer)
        .transpose()?;

    let result = manager.dispatch(&args.specifier, importer.as_deref()).await;
    manager.unload_all().await?;

    let Some(resolved) = result.resolved else {
        let from = importer
            .map(|p| format!(" from '{}'", p.display()))
            .unwrap_or_default();
        return Err(AppError::not_found(format!(
            "Cannot resolve '{}'{}",
            args.specifier, from
        )));
    };

    let row = ResolutionRow {
        specifier: args.specifier.clone(),
        id: resolved.id,
        resolved_by: result.resolved_by.unwrap_or_default(),
        external: resolved.external,
    };
    output::print_list(&[row], format);

    Ok(())
}
