//! `hookmock explain`: show the mock plugin's decision without resolving.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hookmock_core::error::AppError;
use hookmock_plugin::ResolveIdArgs;
use plugin_use_hook_mock::{CandidateReport, UseHookMockPlugin};

use crate::output::{self, OutputFormat};

/// Arguments for the explain command
#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Import specifier, e.g. `./use-theme?raw`
    pub specifier: String,

    /// File containing the import; omit for an entry import
    #[arg(short, long)]
    pub importer: Option<PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct CandidateRow {
    #[tabled(rename = "Candidate")]
    path: String,
    #[tabled(rename = "Exists")]
    exists: bool,
}

impl From<&CandidateReport> for CandidateRow {
    fn from(report: &CandidateReport) -> Self {
        Self {
            path: report.path.display().to_string(),
            exists: report.exists,
        }
    }
}

/// Execute the explain command
pub async fn execute(
    args: &ExplainArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let options = super::load_plugin_options(config_path)?;
    let enabled = options.enabled;
    let plugin = UseHookMockPlugin::new(options)?;

    let mut request = ResolveIdArgs::new(args.specifier.as_str());
    if let Some(importer) = &args.importer {
        request = request.with_importer(super::absolute_importer(importer)?);
    }

    let report = plugin.explain(&request).await;

    match format {
        OutputFormat::Json => output::print_json(&report, "{}"),
        OutputFormat::Table => {
            if !enabled {
                output::print_warning("use_hook_mock is disabled; resolve will not apply it");
            }
            output::print_kv("Specifier", &report.specifier);
            output::print_kv("Kind", report.kind.as_str());
            output::print_kv("Clean path", &report.clean);
            output::print_kv("Pattern", plugin.pattern().as_str());
            output::print_kv("Pattern matched", &report.pattern_matched.to_string());
            output::print_kv(
                "Selected",
                &report
                    .selected()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(defer)".to_string()),
            );

            if report.pattern_matched {
                let rows: Vec<CandidateRow> = report.candidates.iter().map(Into::into).collect();
                println!();
                output::print_list(&rows, format);
            }
        }
    }

    Ok(())
}
