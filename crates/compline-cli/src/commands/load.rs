//! Extension load command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use compline_core::config::AppConfig;
use compline_core::error::AppError;
use compline_extension::kind::ExtensionKind;

use crate::output::{self, OutputFormat};

/// Arguments for the load command
#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Kind of the extension to load
    #[arg(short, long, requires = "name")]
    pub kind: Option<ExtensionKind>,

    /// Name (or alias) of the extension to load
    #[arg(short, long, requires = "kind")]
    pub name: Option<String>,
}

/// One path that failed to load
#[derive(Debug, Serialize, Tabled)]
pub struct FailureRow {
    /// Extension kind
    pub kind: ExtensionKind,
    /// File path
    pub path: String,
    /// Error message
    pub error: String,
}

/// Execute the load command
pub async fn execute(
    args: &LoadArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let manager = super::build_manager(config);
    manager.declare_configured_aliases();

    if let (Some(kind), Some(name)) = (args.kind, args.name.as_deref()) {
        let instance = manager.autoload(kind, name).await?;
        output::print_success(&format!("{} '{}' loaded", instance.kind(), instance.name()));
        return Ok(());
    }

    let report = manager.load_all().await?;

    if format == OutputFormat::Json {
        output::print_item(&report, format)?;
        return Ok(());
    }

    output::print_success(&format!(
        "{} loaded, {} already loaded, {} failed",
        report.loaded.len(),
        report.skipped,
        report.failed.len()
    ));
    if !report.failed.is_empty() {
        let rows: Vec<FailureRow> = report
            .failed
            .into_iter()
            .map(|failure| FailureRow {
                kind: failure.kind,
                path: failure.path.display().to_string(),
                error: failure.error,
            })
            .collect();
        output::print_list(&rows, format)?;
    }
    Ok(())
}
