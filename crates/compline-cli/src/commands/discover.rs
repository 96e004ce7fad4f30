//! Extension discovery command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use compline_core::config::AppConfig;
use compline_core::error::AppError;
use compline_extension::kind::ExtensionKind;
use compline_extension::registry::base_name;

use crate::output::{self, OutputFormat};

/// Arguments for the discover command
#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Only show this kind (ui, source, filter)
    #[arg(short, long)]
    pub kind: Option<ExtensionKind>,
}

/// One discovered extension file
#[derive(Debug, Serialize, Tabled)]
pub struct CandidateRow {
    /// Extension kind
    pub kind: ExtensionKind,
    /// Name the file registers under
    pub name: String,
    /// File path
    pub path: String,
}

/// Execute the discover command
pub async fn execute(
    args: &DiscoverArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let manager = super::build_manager(config);
    let kinds = match args.kind {
        Some(kind) => vec![kind],
        None => ExtensionKind::ALL.to_vec(),
    };

    let mut rows = Vec::new();
    for kind in kinds {
        for path in manager.candidates(kind).await? {
            rows.push(CandidateRow {
                kind,
                name: base_name(&path)?,
                path: path.display().to_string(),
            });
        }
    }

    output::print_list(&rows, format)?;
    Ok(())
}
