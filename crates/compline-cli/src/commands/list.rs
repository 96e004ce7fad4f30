//! Registered extension listing.

use serde::Serialize;
use tabled::Tabled;

use compline_core::config::AppConfig;
use compline_core::error::AppError;
use compline_extension::kind::ExtensionKind;

use crate::output::{self, OutputFormat};

/// One registered instance
#[derive(Debug, Serialize, Tabled)]
pub struct InstanceRow {
    /// Extension kind
    pub kind: ExtensionKind,
    /// Registered name
    pub name: String,
    /// Base name when `name` is an alias
    pub alias_of: String,
}

/// Execute the list command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let manager = super::build_manager(config);
    manager.start().await?;

    if !config.extensions.auto_load {
        output::print_warning("auto_load is disabled; only on-demand loads register extensions");
    }

    let registry = manager.registry();
    let rows: Vec<InstanceRow> = ExtensionKind::ALL
        .into_iter()
        .flat_map(|kind| {
            registry.names(kind).into_iter().map(move |name| InstanceRow {
                kind,
                alias_of: registry.alias(kind, &name).unwrap_or_default(),
                name,
            })
        })
        .collect();

    output::print_list(&rows, format)?;
    Ok(())
}
