//! Alias listing command.

use serde::Serialize;
use tabled::Tabled;

use compline_core::config::AppConfig;
use compline_core::error::AppError;
use compline_extension::kind::ExtensionKind;

use crate::output::{self, OutputFormat};

/// One declared alias
#[derive(Debug, Serialize, Tabled)]
pub struct AliasRow {
    /// Extension kind
    pub kind: ExtensionKind,
    /// Alias name
    pub alias: String,
    /// Base name it points at
    pub base: String,
    /// Whether an instance is registered under the alias
    pub registered: bool,
}

/// Execute the aliases command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let manager = super::build_manager(config);
    manager.start().await?;

    let registry = manager.registry();
    let mut rows = Vec::new();
    let mut pending = Vec::new();
    for kind in ExtensionKind::ALL {
        for alias in registry.alias_names(kind) {
            rows.push(AliasRow {
                kind,
                base: registry.alias(kind, &alias).unwrap_or_default(),
                registered: registry.get(kind, &alias).is_some(),
                alias,
            });
        }
        pending.extend(
            registry
                .pending_alias_targets(kind)
                .into_iter()
                .map(|base| format!("No {} extension named '{}' is loaded", kind, base)),
        );
    }

    output::print_list(&rows, format)?;
    if format == OutputFormat::Table {
        for msg in &pending {
            output::print_warning(msg);
        }
    }
    Ok(())
}
