//! CLI command definitions and dispatch.

pub mod aliases;
pub mod config;
pub mod discover;
pub mod list;
pub mod load;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use compline_core::config::AppConfig;
use compline_core::error::AppError;
use compline_extension::manager::ExtensionManager;
use compline_extension::registry::Registry;
use compline_extension::resolver::{ChainResolver, DynamicResolver};

use crate::output::OutputFormat;

/// Compline: extension registry for completion engines
#[derive(Debug, Parser)]
#[command(name = "compline", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List extension files that would be loaded, with their names
    Discover(discover::DiscoverArgs),
    /// Load every extension, or one by name
    Load(load::LoadArgs),
    /// Start like a host would and list registered instances
    List,
    /// Show configured aliases and whether they resolved
    Aliases,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Discover(args) => discover::execute(args, &config, self.format).await,
            Commands::Load(args) => load::execute(args, &config, self.format).await,
            Commands::List => list::execute(&config, self.format).await,
            Commands::Aliases => aliases::execute(&config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: build a manager over built-ins and shared libraries
pub fn build_manager(config: &AppConfig) -> ExtensionManager {
    // SAFETY: libraries are only opened from directories named in the
    // user's own configuration.
    let dynamic = unsafe { DynamicResolver::new() };
    let resolver = ChainResolver::new()
        .then(Arc::new(compline_builtin::resolver()))
        .then(Arc::new(dynamic));
    let registry = Arc::new(Registry::new(Arc::new(resolver)));

    ExtensionManager::new(registry, config.extensions.clone())
        .with_known_paths(compline_builtin::paths())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compline_extension::kind::ExtensionKind;

    #[test]
    fn test_parse_load_by_name() {
        let cli = Cli::try_parse_from(["compline", "load", "--kind", "ui", "--name", "pum"])
            .expect("should parse");
        match cli.command {
            Commands::Load(args) => {
                assert_eq!(args.kind, Some(ExtensionKind::Ui));
                assert_eq!(args.name.as_deref(), Some("pum"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_load_name_requires_kind() {
        assert!(Cli::try_parse_from(["compline", "load", "--name", "pum"]).is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["compline", "discover", "--kind", "renderer"]).is_err());
    }

    #[tokio::test]
    async fn test_manager_knows_builtins() {
        let manager = build_manager(&AppConfig::default());
        let instance = manager
            .autoload(ExtensionKind::Filter, "matcher_head")
            .await
            .expect("builtin filter");
        assert_eq!(instance.name(), "matcher_head");
    }
}
