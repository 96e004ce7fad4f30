//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use compline_core::config::AppConfig;
use compline_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration and summarize it
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(&config, format)?,
        ConfigCommand::Validate => {
            let missing: Vec<String> = config
                .extensions
                .directories
                .iter()
                .filter(|dir| !dir.is_dir())
                .map(|dir| dir.display().to_string())
                .collect();

            output::print_success(&format!("Configuration '{}' is valid", config_path));
            output::print_kv("Log level", &config.logging.level);
            output::print_kv("Log format", &config.logging.format);
            output::print_kv(
                "Directories",
                &config.extensions.directories.len().to_string(),
            );
            output::print_kv("File extensions", &config.extensions.file_extensions.join(", "));
            output::print_kv("Auto load", &config.extensions.auto_load.to_string());
            let aliases = &config.extensions.aliases;
            output::print_kv(
                "Aliases",
                &(aliases.ui.len() + aliases.source.len() + aliases.filter.len()).to_string(),
            );
            for dir in missing {
                output::print_warning(&format!("Directory '{}' does not exist", dir));
            }
        }
    }

    Ok(())
}
