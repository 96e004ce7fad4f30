//! Extension discovery configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where extensions are searched for and which aliases are declared up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    /// Search roots. Each root holds `ui/`, `sources/` and `filters/`.
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    /// File extensions (without the dot) accepted as extension modules.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,
    /// Whether to load every discovered extension on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
    /// Aliases declared before any extension is loaded.
    #[serde(default)]
    pub aliases: AliasConfig,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            file_extensions: default_file_extensions(),
            auto_load: default_true(),
            aliases: AliasConfig::default(),
        }
    }
}

/// Alias name → base name, per extension kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasConfig {
    /// UI aliases.
    #[serde(default)]
    pub ui: BTreeMap<String, String>,
    /// Source aliases.
    #[serde(default)]
    pub source: BTreeMap<String, String>,
    /// Filter aliases.
    #[serde(default)]
    pub filter: BTreeMap<String, String>,
}

fn default_file_extensions() -> Vec<String> {
    vec!["so".to_string(), "dylib".to_string(), "dll".to_string()]
}

fn default_true() -> bool {
    true
}
