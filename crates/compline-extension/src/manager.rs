//! Extension manager: bulk loading from configuration and lazy autoload.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use compline_core::config::extensions::ExtensionsConfig;
use compline_core::error::AppError;
use compline_core::result::AppResult;

use crate::discovery;
use crate::kind::ExtensionKind;
use crate::registry::{Instance, LoadOutcome, Registry, base_name};

/// A path that failed to load during [`ExtensionManager::load_all`].
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    /// Kind the path was loaded as.
    pub kind: ExtensionKind,
    /// The offending path.
    pub path: PathBuf,
    /// Rendered error.
    pub error: String,
}

/// Summary of a bulk load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Newly registered base names.
    pub loaded: Vec<(ExtensionKind, String)>,
    /// Paths that were already loaded.
    pub skipped: usize,
    /// Paths that failed to load.
    pub failed: Vec<LoadFailure>,
}

/// Drives a [`Registry`] from configuration.
///
/// Extensions are found in two places: paths registered up front with
/// [`with_known_path`](Self::with_known_path) (built-ins), then the
/// configured search directories.
#[derive(Debug)]
pub struct ExtensionManager {
    registry: Arc<Registry>,
    config: ExtensionsConfig,
    known: Vec<(ExtensionKind, PathBuf)>,
}

impl ExtensionManager {
    /// Creates a manager for `registry`.
    pub fn new(registry: Arc<Registry>, config: ExtensionsConfig) -> Self {
        Self {
            registry,
            config,
            known: Vec::new(),
        }
    }

    /// Adds a path that is searched before the configured directories.
    pub fn with_known_path(mut self, kind: ExtensionKind, path: impl Into<PathBuf>) -> Self {
        self.known.push((kind, path.into()));
        self
    }

    /// Adds several known paths.
    pub fn with_known_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = (ExtensionKind, P)>,
        P: Into<PathBuf>,
    {
        self.known
            .extend(paths.into_iter().map(|(kind, path)| (kind, path.into())));
        self
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Declares every alias from the configuration.
    pub fn declare_configured_aliases(&self) {
        let aliases = &self.config.aliases;
        for (kind, table) in [
            (ExtensionKind::Ui, &aliases.ui),
            (ExtensionKind::Source, &aliases.source),
            (ExtensionKind::Filter, &aliases.filter),
        ] {
            for (alias, base) in table {
                self.registry.declare_alias(kind, alias, base);
            }
        }
    }

    /// Host startup: declares configured aliases, then loads everything if
    /// `auto_load` is set. Otherwise extensions are loaded on demand by
    /// [`autoload`](Self::autoload).
    pub async fn start(&self) -> AppResult<LoadReport> {
        self.declare_configured_aliases();
        if !self.config.auto_load {
            info!("Extension auto-load disabled");
            return Ok(LoadReport::default());
        }
        self.load_all().await
    }

    /// Every candidate path for `kind`: known paths first, then discovered
    /// files.
    pub async fn candidates(&self, kind: ExtensionKind) -> AppResult<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = self
            .known
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, path)| path.clone())
            .collect();
        paths.extend(
            discovery::discover(
                &self.config.directories,
                kind,
                &self.config.file_extensions,
            )
            .await?,
        );
        Ok(paths)
    }

    /// Loads every candidate of every kind.
    ///
    /// A path that fails is recorded in the report and does not stop the
    /// others. Only discovery I/O errors abort the whole run.
    pub async fn load_all(&self) -> AppResult<LoadReport> {
        let mut report = LoadReport::default();

        for kind in ExtensionKind::ALL {
            for path in self.candidates(kind).await? {
                match self.registry.load_path(kind, &path).await {
                    Ok(LoadOutcome::Loaded { name, .. }) => report.loaded.push((kind, name)),
                    Ok(LoadOutcome::AlreadyLoaded) => report.skipped += 1,
                    Err(e) => {
                        warn!(kind = %kind, path = %path.display(), error = %e, "Extension failed to load");
                        report.failed.push(LoadFailure {
                            kind,
                            path,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            loaded = report.loaded.len(),
            skipped = report.skipped,
            failed = report.failed.len(),
            "Extensions loaded"
        );

        Ok(report)
    }

    /// Returns the instance registered as `name`, loading it first if
    /// needed.
    ///
    /// An alias is mapped to its base name to find the file; loading the
    /// base file then registers the alias too.
    pub async fn autoload(&self, kind: ExtensionKind, name: &str) -> AppResult<Instance> {
        if let Some(instance) = self.registry.get(kind, name) {
            return Ok(instance);
        }

        let base = self
            .registry
            .alias(kind, name)
            .unwrap_or_else(|| name.to_string());

        let path = match self.find_known(kind, &base) {
            Some(path) => Some(path),
            None => {
                discovery::find(
                    &self.config.directories,
                    kind,
                    &base,
                    &self.config.file_extensions,
                )
                .await?
            }
        };
        let path = path.ok_or_else(|| {
            AppError::not_found(format!("No {kind} extension file found for '{name}'"))
        })?;

        self.registry.load_path(kind, &path).await?;

        self.registry.get(kind, name).ok_or_else(|| {
            AppError::not_found(format!(
                "{kind} '{name}' is not registered although '{}' is loaded",
                path.display()
            ))
        })
    }

    fn find_known(&self, kind: ExtensionKind, base: &str) -> Option<PathBuf> {
        self.known
            .iter()
            .filter(|(k, _)| *k == kind)
            .find(|(_, path)| base_name(path).is_ok_and(|stem| stem == base))
            .map(|(_, path)| path.clone())
    }
}
