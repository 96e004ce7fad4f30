//! Extension registry. Loads each extension file once and stores named
//! instances per kind.
//!
//! The registry keeps three namespaces (UI, source, filter), an alias table
//! per kind and the set of paths already loaded. Loads are serialized by a
//! single lock shared by every kind; lookups, removals and alias
//! declarations never wait on it.
//!
//! A load is all-or-nothing: the base instance and one instance per
//! matching alias are all constructed before any of them is published. If a
//! constructor fails, nothing is registered and the path stays unmarked so
//! the caller may retry.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use compline_core::error::{AppError, ErrorKind};
use compline_core::result::AppResult;

use crate::kind::{ExtensionKind, PerKind};
use crate::module::Constructor;
use crate::resolver::ModuleResolver;
use crate::traits::{Extension, Filter, Source, Ui};

/// A registered instance of any kind.
#[derive(Debug, Clone)]
pub enum Instance {
    /// A UI instance.
    Ui(Arc<dyn Ui>),
    /// A source instance.
    Source(Arc<dyn Source>),
    /// A filter instance.
    Filter(Arc<dyn Filter>),
}

impl Instance {
    /// The kind of this instance.
    pub fn kind(&self) -> ExtensionKind {
        match self {
            Self::Ui(_) => ExtensionKind::Ui,
            Self::Source(_) => ExtensionKind::Source,
            Self::Filter(_) => ExtensionKind::Filter,
        }
    }

    /// The name this instance is registered under.
    pub fn name(&self) -> &str {
        match self {
            Self::Ui(ui) => ui.name(),
            Self::Source(source) => source.name(),
            Self::Filter(filter) => filter.name(),
        }
    }

    /// Whether both handles point at the same object.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        match (self, other) {
            (Self::Ui(a), Self::Ui(b)) => Arc::ptr_eq(a, b),
            (Self::Source(a), Self::Source(b)) => Arc::ptr_eq(a, b),
            (Self::Filter(a), Self::Filter(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Result of [`Registry::load_path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The module was resolved and instantiated.
    Loaded {
        /// Base name derived from the file stem.
        name: String,
        /// Aliases that received their own instance, sorted.
        aliases: Vec<String>,
    },
    /// The path had already been loaded; nothing happened.
    AlreadyLoaded,
}

/// Name → instance table for one kind.
#[derive(Debug)]
struct Namespace<T: ?Sized> {
    entries: DashMap<String, Arc<T>>,
}

impl<T: ?Sized + Extension> Namespace<T> {
    fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Builds one named instance per entry of `names`.
    fn instantiate(ctor: &Constructor<T>, path: &Path, names: &[String]) -> AppResult<Vec<Arc<T>>> {
        names
            .iter()
            .map(|name| {
                let mut instance = ctor().map_err(|e| {
                    if e.is(ErrorKind::Instantiation) {
                        e
                    } else {
                        AppError::with_source(
                            ErrorKind::Instantiation,
                            format!(
                                "Constructor of '{}' failed for '{name}'",
                                path.display()
                            ),
                            e,
                        )
                    }
                })?;
                instance.set_name(name.clone());
                Ok(Arc::from(instance))
            })
            .collect()
    }

    fn publish(&self, instances: Vec<Arc<T>>) {
        for instance in instances {
            self.entries.insert(instance.name().to_string(), instance);
        }
    }

    fn get(&self, name: &str) -> Option<Arc<T>> {
        self.entries.get(name).map(|entry| entry.value().clone())
    }

    fn remove(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Derives the name a path registers under: the final component without
/// its last extension (`/ext/around.ts` → `around`).
pub fn base_name(path: &Path) -> AppResult<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::validation(format!(
                "Cannot derive an extension name from '{}'",
                path.display()
            ))
        })
}

/// Registry of loaded extensions.
///
/// Construct one per host and share it as `Arc<Registry>`.
#[derive(Debug)]
pub struct Registry {
    // Instances are declared before the resolver so they drop first; a
    // dynamic resolver owns the code behind them.
    uis: Namespace<dyn Ui>,
    sources: Namespace<dyn Source>,
    filters: Namespace<dyn Filter>,
    /// Alias → base name, per kind.
    aliases: PerKind<DashMap<String, String>>,
    /// Paths already loaded. Only written while `load_lock` is held.
    loaded: DashSet<PathBuf>,
    /// Serializes every `load_path` call across all kinds.
    load_lock: Mutex<()>,
    resolver: Arc<dyn ModuleResolver>,
}

impl Registry {
    /// Creates an empty registry resolving modules through `resolver`.
    pub fn new(resolver: Arc<dyn ModuleResolver>) -> Self {
        Self {
            uis: Namespace::new(),
            sources: Namespace::new(),
            filters: Namespace::new(),
            aliases: PerKind::default(),
            loaded: DashSet::new(),
            load_lock: Mutex::new(()),
            resolver,
        }
    }

    /// Declares `alias` as another name for `base`.
    ///
    /// Takes effect for loads that scan aliases after this call; instances
    /// already registered under `base` are not duplicated retroactively.
    pub fn declare_alias(&self, kind: ExtensionKind, alias: &str, base: &str) {
        self.aliases
            .get(kind)
            .insert(alias.to_string(), base.to_string());
        debug!(kind = %kind, alias = %alias, base = %base, "Alias declared");
    }

    /// Every alias declared for `kind`, sorted.
    pub fn alias_names(&self, kind: ExtensionKind) -> Vec<String> {
        let mut names: Vec<String> = self
            .aliases
            .get(kind)
            .iter()
            .map(|e| e.key().clone())
            .collect();
        names.sort();
        names
    }

    /// The base name bound to `alias`, if any.
    pub fn alias(&self, kind: ExtensionKind, alias: &str) -> Option<String> {
        self.aliases
            .get(kind)
            .get(alias)
            .map(|entry| entry.value().clone())
    }

    /// Aliases of `kind` whose target is `base`, sorted.
    fn aliases_of(&self, kind: ExtensionKind, base: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .aliases
            .get(kind)
            .iter()
            .filter(|e| e.value() == base)
            .map(|e| e.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Loads the extension at `path` as a `kind` extension.
    ///
    /// The first successful call for a path resolves the module, registers
    /// an instance under the file stem and one under every alias of that
    /// stem. Later calls for the same path return
    /// [`LoadOutcome::AlreadyLoaded`] without touching the resolver, even if
    /// the instances have since been removed.
    ///
    /// Resolver errors are returned as they are. A failing constructor is
    /// reported as [`ErrorKind::Instantiation`] naming the path and the
    /// instance name, with the constructor's own error kept as the source
    /// (an error that already has that kind passes through).
    /// Either way nothing is registered and the path stays unmarked.
    pub async fn load_path(
        &self,
        kind: ExtensionKind,
        path: impl AsRef<Path>,
    ) -> AppResult<LoadOutcome> {
        let path = path.as_ref();
        let _guard = self.load_lock.lock().await;

        if self.loaded.contains(path) {
            debug!(kind = %kind, path = %path.display(), "Extension path already loaded");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let name = base_name(path)?;
        let module = self.resolver.resolve(path).await?;

        let aliases = self.aliases_of(kind, &name);
        let mut names = Vec::with_capacity(aliases.len() + 1);
        names.push(name.clone());
        names.extend(aliases.iter().cloned());

        match kind {
            ExtensionKind::Ui => {
                let instances = Namespace::instantiate(&module.ui(path)?, path, &names)?;
                self.uis.publish(instances);
            }
            ExtensionKind::Source => {
                let instances = Namespace::instantiate(&module.source(path)?, path, &names)?;
                self.sources.publish(instances);
            }
            ExtensionKind::Filter => {
                let instances = Namespace::instantiate(&module.filter(path)?, path, &names)?;
                self.filters.publish(instances);
            }
        }

        self.loaded.insert(path.to_path_buf());

        info!(
            kind = %kind,
            name = %name,
            aliases = ?aliases,
            path = %path.display(),
            "Extension loaded"
        );

        Ok(LoadOutcome::Loaded { name, aliases })
    }

    /// The instance registered under `name` for `kind`.
    pub fn get(&self, kind: ExtensionKind, name: &str) -> Option<Instance> {
        match kind {
            ExtensionKind::Ui => self.ui(name).map(Instance::Ui),
            ExtensionKind::Source => self.source(name).map(Instance::Source),
            ExtensionKind::Filter => self.filter(name).map(Instance::Filter),
        }
    }

    /// The UI registered under `name`.
    pub fn ui(&self, name: &str) -> Option<Arc<dyn Ui>> {
        self.uis.get(name)
    }

    /// The source registered under `name`.
    pub fn source(&self, name: &str) -> Option<Arc<dyn Source>> {
        self.sources.get(name)
    }

    /// The filter registered under `name`.
    pub fn filter(&self, name: &str) -> Option<Arc<dyn Filter>> {
        self.filters.get(name)
    }

    /// Removes the instance registered under `name`. Returns whether one
    /// was present.
    ///
    /// The path it came from stays loaded; loading it again is a no-op.
    pub fn remove(&self, kind: ExtensionKind, name: &str) -> bool {
        let removed = match kind {
            ExtensionKind::Ui => self.uis.remove(name),
            ExtensionKind::Source => self.sources.remove(name),
            ExtensionKind::Filter => self.filters.remove(name),
        };
        if removed {
            info!(kind = %kind, name = %name, "Extension removed");
        }
        removed
    }

    /// Registered names for `kind`, sorted.
    pub fn names(&self, kind: ExtensionKind) -> Vec<String> {
        match kind {
            ExtensionKind::Ui => self.uis.names(),
            ExtensionKind::Source => self.sources.names(),
            ExtensionKind::Filter => self.filters.names(),
        }
    }

    /// Number of instances registered for `kind`.
    pub fn len(&self, kind: ExtensionKind) -> usize {
        match kind {
            ExtensionKind::Ui => self.uis.len(),
            ExtensionKind::Source => self.sources.len(),
            ExtensionKind::Filter => self.filters.len(),
        }
    }

    /// Whether `path` has been loaded.
    pub fn is_loaded(&self, path: impl AsRef<Path>) -> bool {
        self.loaded.contains(path.as_ref())
    }

    /// Every loaded path, sorted.
    pub fn loaded_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.loaded.iter().map(|p| p.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Distinct base names that some alias points at but that have no
    /// registered instance yet.
    pub fn pending_alias_targets(&self, kind: ExtensionKind) -> Vec<String> {
        let targets: HashSet<String> = self
            .aliases
            .get(kind)
            .iter()
            .map(|e| e.value().clone())
            .collect();
        let mut pending: Vec<String> = targets
            .into_iter()
            .filter(|base| self.get(kind, base).is_none())
            .collect();
        pending.sort();
        pending
    }
}
