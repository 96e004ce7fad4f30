//! Resolved extension modules and their constructors.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use compline_core::error::AppError;
use compline_core::result::AppResult;

use crate::kind::ExtensionKind;
use crate::traits::{Filter, Source, Ui};

/// Builds a fresh, unnamed instance.
pub type Constructor<T> = Arc<dyn Fn() -> AppResult<Box<T>> + Send + Sync>;

/// What a resolver yields for a path: at most one constructor per kind.
#[derive(Default)]
pub struct ExtensionModule {
    ui: Option<Constructor<dyn Ui>>,
    source: Option<Constructor<dyn Source>>,
    filter: Option<Constructor<dyn Filter>>,
}

impl ExtensionModule {
    /// Creates an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exports a UI constructor.
    pub fn with_ui<U, F>(mut self, ctor: F) -> Self
    where
        U: Ui + 'static,
        F: Fn() -> AppResult<U> + Send + Sync + 'static,
    {
        self.ui = Some(Arc::new(move || ctor().map(|ui| Box::new(ui) as Box<dyn Ui>)));
        self
    }

    /// Exports a source constructor.
    pub fn with_source<S, F>(mut self, ctor: F) -> Self
    where
        S: Source + 'static,
        F: Fn() -> AppResult<S> + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(move || {
            ctor().map(|source| Box::new(source) as Box<dyn Source>)
        }));
        self
    }

    /// Exports a filter constructor.
    pub fn with_filter<T, F>(mut self, ctor: F) -> Self
    where
        T: Filter + 'static,
        F: Fn() -> AppResult<T> + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(move || {
            ctor().map(|filter| Box::new(filter) as Box<dyn Filter>)
        }));
        self
    }

    /// Returns whether the module exports a constructor for `kind`.
    pub fn exports(&self, kind: ExtensionKind) -> bool {
        match kind {
            ExtensionKind::Ui => self.ui.is_some(),
            ExtensionKind::Source => self.source.is_some(),
            ExtensionKind::Filter => self.filter.is_some(),
        }
    }

    /// The UI constructor, or a resolution error naming `path`.
    pub fn ui(&self, path: &Path) -> AppResult<Constructor<dyn Ui>> {
        self.ui.clone().ok_or_else(|| missing(ExtensionKind::Ui, path))
    }

    /// The source constructor, or a resolution error naming `path`.
    pub fn source(&self, path: &Path) -> AppResult<Constructor<dyn Source>> {
        self.source
            .clone()
            .ok_or_else(|| missing(ExtensionKind::Source, path))
    }

    /// The filter constructor, or a resolution error naming `path`.
    pub fn filter(&self, path: &Path) -> AppResult<Constructor<dyn Filter>> {
        self.filter
            .clone()
            .ok_or_else(|| missing(ExtensionKind::Filter, path))
    }
}

fn missing(kind: ExtensionKind, path: &Path) -> AppError {
    AppError::resolution(format!(
        "Module '{}' does not export a {kind} constructor",
        path.display()
    ))
}

impl fmt::Debug for ExtensionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionModule")
            .field("ui", &self.ui.is_some())
            .field("source", &self.source.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
