//! Module resolvers: turn a path into an [`ExtensionModule`].

pub mod dynamic;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use compline_core::error::{AppError, ErrorKind};
use compline_core::result::AppResult;

use crate::module::ExtensionModule;

pub use dynamic::DynamicResolver;

/// Resolves a path to an executable extension module.
///
/// Implementations must be idempotent per path and report failures as
/// errors with [`ErrorKind::Resolution`].
#[async_trait]
pub trait ModuleResolver: Send + Sync + fmt::Debug {
    /// Resolves the module at `path`.
    async fn resolve(&self, path: &Path) -> AppResult<Arc<ExtensionModule>>;
}

/// In-process table of modules keyed by path.
#[derive(Debug, Default)]
pub struct StaticResolver {
    modules: DashMap<PathBuf, Arc<ExtensionModule>>,
}

impl StaticResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` under `path`, replacing any previous module.
    pub fn insert(&self, path: impl Into<PathBuf>, module: ExtensionModule) {
        self.modules.insert(path.into(), Arc::new(module));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_module(self, path: impl Into<PathBuf>, module: ExtensionModule) -> Self {
        self.insert(path, module);
        self
    }

    /// Returns the registered paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.modules.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ModuleResolver for StaticResolver {
    async fn resolve(&self, path: &Path) -> AppResult<Arc<ExtensionModule>> {
        self.modules
            .get(path)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                AppError::resolution(format!("No module registered at '{}'", path.display()))
            })
    }
}

/// Tries several resolvers in order; the first that resolves wins.
///
/// Only resolution failures fall through to the next resolver. Any other
/// error is returned as is.
#[derive(Debug, Default)]
pub struct ChainResolver {
    resolvers: Vec<Arc<dyn ModuleResolver>>,
}

impl ChainResolver {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resolver to the chain.
    pub fn then(mut self, resolver: Arc<dyn ModuleResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }
}

#[async_trait]
impl ModuleResolver for ChainResolver {
    async fn resolve(&self, path: &Path) -> AppResult<Arc<ExtensionModule>> {
        let mut last_error = None;
        for resolver in &self.resolvers {
            match resolver.resolve(path).await {
                Ok(module) => return Ok(module),
                Err(e) if e.is(ErrorKind::Resolution) => {
                    debug!(path = %path.display(), error = %e, "Resolver declined path");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_error.unwrap_or_else(|| {
            AppError::resolution(format!(
                "No resolver configured for '{}'",
                path.display()
            ))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_resolver_unknown_path() {
        let resolver = StaticResolver::new();
        let err = resolver
            .resolve(Path::new("/ext/missing.rs"))
            .await
            .expect_err("unknown path");
        assert!(err.is(ErrorKind::Resolution));
    }

    #[tokio::test]
    async fn test_static_resolver_returns_same_module() {
        let resolver = StaticResolver::new().with_module("/ext/a.rs", ExtensionModule::new());
        let first = resolver.resolve(Path::new("/ext/a.rs")).await.expect("resolve");
        let second = resolver.resolve(Path::new("/ext/a.rs")).await.expect("resolve");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_chain_falls_through_on_resolution_error() {
        let empty = Arc::new(StaticResolver::new());
        let filled = Arc::new(StaticResolver::new().with_module("/ext/b.rs", ExtensionModule::new()));
        let chain = ChainResolver::new().then(empty).then(filled);

        assert!(chain.resolve(Path::new("/ext/b.rs")).await.is_ok());
        let err = chain
            .resolve(Path::new("/ext/c.rs"))
            .await
            .expect_err("no resolver knows c");
        assert!(err.is(ErrorKind::Resolution));
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let err = ChainResolver::new()
            .resolve(Path::new("/ext/a.rs"))
            .await
            .expect_err("empty chain");
        assert!(err.message.contains("No resolver configured"));
    }
}
