//! Dynamic extension resolver using `libloading` (feature-gated).

#[cfg(feature = "dynamic")]
mod dynamic_loader {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use async_trait::async_trait;
    use dashmap::DashMap;
    use tracing::info;

    use compline_core::error::{AppError, ErrorKind};
    use compline_core::result::AppResult;

    use crate::ffi::{self, MODULE_ENTRY_SYMBOL, ModuleEntryFn};
    use crate::module::ExtensionModule;
    use crate::resolver::ModuleResolver;

    /// Loads extension modules from shared libraries (.so / .dll / .dylib).
    pub struct DynamicResolver {
        /// Resolved modules, one per path.
        modules: DashMap<PathBuf, Arc<ExtensionModule>>,
        /// Opened libraries. Declared after `modules` so that module code
        /// is dropped before the library backing it is unmapped.
        libraries: DashMap<PathBuf, libloading::Library>,
    }

    impl DynamicResolver {
        /// Creates a new dynamic resolver.
        ///
        /// # Safety
        /// Resolving a path runs arbitrary code from that library. Only
        /// load trusted extensions, and keep the resolver alive for as long
        /// as any instance built from one of its modules.
        pub unsafe fn new() -> Self {
            Self {
                modules: DashMap::new(),
                libraries: DashMap::new(),
            }
        }

        /// Number of libraries opened so far.
        pub fn loaded_count(&self) -> usize {
            self.libraries.len()
        }

        /// Keeps `library` open for `path` and returns the module stored
        /// for it. The first module cached for a path wins.
        fn cache(
            &self,
            path: &Path,
            library: libloading::Library,
            module: ExtensionModule,
        ) -> Arc<ExtensionModule> {
            self.libraries.entry(path.to_path_buf()).or_insert(library);
            self.modules
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(module))
                .clone()
        }
    }

    fn open(path: &Path) -> AppResult<(libloading::Library, ExtensionModule)> {
        let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
            AppError::with_source(
                ErrorKind::Resolution,
                format!("Failed to load extension library '{}': {e}", path.display()),
                e,
            )
        })?;

        let raw = {
            let entry: libloading::Symbol<ModuleEntryFn> =
                unsafe { library.get(MODULE_ENTRY_SYMBOL) }.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Resolution,
                        format!(
                            "Extension '{}' missing 'compline_extension_module' symbol: {e}",
                            path.display()
                        ),
                        e,
                    )
                })?;
            unsafe { entry() }
        };

        let module = unsafe { ffi::from_raw(raw) }.ok_or_else(|| {
            AppError::resolution(format!(
                "Extension '{}' returned a null module",
                path.display()
            ))
        })?;

        Ok((library, module))
    }

    #[async_trait]
    impl ModuleResolver for DynamicResolver {
        async fn resolve(&self, path: &Path) -> AppResult<Arc<ExtensionModule>> {
            if let Some(module) = self.modules.get(path) {
                return Ok(module.value().clone());
            }

            let owned = path.to_path_buf();
            let (library, module) = tokio::task::spawn_blocking(move || open(&owned))
                .await
                .map_err(|e| AppError::internal(format!("Library loader task failed: {e}")))??;

            let module = self.cache(path, library, module);

            info!(path = %path.display(), "Extension library loaded");

            Ok(module)
        }
    }

    impl std::fmt::Debug for DynamicResolver {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("DynamicResolver")
                .field("loaded_count", &self.libraries.len())
                .finish()
        }
    }

    #[cfg(all(test, target_os = "linux", target_env = "gnu"))]
    mod tests {
        use super::*;

        /// A shared library present on every Linux host.
        const SYSTEM_LIBRARY: &str = "libc.so.6";

        #[tokio::test]
        async fn test_library_without_entry_symbol() {
            let resolver = unsafe { DynamicResolver::new() };
            let err = resolver
                .resolve(Path::new(SYSTEM_LIBRARY))
                .await
                .expect_err("libc exports no module");
            assert!(err.is(ErrorKind::Resolution));
            assert!(err.message.contains("compline_extension_module"));
            assert_eq!(resolver.loaded_count(), 0);
        }

        #[tokio::test]
        async fn test_resolved_module_is_cached_per_path() {
            let resolver = unsafe { DynamicResolver::new() };
            let path = Path::new("/opt/compline/ui/native.so");
            let library =
                unsafe { libloading::Library::new(SYSTEM_LIBRARY) }.expect("open libc");

            let cached = resolver.cache(path, library, ExtensionModule::new());
            let first = resolver.resolve(path).await.expect("cached module");
            let second = resolver.resolve(path).await.expect("cached module");

            assert!(Arc::ptr_eq(&cached, &first));
            assert!(Arc::ptr_eq(&first, &second));
            assert_eq!(resolver.loaded_count(), 1);
        }
    }
}

/// Stub resolver when the `dynamic` feature is not enabled.
#[cfg(not(feature = "dynamic"))]
mod dynamic_loader {
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;

    use compline_core::error::AppError;
    use compline_core::result::AppResult;

    use crate::module::ExtensionModule;
    use crate::resolver::ModuleResolver;

    /// Stub dynamic resolver; every path fails to resolve.
    #[derive(Debug, Default)]
    pub struct DynamicResolver;

    impl DynamicResolver {
        /// Creates a stub resolver.
        ///
        /// # Safety
        /// Always safe; `unsafe` only mirrors the feature-enabled signature.
        pub unsafe fn new() -> Self {
            Self
        }

        /// Always zero.
        pub fn loaded_count(&self) -> usize {
            0
        }
    }

    #[async_trait]
    impl ModuleResolver for DynamicResolver {
        async fn resolve(&self, path: &Path) -> AppResult<Arc<ExtensionModule>> {
            Err(AppError::resolution(format!(
                "Cannot load '{}': built without the `dynamic` feature",
                path.display()
            )))
        }
    }
}

pub use dynamic_loader::DynamicResolver;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use compline_core::error::ErrorKind;

    use super::*;
    use crate::resolver::ModuleResolver;

    #[tokio::test]
    async fn test_missing_library_is_resolution_error() {
        let resolver = unsafe { DynamicResolver::new() };
        let err = resolver
            .resolve(Path::new("/nonexistent/compline/libnothing.so"))
            .await
            .expect_err("no such library");
        assert!(err.is(ErrorKind::Resolution));
        assert_eq!(resolver.loaded_count(), 0);
    }
}
