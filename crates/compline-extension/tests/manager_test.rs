//! Bulk loading and autoload through the extension manager.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use compline_core::config::extensions::ExtensionsConfig;
use compline_core::error::ErrorKind;
use compline_extension::manager::ExtensionManager;
use compline_extension::prelude::*;
use compline_extension::registry::Registry;
use compline_extension::resolver::StaticResolver;

#[derive(Debug, Default)]
struct Named {
    name: String,
}

impl Extension for Named {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[async_trait]
impl Ui for Named {
    async fn show(&self, _context: &CompletionContext, _items: &[Candidate]) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl Source for Named {
    async fn gather(&self, _context: &CompletionContext) -> AppResult<Vec<Candidate>> {
        Ok(Vec::new())
    }
}

fn ui_module() -> ExtensionModule {
    ExtensionModule::new().with_ui(|| Ok(Named::default()))
}

fn source_module() -> ExtensionModule {
    ExtensionModule::new().with_source(|| Ok(Named::default()))
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(path, b"").expect("write");
}

fn config_for(root: &Path) -> ExtensionsConfig {
    ExtensionsConfig {
        directories: vec![root.to_path_buf()],
        file_extensions: vec!["so".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn autoload_from_known_path() {
    let resolver = StaticResolver::new().with_module("builtin/ui/native.rs", ui_module());
    let registry = Arc::new(Registry::new(Arc::new(resolver)));
    let manager = ExtensionManager::new(registry.clone(), ExtensionsConfig::default())
        .with_known_path(ExtensionKind::Ui, "builtin/ui/native.rs");

    let instance = manager
        .autoload(ExtensionKind::Ui, "native")
        .await
        .expect("autoload");
    assert_eq!(instance.name(), "native");
    assert_eq!(instance.kind(), ExtensionKind::Ui);
    assert!(registry.is_loaded("builtin/ui/native.rs"));

    let again = manager
        .autoload(ExtensionKind::Ui, "native")
        .await
        .expect("cached");
    assert!(instance.ptr_eq(&again));
}

#[tokio::test]
async fn autoload_alias_loads_base_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("ui/native.so");
    touch(&file);

    let resolver = StaticResolver::new().with_module(&file, ui_module());
    let registry = Arc::new(Registry::new(Arc::new(resolver)));
    let mut config = config_for(dir.path());
    config
        .aliases
        .ui
        .insert("pum".to_string(), "native".to_string());
    let manager = ExtensionManager::new(registry.clone(), config);
    manager.declare_configured_aliases();

    let pum = manager
        .autoload(ExtensionKind::Ui, "pum")
        .await
        .expect("autoload alias");
    assert_eq!(pum.name(), "pum");

    let native = registry.get(ExtensionKind::Ui, "native").expect("base");
    assert!(!native.ptr_eq(&pum));
}

#[tokio::test]
async fn autoload_unknown_name_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Arc::new(Registry::new(Arc::new(StaticResolver::new())));
    let manager = ExtensionManager::new(registry, config_for(dir.path()));

    let err = manager
        .autoload(ExtensionKind::Source, "nothing")
        .await
        .expect_err("nothing to load");
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn load_all_collects_failures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = dir.path().join("sources/around.so");
    let bad = dir.path().join("sources/broken.so");
    touch(&good);
    touch(&bad);

    let resolver = StaticResolver::new()
        .with_module("builtin/ui/native.rs", ui_module())
        .with_module(&good, source_module());
    let registry = Arc::new(Registry::new(Arc::new(resolver)));
    let manager = ExtensionManager::new(registry.clone(), config_for(dir.path()))
        .with_known_paths([(ExtensionKind::Ui, "builtin/ui/native.rs")]);

    let report = manager.load_all().await.expect("load all");
    assert_eq!(
        report.loaded,
        vec![
            (ExtensionKind::Ui, "native".to_string()),
            (ExtensionKind::Source, "around".to_string()),
        ]
    );
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, bad);
    assert!(!registry.is_loaded(&bad));

    let second = manager.load_all().await.expect("load all again");
    assert!(second.loaded.is_empty());
    assert_eq!(second.skipped, 2);
    assert_eq!(second.failed.len(), 1);
}

#[tokio::test]
async fn start_without_auto_load_only_declares_aliases() {
    let resolver = StaticResolver::new().with_module("builtin/ui/native.rs", ui_module());
    let registry = Arc::new(Registry::new(Arc::new(resolver)));
    let mut config = ExtensionsConfig {
        auto_load: false,
        ..Default::default()
    };
    config
        .aliases
        .ui
        .insert("pum".to_string(), "native".to_string());
    let manager = ExtensionManager::new(registry.clone(), config)
        .with_known_path(ExtensionKind::Ui, "builtin/ui/native.rs");

    let report = manager.start().await.expect("start");
    assert!(report.loaded.is_empty());
    assert!(registry.loaded_paths().is_empty());
    assert_eq!(registry.alias(ExtensionKind::Ui, "pum").as_deref(), Some("native"));

    manager
        .autoload(ExtensionKind::Ui, "pum")
        .await
        .expect("on demand");
    assert_eq!(registry.names(ExtensionKind::Ui), vec!["native", "pum"]);
}
