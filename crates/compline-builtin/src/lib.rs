//! Built-in extensions shipped with Compline.
//!
//! They are served by a [`StaticResolver`] under virtual paths
//! `builtin/<kind dir>/<name>.rs`, so they go through the same load-once
//! and alias machinery as extensions loaded from shared libraries.

pub mod filters;
pub mod sources;
pub mod ui;

use std::path::PathBuf;

use compline_extension::kind::ExtensionKind;
use compline_extension::module::ExtensionModule;
use compline_extension::resolver::StaticResolver;

/// Root of the virtual paths built-ins are registered under.
pub const BUILTIN_ROOT: &str = "builtin";

fn builtin_path(kind: ExtensionKind, name: &str) -> PathBuf {
    PathBuf::from(BUILTIN_ROOT)
        .join(kind.dir_name())
        .join(format!("{name}.rs"))
}

fn modules() -> Vec<(ExtensionKind, &'static str, ExtensionModule)> {
    vec![
        (
            ExtensionKind::Ui,
            "native",
            ExtensionModule::new().with_ui(|| Ok(ui::Native::default())),
        ),
        (
            ExtensionKind::Source,
            "around",
            ExtensionModule::new().with_source(|| Ok(sources::Around::default())),
        ),
        (
            ExtensionKind::Filter,
            "matcher_head",
            ExtensionModule::new().with_filter(|| Ok(filters::MatcherHead::default())),
        ),
        (
            ExtensionKind::Filter,
            "sorter_rank",
            ExtensionModule::new().with_filter(|| Ok(filters::SorterRank::default())),
        ),
    ]
}

/// A resolver serving every built-in.
pub fn resolver() -> StaticResolver {
    let resolver = StaticResolver::new();
    for (kind, name, module) in modules() {
        resolver.insert(builtin_path(kind, name), module);
    }
    resolver
}

/// Every built-in path with its kind.
pub fn paths() -> Vec<(ExtensionKind, PathBuf)> {
    modules()
        .into_iter()
        .map(|(kind, name, _)| (kind, builtin_path(kind, name)))
        .collect()
}
