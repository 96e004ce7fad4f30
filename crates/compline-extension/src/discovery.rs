//! Locates extension files on disk.
//!
//! Each search root holds one directory per kind (`ui/`, `sources/`,
//! `filters/`). A file in one of those directories is an extension when its
//! extension is in the accepted list; it registers under its file stem.

use std::path::{Path, PathBuf};

use tracing::debug;

use compline_core::result::AppResult;

use crate::kind::ExtensionKind;

fn accepted(path: &Path, file_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| file_extensions.iter().any(|accepted| accepted == ext))
}

/// Every extension file of `kind` under `roots`, sorted per root.
///
/// Roots or kind directories that do not exist are skipped.
pub async fn discover(
    roots: &[PathBuf],
    kind: ExtensionKind,
    file_extensions: &[String],
) -> AppResult<Vec<PathBuf>> {
    let mut found = Vec::new();

    for root in roots {
        let dir = root.join(kind.dir_name());
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "Extension directory not present");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let mut in_root = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_file() && accepted(&path, file_extensions) {
                in_root.push(path);
            }
        }
        in_root.sort();
        found.extend(in_root);
    }

    Ok(found)
}

/// The first file under `roots` that would register as `name` for `kind`.
pub async fn find(
    roots: &[PathBuf],
    kind: ExtensionKind,
    name: &str,
    file_extensions: &[String],
) -> AppResult<Option<PathBuf>> {
    for root in roots {
        for ext in file_extensions {
            let candidate = root.join(kind.dir_name()).join(format!("{name}.{ext}"));
            if tokio::fs::metadata(&candidate)
                .await
                .is_ok_and(|meta| meta.is_file())
            {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}
