//! Nested dependency directory walking
//!
//! Packages keep their dependencies in a directory such as `node_modules/`. Scoped
//! packages (`@scope/name`) sit one level deeper and are expanded in place.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::DiscoveryError;
use crate::listing::sorted_entries;

/// List the package directories nested under `dir/<deps_dir>`
///
/// Hidden entries are skipped. A missing dependency directory yields an empty list.
pub fn list_dependency_dirs(dir: &Path, deps_dir: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut found = Vec::new();
    for entry in sorted_entries(&dir.join(deps_dir))? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if name.starts_with('@') {
            found.extend(
                sorted_entries(entry.path())?
                    .into_iter()
                    .filter(|scoped| scoped.file_type().is_dir())
                    .map(walkdir::DirEntry::into_path),
            );
            continue;
        }
        if entry.file_type().is_dir() {
            found.push(entry.into_path());
        }
    }
    debug!("Found {} dependency directories in {:?}", found.len(), dir);
    Ok(found)
}
