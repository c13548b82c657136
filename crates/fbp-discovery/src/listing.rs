//! Filesystem helpers shared by the scanners

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::DiscoveryError;

/// Entries of a directory sorted by file name, following symlinks
///
/// A missing directory is an empty listing. Dangling symlinks and links back to `dir`
/// or one of its ancestors are skipped.
pub fn sorted_entries(dir: &Path) -> Result<Vec<DirEntry>, DiscoveryError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) if err.depth() == 0 && is_not_found(&err) => return Ok(Vec::new()),
            Err(err) if is_not_found(&err) => {
                debug!("Skipping dangling entry {:?}", err.path());
            }
            Err(err) if err.loop_ancestor().is_some() => {
                warn!(
                    "Skipping {:?}: symlink loop back to {:?}",
                    err.path(),
                    err.loop_ancestor()
                );
            }
            Err(err) => {
                let path = err.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
                return Err(DiscoveryError::io(path, err.into()));
            }
        }
    }
    Ok(entries)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io_err| io_err.kind() == ErrorKind::NotFound)
}

/// Canonical form of a directory, or the path itself when it cannot be resolved
pub fn canonical(dir: &Path) -> PathBuf {
    fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}

/// Read a source file, replacing invalid UTF-8
pub fn read_source(path: &Path) -> Result<String, DiscoveryError> {
    let bytes = fs::read(path).map_err(|err| DiscoveryError::io(path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `/`-separated path of `path` relative to `root`; `""` when they are the same
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Last path segment of a directory, resolving `.` and `..` when needed
pub fn dir_basename(dir: &Path) -> String {
    let named: Option<PathBuf> = if dir.file_name().is_some() {
        Some(dir.to_path_buf())
    } else {
        fs::canonicalize(dir).ok()
    };
    named
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether a path has one of the given extensions
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

#[cfg(test)]
mod tests {
    use crate::listing::*;
    use tempfile::TempDir;

    #[test]
    fn test_sorted_entries() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let dir = temp_dir.path();
        let created = fs::write(dir.join("b.js"), "")
            .and_then(|()| fs::write(dir.join("a.js"), ""))
            .and_then(|()| fs::create_dir(dir.join("c")));
        assert!(created.is_ok());

        let entries = sorted_entries(dir);
        assert!(entries.is_ok(), "Failed to list: {entries:?}");
        let names: Vec<String> = entries
            .unwrap_or_default()
            .iter()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.js", "b.js", "c"]);

        let missing = sorted_entries(&dir.join("missing"));
        assert!(missing.is_ok_and(|entries| entries.is_empty()));
    }

    #[cfg(unix)]
    #[test]
    fn test_link_to_listed_directory_is_skipped() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let dir = temp_dir.path();
        assert!(fs::write(dir.join("Foo.js"), "").is_ok());
        if std::os::unix::fs::symlink(dir, dir.join("loop")).is_err() {
            return;
        }

        let entries = sorted_entries(dir);
        assert!(entries.is_ok(), "Failed to list: {entries:?}");
        let names: Vec<String> = entries
            .unwrap_or_default()
            .iter()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Foo.js"]);
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/project");
        assert_eq!(relative_path(root, Path::new("/project")), "");
        assert_eq!(
            relative_path(root, Path::new("/project/node_modules/noflo-core")),
            "node_modules/noflo-core"
        );
        assert_eq!(
            relative_path(root, Path::new("/project/components/Foo.js")),
            "components/Foo.js"
        );
    }

    #[test]
    fn test_dir_basename_and_extension() {
        assert_eq!(dir_basename(Path::new("/tmp/noflo-basic")), "noflo-basic");
        assert!(has_extension(Path::new("Foo.coffee"), &["coffee", "js"]));
        assert!(!has_extension(Path::new("README"), &["coffee", "js"]));
    }
}
