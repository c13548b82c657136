//! Manifest loading with auto-discovery fallback

use fbp_discovery::{discover, DiscoveryOptions};
use fbp_logger as logger;
use fbp_manifest::{Manifest, DEFAULT_MANIFEST_FILE, MANIFEST_VERSION};
use fbp_resolve::{find, find_component, ResolveOptions};
use std::path::Path;
use tracing::debug;

use crate::errors::CliError;

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Manifest file name, relative to the project directory
    pub manifest: String,
    /// Discover modules when the manifest file does not exist
    pub discover: bool,
    /// Skip the auto-discovery warning
    pub silent: bool,
    pub discovery: DiscoveryOptions,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            manifest: DEFAULT_MANIFEST_FILE.to_string(),
            discover: true,
            silent: false,
            discovery: DiscoveryOptions {
                recursive: true,
                ..Default::default()
            },
        }
    }
}

/// Read `base_dir/<manifest>`, or discover the project when it is absent
///
/// Only a missing file triggers discovery. An unreadable or malformed manifest is an error.
pub fn load_manifest(base_dir: &Path, options: &LoadOptions) -> Result<Manifest, CliError> {
    let path = base_dir.join(&options.manifest);
    match Manifest::load_from_path(&path) {
        Ok(manifest) => {
            logger::info(&format!("Using manifest {}", path.display()));
            Ok(manifest)
        }
        Err(e) if e.is_not_found() && options.discover => {
            if !options.silent {
                logger::warn(&format!(
                    "{} not found, running auto-discovery",
                    path.display()
                ));
            }
            logger::spinner_start(&format!("Discovering modules in {}", base_dir.display()));
            let modules = discover(base_dir, &options.discovery);
            logger::spinner_stop();
            Ok(Manifest::new(modules?))
        }
        Err(e) => Err(e.into()),
    }
}

/// Load the catalogue and narrow it to what `component` needs
///
/// The returned manifest carries the entry component record as `main`.
pub fn load_and_find(
    base_dir: &Path,
    component: &str,
    load: &LoadOptions,
    resolve: &ResolveOptions,
) -> Result<Manifest, CliError> {
    let manifest = load_manifest(base_dir, load)?;
    debug!(
        "Resolving {} against {} modules",
        component,
        manifest.modules.len()
    );
    let modules = find(&manifest.modules, component, resolve)?;
    let main = find_component(&modules, component).cloned();
    Ok(Manifest {
        main,
        version: MANIFEST_VERSION,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use crate::manifest_lookup::*;
    use fbp_manifest::{Component, ManifestError, Module};
    use std::fs;
    use tempfile::TempDir;

    fn noflo_options() -> LoadOptions {
        LoadOptions {
            silent: true,
            discovery: DiscoveryOptions {
                runtimes: vec!["noflo".to_string()],
                recursive: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_existing_manifest_is_used() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest = Manifest::new(vec![Module {
            name: "stored".to_string(),
            runtime: "noflo".to_string(),
            components: vec![Component {
                name: "Foo".to_string(),
                elementary: true,
                ..Default::default()
            }],
            ..Default::default()
        }]);
        assert!(manifest.save_to_path(&temp_dir.path().join("fbp.json")).is_ok());

        let loaded = load_manifest(temp_dir.path(), &noflo_options());
        assert!(loaded.is_ok_and(|m| m == manifest));
    }

    #[test]
    fn test_missing_manifest_runs_discovery() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        assert!(fs::create_dir_all(root.join("components")).is_ok());
        assert!(fs::write(root.join("package.json"), r#"{"name": "noflo-basic"}"#).is_ok());
        assert!(fs::write(root.join("components").join("Foo.js"), "").is_ok());

        let loaded = load_manifest(root, &noflo_options());
        assert!(loaded.is_ok(), "Load failed: {loaded:?}");
        let loaded = loaded.unwrap_or_default();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.modules.len(), 1);
        assert_eq!(loaded.modules[0].name, "basic");
    }

    #[test]
    fn test_missing_manifest_without_discovery_fails() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let options = LoadOptions {
            discover: false,
            ..noflo_options()
        };
        let loaded = load_manifest(temp_dir.path(), &options);
        assert!(matches!(
            loaded,
            Err(CliError::Manifest(ManifestError::Io { .. }))
        ));
    }

    #[test]
    fn test_malformed_manifest_fails() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(fs::write(temp_dir.path().join("fbp.json"), "{ not json").is_ok());
        let loaded = load_manifest(temp_dir.path(), &noflo_options());
        assert!(matches!(
            loaded,
            Err(CliError::Manifest(ManifestError::Json(_)))
        ));
    }
}
