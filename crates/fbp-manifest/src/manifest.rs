//! Manifest operations - loading, saving and lookups

use crate::errors::ManifestError;
use crate::types::{Manifest, Module, MANIFEST_VERSION};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Default manifest file name inside a project directory
pub const DEFAULT_MANIFEST_FILE: &str = "fbp.json";

impl Manifest {
    /// Wrap a module catalogue into a manifest document
    pub fn new(modules: Vec<Module>) -> Self {
        Manifest {
            main: None,
            version: MANIFEST_VERSION,
            modules,
        }
    }

    /// Load a manifest from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        debug!("Reading manifest from: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        let manifest: Manifest = serde_json::from_str(&content)?;
        info!(
            "Manifest loaded with {} modules and {} components",
            manifest.modules.len(),
            manifest.component_count()
        );
        Ok(manifest)
    }

    /// Save manifest to a specific path with atomic write
    pub fn save_to_path(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ManifestError::io(parent, e))?;
        }

        let content = self.to_json_pretty()?;

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("json.tmp");
        let write_temp = || -> std::io::Result<()> {
            let file = std::fs::File::create(&temp_path)?;
            let mut writer = std::io::BufWriter::with_capacity(64 * 1024, file);
            writer.write_all(content.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()
        };
        write_temp().map_err(|e| ManifestError::io(&temp_path, e))?;

        std::fs::rename(&temp_path, path).map_err(|e| ManifestError::io(path, e))?;
        info!("Manifest written to: {:?}", path);
        Ok(())
    }

    /// Pretty-printed JSON document
    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Count components across all modules
    pub fn component_count(&self) -> usize {
        self.modules.iter().map(|m| m.components.len()).sum()
    }
}
