//! Package descriptor (`package.json`) reading

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::errors::DiscoveryError;

pub const DESCRIPTOR_FILE: &str = "package.json";

/// The parts of `package.json` discovery looks at
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub noflo: Option<NofloSection>,
    #[serde(default)]
    pub msgflo: Option<MsgfloSection>,
}

/// `noflo` section of a package descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NofloSection {
    #[serde(default)]
    pub icon: Option<String>,
    /// Module path of a custom component loader
    #[serde(default)]
    pub loader: Option<String>,
}

/// `msgflo` section of a package descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MsgfloSection {
    #[serde(default)]
    pub icon: Option<String>,
    /// Values substituted for `#NAME` markers in command templates
    #[serde(default)]
    pub variables: Map<String, Value>,
    /// `"package/Component": "<command template>"`
    #[serde(default)]
    pub components: Map<String, Value>,
}

impl PackageDescriptor {
    /// Read `package.json` from a package directory
    ///
    /// Returns `Ok(None)` when the directory has no descriptor.
    pub fn read(dir: &Path) -> Result<Option<Self>, DiscoveryError> {
        let path = dir.join(DESCRIPTOR_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No package descriptor in {:?}", dir);
                return Ok(None);
            }
            Err(err) => return Err(DiscoveryError::io(path, err)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| DiscoveryError::Descriptor { path, source })
    }
}

#[cfg(test)]
mod tests {
    use crate::package_info::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_descriptor() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let written = fs::write(
            temp_dir.path().join(DESCRIPTOR_FILE),
            r#"{"name": "noflo-loader", "version": "1.0.0", "noflo": {"icon": "cog", "loader": "lib/ComponentLoader"}}"#,
        );
        assert!(written.is_ok());

        let descriptor = PackageDescriptor::read(temp_dir.path());
        assert!(descriptor.is_ok(), "Failed to read descriptor: {descriptor:?}");
        let Ok(Some(descriptor)) = descriptor else {
            return;
        };
        assert_eq!(descriptor.name.as_deref(), Some("noflo-loader"));
        let noflo = descriptor.noflo.unwrap_or_default();
        assert_eq!(noflo.icon.as_deref(), Some("cog"));
        assert_eq!(noflo.loader.as_deref(), Some("lib/ComponentLoader"));
        assert!(descriptor.msgflo.is_none());
    }

    #[test]
    fn test_missing_and_malformed_descriptor() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(matches!(PackageDescriptor::read(temp_dir.path()), Ok(None)));

        let written = fs::write(temp_dir.path().join(DESCRIPTOR_FILE), "{\"name\": ");
        assert!(written.is_ok());
        assert!(matches!(
            PackageDescriptor::read(temp_dir.path()),
            Err(DiscoveryError::Descriptor { .. })
        ));
    }
}
