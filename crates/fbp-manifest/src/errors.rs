use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during manifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid manifest: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl ManifestError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        ManifestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the error is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManifestError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_io_error_names_the_file() {
        let err = ManifestError::io(
            Path::new("missing.json"),
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Failed to access missing.json: No such file or directory"
        );
    }

    #[test]
    fn test_invalid_manifest_display() {
        let err = ManifestError::Invalid(vec![
            "/version: must be 1".to_string(),
            "/modules/0/name: must be a string".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid manifest: /version: must be 1; /modules/0/name: must be a string"
        );
    }
}
