use fbp_graph::GraphError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during module discovery
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("No runtimes specified")]
    UnspecifiedRuntimes,

    #[error("Unsupported runtime types: {}", .0.join(", "))]
    UnsupportedRuntime(Vec<String>),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse package descriptor {}: {source}", path.display())]
    Descriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl DiscoveryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DiscoveryError::Io {
            path: path.into(),
            source,
        }
    }
}
