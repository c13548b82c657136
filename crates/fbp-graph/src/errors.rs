use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a graph definition
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to read graph {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse JSON graph {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Syntax error in {} at line {line}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Unsupported graph format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid built-in pattern: {0}")]
    Pattern(#[source] regex::Error),
}
