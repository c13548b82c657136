//! FBP Manifest types
//!
//! The manifest is the catalogue of every module and component available to a flow-based
//! project. It is stored as JSON (`fbp.json`) and produced by module discovery.
//! This crate holds the serde data model plus document-level operations: reading and
//! writing, structural validation and reuse statistics.

pub mod errors;
pub mod manifest;
pub mod stats;
pub mod types;
pub mod validate;

pub use types::{
    Component, ComponentKind, Manifest, Module, NofloModuleInfo, Port, MANIFEST_VERSION,
};

pub use errors::ManifestError;
pub use manifest::DEFAULT_MANIFEST_FILE;
pub use stats::ManifestStats;
