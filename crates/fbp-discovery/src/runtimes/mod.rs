//! Runtime scanner families
//!
//! The set of runtimes is closed: each variant knows how to scan a package directory for
//! modules and where that package keeps its nested dependencies.

pub mod msgflo;
pub mod noflo;

use fbp_manifest::Module;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::DiscoveryError;

/// Settings shared by every scan of one discovery run
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    /// Discovery root, all manifest paths are relative to it
    pub root: &'a Path,
    /// Descend into subdirectories of `components/`
    pub subdirs: bool,
    /// Nesting limit for directory recursion
    pub max_depth: usize,
}

/// Supported runtime families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    NoFlo,
    MsgFlo,
}

impl Runtime {
    pub const ALL: [Runtime; 2] = [Runtime::NoFlo, Runtime::MsgFlo];

    pub fn name(self) -> &'static str {
        match self {
            Runtime::NoFlo => "noflo",
            Runtime::MsgFlo => "msgflo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Runtime::ALL.into_iter().find(|runtime| runtime.name() == name)
    }

    /// Parse a requested runtime list
    ///
    /// Fails on an empty list, or with every unknown name when any are unsupported.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Runtime>, DiscoveryError> {
        if names.is_empty() {
            return Err(DiscoveryError::UnspecifiedRuntimes);
        }
        let unsupported: Vec<String> = names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| Runtime::from_name(name).is_none())
            .map(str::to_string)
            .collect();
        if !unsupported.is_empty() {
            return Err(DiscoveryError::UnsupportedRuntime(unsupported));
        }
        Ok(names
            .iter()
            .filter_map(|name| Runtime::from_name(name.as_ref()))
            .collect())
    }

    /// Modules provided by the package in `dir`
    pub fn scan(self, dir: &Path, ctx: &ScanContext<'_>) -> Result<Vec<Module>, DiscoveryError> {
        match self {
            Runtime::NoFlo => noflo::scan(dir, ctx),
            Runtime::MsgFlo => msgflo::scan(dir, ctx),
        }
    }

    /// Nested dependency package directories of the package in `dir`
    pub fn dependency_dirs(self, dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        match self {
            Runtime::NoFlo => noflo::dependency_dirs(dir),
            Runtime::MsgFlo => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
