//! Effective settings for one invocation
//!
//! Config file values are folded with command-line flags once, before any work starts,
//! and handed to the libraries as immutable option structs.

use fbp_config::Config;
use fbp_discovery::{DiscoveryOptions, DEFAULT_MAX_DEPTH};
use fbp_manifest::DEFAULT_MANIFEST_FILE;
use fbp_resolve::ResolveOptions;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub runtimes: Vec<String>,
    pub manifest: String,
    pub recursive: bool,
    pub subdirs: bool,
    pub strict: bool,
    pub max_depth: usize,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            runtimes: Vec::new(),
            manifest: DEFAULT_MANIFEST_FILE.to_string(),
            recursive: true,
            subdirs: true,
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            log_file: None,
        }
    }
}

impl Settings {
    /// Defaults overridden by whatever the config file sets
    pub fn from_config(config: &Config) -> Self {
        let defaults = Settings::default();
        Settings {
            runtimes: config.runtimes.clone().unwrap_or(defaults.runtimes),
            manifest: config.manifest.clone().unwrap_or(defaults.manifest),
            recursive: config.recursive.unwrap_or(defaults.recursive),
            subdirs: config.subdirs.unwrap_or(defaults.subdirs),
            strict: config.strict.unwrap_or(defaults.strict),
            max_depth: config.max_depth.unwrap_or(defaults.max_depth),
            log_file: config.log_file.as_ref().map(PathBuf::from),
        }
    }

    /// Replace the runtime list when one was given on the command line
    pub fn with_runtimes(mut self, runtimes: &[String]) -> Self {
        let runtimes: Vec<String> = runtimes
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
        if !runtimes.is_empty() {
            self.runtimes = runtimes;
        }
        self
    }

    pub fn with_manifest(mut self, manifest: Option<&str>) -> Self {
        if let Some(manifest) = manifest {
            self.manifest = manifest.to_string();
        }
        self
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            runtimes: self.runtimes.clone(),
            recursive: self.recursive,
            subdirs: self.subdirs,
            max_depth: self.max_depth,
        }
    }

    pub fn resolve_options(&self, base_dir: &Path) -> ResolveOptions {
        ResolveOptions {
            base_dir: base_dir.to_path_buf(),
            strict: self.strict,
        }
    }
}
