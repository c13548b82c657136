//! Configuration file for the fbp-manifest CLI
//!
//! An optional TOML file supplies defaults for command-line flags:
//!
//! ```toml
//! runtimes = ["noflo"]
//! manifest = "fbp.json"
//! recursive = true
//! strict = false
//! max_depth = 32
//! log_file = "/tmp/fbp-manifest.log"
//! ```
//!
//! Every key is optional. Flags given on the command line win.

pub mod errors;

pub use errors::ConfigError;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "FBP_MANIFEST_CONFIG";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub runtimes: Option<Vec<String>>,
    #[serde(default)]
    pub manifest: Option<String>,
    #[serde(default)]
    pub recursive: Option<bool>,
    #[serde(default)]
    pub subdirs: Option<bool>,
    #[serde(default)]
    pub strict: Option<bool>,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Config {
    /// Location of the config file
    ///
    /// `$FBP_MANIFEST_CONFIG` when set and non-empty, otherwise
    /// `<config dir>/fbp-manifest/config.toml`. `None` when no config directory is known.
    pub fn path() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join("fbp-manifest").join("config.toml"))
    }

    /// Load the config from its default location
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load the config from a specific file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {:?}", path);
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}
