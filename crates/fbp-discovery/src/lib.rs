//! FBP module discovery
//!
//! Walks a project directory, and optionally its installed dependency packages, and
//! builds the module catalogue of an FBP manifest.
//!
//! ```text
//! project/                      -> modules with base ""
//! ├── components/  graphs/  spec/
//! └── node_modules/
//!     ├── noflo-core/           -> modules with base "node_modules/noflo-core"
//!     └── @scope/noflo-extra/   -> modules with base "node_modules/@scope/noflo-extra"
//! ```
//!
//! Every requested runtime scans every package directory. Nested packages are discovered
//! with the same settings, and all paths in the catalogue stay relative to the project root.

pub mod dependency_dirs;
pub mod errors;
pub mod listing;
pub mod naming;
pub mod package_info;
pub mod runtimes;

pub use errors::DiscoveryError;
pub use runtimes::{Runtime, ScanContext};

use fbp_manifest::Module;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::listing::canonical;

/// Default nesting limit for dependency and subdirectory recursion
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings for one discovery run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Runtime names to scan for, e.g. `["noflo"]`
    pub runtimes: Vec<String>,
    /// Also discover nested dependency packages
    pub recursive: bool,
    /// Descend into subdirectories of `components/`
    pub subdirs: bool,
    /// Deepest dependency nesting to follow
    pub max_depth: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        DiscoveryOptions {
            runtimes: Vec::new(),
            recursive: false,
            subdirs: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DiscoveryOptions {
    pub fn with_runtimes<S: Into<String>>(runtimes: impl IntoIterator<Item = S>) -> Self {
        DiscoveryOptions {
            runtimes: runtimes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Discover all modules under `base_dir`
pub fn discover(base_dir: &Path, options: &DiscoveryOptions) -> Result<Vec<Module>, DiscoveryError> {
    let runtimes = Runtime::parse_list(&options.runtimes)?;
    let ctx = ScanContext {
        root: base_dir,
        subdirs: options.subdirs,
        max_depth: options.max_depth,
    };
    let modules = discover_package(base_dir, &runtimes, options.recursive, &ctx, &[])?;
    info!(
        "Discovered {} modules with {} components in {:?}",
        modules.len(),
        modules.iter().map(|m| m.components.len()).sum::<usize>(),
        base_dir
    );
    Ok(modules)
}

/// Scan one package, then its dependencies
///
/// `ancestors` holds the canonical directories of the packages on the current
/// recursion chain.
fn discover_package(
    dir: &Path,
    runtimes: &[Runtime],
    recursive: bool,
    ctx: &ScanContext<'_>,
    ancestors: &[PathBuf],
) -> Result<Vec<Module>, DiscoveryError> {
    let mut modules = Vec::new();
    for runtime in runtimes {
        modules.extend(runtime.scan(dir, ctx)?);
    }
    if !recursive {
        return Ok(modules);
    }

    let mut chain = ancestors.to_vec();
    chain.push(canonical(dir));

    for runtime in runtimes {
        let dependencies = runtime.dependency_dirs(dir)?;
        if dependencies.is_empty() {
            continue;
        }
        debug!(
            "Descending into {} {} dependencies of {:?}",
            dependencies.len(),
            runtime,
            dir
        );
        let nested = dependencies
            .par_iter()
            .filter(|dependency| should_descend(dependency, &chain, ctx.max_depth))
            .map(|dependency| discover_package(dependency, runtimes, recursive, ctx, &chain))
            .collect::<Result<Vec<_>, _>>()?;
        modules.extend(nested.into_iter().flatten());
    }
    Ok(modules)
}

fn should_descend(dependency: &Path, chain: &[PathBuf], max_depth: usize) -> bool {
    if chain.len() > max_depth {
        warn!(
            "Skipping {:?}: dependency nesting deeper than {}",
            dependency, max_depth
        );
        return false;
    }
    let resolved = canonical(dependency);
    if chain.contains(&resolved) {
        warn!("Skipping {:?}: dependency cycle back to {:?}", dependency, resolved);
        return false;
    }
    true
}
