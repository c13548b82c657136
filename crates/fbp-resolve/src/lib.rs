//! FBP dependency resolution
//!
//! Given a module catalogue and an entry component, computes every component the entry
//! needs to run, following graph components into the graphs they are built from, and
//! narrows the catalogue down to those components.
//!
//! ```text
//! deps/Hello (graph) ──> deps/Bar (elementary)
//!                   └──> dep/Foo  (elementary)
//! resolve("deps/Hello") = ["deps/Bar", "dep/Foo", "deps/Hello"]
//! ```
//!
//! The catalogue is read-only throughout. Sibling graph branches are resolved in
//! parallel while results keep the sequential order.

pub mod errors;
pub mod filter;
pub mod lookup;
pub mod resolver;

pub use errors::ResolveError;
pub use filter::{filter_modules, find};
pub use lookup::{find_component, has_custom_loader, module_claims};
pub use resolver::resolve;

use std::path::PathBuf;

/// Settings for one resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Directory graph `source` paths are relative to
    pub base_dir: PathBuf,
    /// Fail on any unresolvable transitive dependency
    ///
    /// When unset, a failing branch contributes nothing. Identifiers no module provides
    /// still fail module filtering.
    pub strict: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            base_dir: PathBuf::from("."),
            strict: false,
        }
    }
}
