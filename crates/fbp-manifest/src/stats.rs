//! Component reuse statistics

use crate::types::Manifest;
use std::fmt;

/// Counts of local vs. library components in a manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestStats {
    /// Components provided by the root package
    pub local: usize,
    /// Components provided by dependency packages
    pub deps: usize,
}

impl ManifestStats {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        manifest
            .modules
            .iter()
            .fold(ManifestStats::default(), |mut stats, module| {
                if module.is_local() {
                    stats.local += module.components.len();
                } else {
                    stats.deps += module.components.len();
                }
                stats
            })
    }

    pub fn total(&self) -> usize {
        self.local + self.deps
    }

    /// Share of library components in percent, rounded to the nearest integer
    pub fn reuse_ratio(&self) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        // Integer rounding of deps * 100 / total, half away from zero
        let scaled = self.deps as u64 * 200 + total as u64;
        scaled / (total as u64 * 2)
    }
}

impl fmt::Display for ManifestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Local components: {}", self.local)?;
        writeln!(f, "Library components: {}", self.deps)?;
        write!(f, "       Reuse ratio: {}%", self.reuse_ratio())
    }
}
