//! Errors surfaced by the fbp-manifest commands

use fbp_discovery::DiscoveryError;
use fbp_manifest::ManifestError;
use fbp_resolve::ResolveError;
use thiserror::Error;

/// Any failure a command can end with
///
/// The wrapped library errors print unchanged so the messages stay the same whichever
/// command hit them.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
