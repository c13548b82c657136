//! fbp-manifest CLI library - command handlers exposed for testing

pub mod commands;
pub mod common;
pub mod errors;
pub mod manifest_lookup;
pub mod settings;

pub use common::GlobalOpts;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Library crates whose diagnostics the `-v` flags turn up
const TRACED_CRATES: [&str; 6] = [
    "fbp_cli",
    "fbp_config",
    "fbp_discovery",
    "fbp_graph",
    "fbp_manifest",
    "fbp_resolve",
];

/// Default tracing filter for a verbosity level, used when `RUST_LOG` is unset
pub fn default_filter(verbosity: u8, quiet: bool) -> String {
    let level = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    TRACED_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr tracing subscriber
pub fn init_tracing(verbosity: u8, quiet: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity, quiet).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
