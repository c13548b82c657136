use clap::Parser;
use fbp_manifest::ManifestStats;

use crate::common::DiscoveryArgs;
use crate::errors::CliError;
use crate::manifest_lookup::{load_manifest, LoadOptions};
use crate::settings::Settings;

/// Count local and library components of a project
#[derive(Parser, Debug, Clone)]
pub struct StatsCommand {
    #[command(flatten)]
    pub target: DiscoveryArgs,

    /// Manifest file to use (default: fbp.json)
    #[arg(long)]
    pub manifest: Option<String>,
}

pub fn handle_stats(cmd: StatsCommand, settings: Settings) -> Result<(), CliError> {
    let mut settings = settings
        .with_runtimes(&cmd.target.runtimes)
        .with_manifest(cmd.manifest.as_deref());
    settings.recursive = true;

    let load = LoadOptions {
        manifest: settings.manifest.clone(),
        discover: true,
        silent: false,
        discovery: settings.discovery_options(),
    };
    let manifest = load_manifest(&cmd.target.base_dir(), &load)?;
    println!("{}", ManifestStats::from_manifest(&manifest));
    Ok(())
}
