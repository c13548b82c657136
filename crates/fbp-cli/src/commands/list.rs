use clap::Parser;
use fbp_discovery::discover;
use fbp_logger as logger;
use fbp_manifest::Manifest;
use std::path::PathBuf;

use crate::common::DiscoveryArgs;
use crate::errors::CliError;
use crate::settings::Settings;

/// Discover every module of a project and print the manifest
#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    #[command(flatten)]
    pub target: DiscoveryArgs,

    /// Do not list components of dependency packages
    #[arg(long)]
    pub no_recursive: bool,

    /// Do not descend into subdirectories of components/
    #[arg(long)]
    pub no_subdirs: bool,

    /// Write the manifest to a file instead of standard output
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn handle_list(cmd: ListCommand, settings: Settings) -> Result<(), CliError> {
    let mut settings = settings.with_runtimes(&cmd.target.runtimes);
    if cmd.no_recursive {
        settings.recursive = false;
    }
    if cmd.no_subdirs {
        settings.subdirs = false;
    }

    let base_dir = cmd.target.base_dir();
    logger::spinner_start(&format!("Discovering modules in {}", base_dir.display()));
    let modules = discover(&base_dir, &settings.discovery_options());
    logger::spinner_stop();

    let manifest = Manifest::new(modules?);
    logger::debug(&format!(
        "Found {} components in {} modules",
        manifest.component_count(),
        manifest.modules.len()
    ));
    match cmd.output {
        Some(path) => {
            manifest.save_to_path(&path)?;
            logger::success(&format!("Manifest written to {}", path.display()));
        }
        None => println!("{}", manifest.to_json_pretty()?),
    }
    Ok(())
}
