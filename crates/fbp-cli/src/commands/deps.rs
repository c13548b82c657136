use clap::Parser;
use std::path::PathBuf;

use crate::errors::CliError;
use crate::manifest_lookup::{load_and_find, LoadOptions};
use crate::settings::Settings;

/// Print the part of the catalogue a component needs to run
#[derive(Parser, Debug, Clone)]
pub struct DepsCommand {
    /// Project directory, or the component when only one argument is given
    #[arg(value_name = "BASEDIR")]
    pub first: String,

    /// Component to resolve, e.g. core/Repeat
    #[arg(value_name = "COMPONENT")]
    pub component: Option<String>,

    /// Comma-separated runtimes to list components from when discovering
    #[arg(long, value_delimiter = ',', value_name = "RUNTIMES")]
    pub runtimes: Vec<String>,

    /// Manifest file to use (default: fbp.json)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Fail when any transitive dependency cannot be resolved
    #[arg(long)]
    pub strict: bool,
}

impl DepsCommand {
    /// Project directory and component identifier
    pub fn targets(&self) -> (PathBuf, &str) {
        match &self.component {
            Some(component) => (PathBuf::from(&self.first), component.as_str()),
            None => (PathBuf::from("."), self.first.as_str()),
        }
    }
}

pub fn handle_deps(cmd: DepsCommand, settings: Settings) -> Result<(), CliError> {
    let mut settings = settings
        .with_runtimes(&cmd.runtimes)
        .with_manifest(cmd.manifest.as_deref());
    settings.recursive = true;
    if cmd.strict {
        settings.strict = true;
    }

    let (base_dir, component) = cmd.targets();
    let load = LoadOptions {
        manifest: settings.manifest.clone(),
        discover: true,
        silent: false,
        discovery: settings.discovery_options(),
    };
    let manifest = load_and_find(
        &base_dir,
        component,
        &load,
        &settings.resolve_options(&base_dir),
    )?;
    println!("{}", manifest.to_json_pretty()?);
    Ok(())
}
