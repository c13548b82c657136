use clap::Parser;
use fbp_manifest::validate::validate_file;
use std::path::PathBuf;

use crate::errors::CliError;

/// Check a manifest document against the manifest format
#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    /// Manifest file, e.g. fbp.json
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn handle_validate(cmd: ValidateCommand) -> Result<(), CliError> {
    let file = match std::env::current_dir() {
        Ok(cwd) => cwd.join(&cmd.file),
        Err(_) => cmd.file,
    };
    validate_file(&file)?;
    println!("{} is valid FBP Manifest", file.display());
    Ok(())
}
