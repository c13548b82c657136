//! Common types and utilities shared across commands

use clap::{Args, Parser};
use std::path::PathBuf;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Project directory and runtime selection shared by the discovery commands
#[derive(Args, Debug, Clone, Default)]
pub struct DiscoveryArgs {
    /// Project directory (defaults to the current directory)
    #[arg(value_name = "BASEDIR")]
    pub base_dir: Option<PathBuf>,

    /// Comma-separated runtimes to list components from, e.g. noflo,msgflo
    #[arg(long, value_delimiter = ',', value_name = "RUNTIMES")]
    pub runtimes: Vec<String>,
}

impl DiscoveryArgs {
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
