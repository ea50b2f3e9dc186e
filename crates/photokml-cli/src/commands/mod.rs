//! Command implementations

mod config;
mod export;
mod scan;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Export(args) => export::execute(args, config_path, &output, cli.dry_run),
        Commands::Scan(args) => scan::execute(args, config_path, &output),
        Commands::Config => config::execute(config_path, &output),
    }
}
