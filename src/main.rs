mod cli;
mod commands;
mod config;
mod executor;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging, verbose raises it to debug
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Command::Apply {
            frequency,
            dry_run,
            yes,
            json,
        } => {
            commands::apply::run(
                cli.config.as_deref(),
                frequency.as_deref(),
                dry_run,
                yes,
                json,
            )?;
        }
        Command::Plan { frequency } => {
            commands::plan::run(cli.config.as_deref(), &frequency)?;
        }
        Command::Init { path, force } => {
            commands::init::run(path.as_deref(), force)?;
        }
    }

    Ok(())
}
