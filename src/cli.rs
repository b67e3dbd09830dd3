use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "freqset")]
#[command(author, version, about, long_about = None)]
#[command(about = "Cap the CPU frequency of the active Windows power scheme")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a maximum CPU frequency (requires an elevated shell)
    Apply {
        /// Frequency in MHz, e.g. 3500. Prompted for when omitted
        frequency: Option<String>,

        /// Only show what would be done, don't make changes
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print the run result as JSON when done
        #[arg(long)]
        json: bool,
    },

    /// Show the commands that would run for a frequency
    Plan {
        /// Frequency in MHz, e.g. 3500
        frequency: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it (defaults to ./freqset.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
