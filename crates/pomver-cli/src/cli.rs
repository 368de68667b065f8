//! CLI argument definitions for pomver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "pomver",
    version,
    about = "Inventory of dependency versions across Maven applications",
    long_about = "pomver walks a directory of Maven applications, resolves the effective \
                  version of every declared dependency (properties, parent inheritance, \
                  implicit versions) and exports a library-by-application table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where to read configuration from, shared by every command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config file (defaults to ./pomver.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory whose subdirectories are applications
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve all applications and export the version inventory as CSV
    Export {
        #[command(flatten)]
        config: ConfigArgs,
        /// Export path without extension (.csv is appended)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Group id to leave out of the export (repeatable)
        #[arg(long = "ignore-group")]
        ignore_groups: Vec<String>,
        /// Application to leave out of the export (repeatable)
        #[arg(long = "ignore-app")]
        ignore_apps: Vec<String>,
    },

    /// Print the resolved modules of each application
    Inspect {
        #[command(flatten)]
        config: ConfigArgs,
        /// Only show this application
        #[arg(long)]
        app: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn parse() -> Cli {
    Cli::parse()
}
