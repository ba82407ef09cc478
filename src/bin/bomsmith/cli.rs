//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// bomsmith - generate a bill of materials for a multi-module build
#[derive(Parser)]
#[command(name = "bomsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the configured BOMs and build them in the run
    Generate(GenerateArgs),

    /// Show what each BOM would manage
    Select(SelectArgs),

    /// Validate the BOM settings
    Check(CheckArgs),
}

/// Where the run and its settings live.
#[derive(Args)]
pub struct RunArgs {
    /// Reactor descriptor of the run
    #[arg(short, long, default_value = "Reactor.toml")]
    pub reactor: PathBuf,

    /// Settings file (defaults to Bom.toml next to the reactor descriptor)
    #[arg(short, long, env = "BOMSMITH_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Local repository (overrides the settings file)
    #[arg(long, env = "BOMSMITH_LOCAL_REPOSITORY")]
    pub local_repository: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Task to run in the build, a phase or `plugin:goal` (repeatable)
    #[arg(short, long = "goal", value_name = "TASK", default_value = "install")]
    pub goals: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Print the selection as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Settings file to check
    #[arg(short, long, env = "BOMSMITH_SETTINGS", default_value = "Bom.toml")]
    pub settings: PathBuf,
}
