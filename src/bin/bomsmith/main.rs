//! bomsmith CLI - generate a BOM for a multi-module build

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("bomsmith=debug")
    } else {
        EnvFilter::new("bomsmith=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color && std::io::stderr().is_terminal();

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, color),
        Commands::Select(args) => commands::select::execute(args, color),
        Commands::Check(args) => commands::check::execute(args, color),
    }
}
