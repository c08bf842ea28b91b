//! `inilens` command-line front end

use std::path::PathBuf;

use clap::Parser;

mod commands;
mod config;

use commands::Commands;
use config::Config;

#[derive(Parser)]
#[command(name = "inilens")]
#[command(about = "Tools for INI modding dialects and their string tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to <config dir>/inilens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    cli.command.execute(&config)?;

    Ok(())
}
