#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quay")]
#[command(author, version, about = "Keep board cores and libraries up to date", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Data directory holding installed cores and libraries
    #[arg(long, global = true, value_name = "PATH")]
    root: Option<PathBuf>,

    /// Package index document (defaults to <root>/index.json)
    #[arg(long, global = true, value_name = "FILE")]
    index: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// List installed packages older than the latest indexed release
    Outdated,

    /// Upgrade every outdated package to its latest indexed release
    Upgrade,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = cli
        .root
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let index = cli.index.unwrap_or_else(|| root.join("index.json"));

    logging::init(cli.verbose, cli.json);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Outdated) => commands::outdated::run(&root, &index, cli.json),
        Some(Commands::Upgrade) => commands::upgrade::run(&root, &index, cli.json),
    }
}
