use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    build::{self, BuildArgs},
    expt::{self, ExptArgs},
    run::{self, RunArgs},
    summary::{self, SummaryArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "dod-sim", about = "SoA vs AoS benchmark sweep driver")]
struct Cli {
    /// Log compiler and benchmark command lines and raw output.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep every point/component combination in both build modes.
    Expt(ExptArgs),
    /// Compile the benchmark once, statically or dynamically.
    Build(BuildArgs),
    /// Run the existing benchmark executable once.
    Run(RunArgs),
    /// Summarise a persisted result table.
    Summary(SummaryArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Expt(args) => expt::run(&args),
        Command::Build(args) => build::run(&args),
        Command::Run(args) => run::run(&args),
        Command::Summary(args) => summary::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

fn init_logging(verbose: bool) {
    let directive = if verbose { "dod=debug" } else { "dod=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
