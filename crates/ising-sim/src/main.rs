use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    anneal::{self, AnnealArgs},
    eigen::{self, EigenArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ising-sim", about = "Ising model annealing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Anneal a problem file with a YAML run configuration.
    Anneal(AnnealArgs),
    /// Report the spectral bound of a problem and the pinning it suggests.
    Eigen(EigenArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Anneal(args) => anneal::run(&args),
        Command::Eigen(args) => eigen::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
