use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ising_mcmc::{kernel, Algorithm, AnnealConfig, Problem};
use tracing::info;

use super::write_json;

#[derive(Args, Debug)]
pub struct AnnealArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// JSON problem with `linear` and `quadratic` terms.
    #[arg(long)]
    pub problem: PathBuf,
    /// Output directory for the trace, summary and manifest.
    #[arg(long)]
    pub out: PathBuf,
    /// Master seed overriding `seed_policy.master_seed`.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Update rule overriding the configured algorithm.
    #[arg(long)]
    pub algorithm: Option<Algorithm>,
}

pub fn run(args: &AnnealArgs) -> Result<(), Box<dyn Error>> {
    let mut config = AnnealConfig::load(&args.config)?;
    config.output.run_directory = Some(args.out.clone());
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    let seed = args.seed.unwrap_or(config.seed_policy.master_seed);
    let problem = Problem::load(&args.problem)?;
    info!(
        config = %args.config.display(),
        problem = %args.problem.display(),
        "loaded inputs"
    );

    let summary = kernel::run(&config, seed, &problem)?;
    write_json(args.out.join("summary.json"), &summary)?;

    println!(
        "best replica {} energy {:.6} ({} samples, {} unique configurations) -> {}",
        summary.best_replica,
        summary.best_energy,
        summary.coverage.samples,
        summary.coverage.unique_configurations,
        args.out.display()
    );
    Ok(())
}
