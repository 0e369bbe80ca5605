use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ising_mcmc::spectral::pinning_from_spectral_bound;
use ising_mcmc::Problem;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct EigenArgs {
    /// JSON problem with `linear` and `quadratic` terms.
    #[arg(long)]
    pub problem: PathBuf,
}

#[derive(Debug, Serialize)]
struct EigenReport {
    nodes: usize,
    largest_eigenvalue: f64,
    suggested_pinning: f64,
}

pub fn run(args: &EigenArgs) -> Result<(), Box<dyn Error>> {
    let model = Problem::load(&args.problem)?.build_model()?;
    let largest_eigenvalue = model.calc_largest_eigenvalue();
    let report = EigenReport {
        nodes: model.len(),
        largest_eigenvalue,
        suggested_pinning: pinning_from_spectral_bound(largest_eigenvalue),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
