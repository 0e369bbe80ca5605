use std::path::PathBuf;

use ising_core::{ErrorInfo, IsingError, NodeLabel, Spin};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnnealConfig;
use crate::determinism;
use crate::manifest::RunManifest;
use crate::metrics::{CoverageMetrics, MetricSample, MetricsRecorder};
use crate::model::IsingModel;
use crate::problem::Problem;
use crate::schedule;

/// Final state of one replica.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplicaOutcome {
    /// Replica index.
    pub replica: usize,
    /// Seed derived for the replica.
    pub seed: u64,
    /// Standard Hamiltonian of the final spins.
    pub final_energy: f64,
    /// Final spins in the order of [`RunSummary::labels`].
    pub spins: Vec<Spin>,
    /// Hex digest of the final spins.
    pub configuration_hash: String,
    /// Flips performed by the closing quench (0 when quenching is off).
    pub quench_flips: usize,
}

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Master seed the replica seeds were derived from.
    pub master_seed: u64,
    /// Node labels in dense index order.
    pub labels: Vec<NodeLabel>,
    /// Temperature applied at each step.
    pub temperatures: Vec<f64>,
    /// Largest eigenvalue of the negated couplings, when the pinning schedule needed it.
    pub spectral_bound: Option<f64>,
    /// Final state of every replica, ordered by index.
    pub replicas: Vec<ReplicaOutcome>,
    /// Replica with the lowest final energy (lowest index on ties).
    pub best_replica: usize,
    /// Final energy of the best replica.
    pub best_energy: f64,
    /// Coverage metrics over all recorded samples.
    pub coverage: CoverageMetrics,
    /// Trace CSV written during the run.
    pub trace_path: Option<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
    /// Recorded samples, replica by replica.
    pub samples: Vec<MetricSample>,
}

struct ReplicaRun {
    outcome: ReplicaOutcome,
    recorder: MetricsRecorder,
}

/// Anneals every replica of `problem` and gathers the results.
///
/// Replica `r` is seeded with `derive_substream_seed(seed, r)`, so the
/// summary depends only on the configuration, the seed and the problem,
/// never on the number of worker threads.
pub fn run(config: &AnnealConfig, seed: u64, problem: &Problem) -> Result<RunSummary, IsingError> {
    config.validate()?;
    let template = problem.build_model()?;
    let temperatures =
        schedule::build_ladder(&config.schedule, config.initial_temperature, config.steps);
    let spectral_bound = config
        .pinning
        .needs_spectral_bound()
        .then(|| template.calc_largest_eigenvalue());

    info!(
        nodes = template.len(),
        replicas = config.replicas,
        steps = config.steps,
        algorithm = %config.algorithm,
        seed,
        "starting annealing run"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.concurrency.max(1))
        .build()
        .map_err(|err| {
            IsingError::Configuration(
                ErrorInfo::new("thread-pool", err.to_string())
                    .with_context("concurrency", config.concurrency.to_string()),
            )
        })?;
    let runs: Result<Vec<ReplicaRun>, IsingError> = pool.install(|| {
        (0..config.replicas)
            .into_par_iter()
            .map(|replica| {
                anneal_replica(
                    config,
                    seed,
                    replica,
                    template.clone(),
                    &temperatures,
                    spectral_bound,
                )
            })
            .collect()
    });
    let mut runs = runs?;
    runs.sort_by_key(|run| run.outcome.replica);

    let mut recorder = MetricsRecorder::new();
    let mut replicas = Vec::with_capacity(runs.len());
    for run in runs {
        recorder.extend(run.recorder);
        replicas.push(run.outcome);
    }
    let (best_replica, best_energy) = replicas
        .iter()
        .map(|outcome| (outcome.replica, outcome.final_energy))
        .fold(None, |best: Option<(usize, f64)>, candidate| match best {
            Some(current) if current.1 <= candidate.1 => Some(current),
            _ => Some(candidate),
        })
        .unwrap_or((0, 0.0));

    let mut summary = RunSummary {
        master_seed: seed,
        labels: template.node_labels().to_vec(),
        temperatures,
        spectral_bound,
        replicas,
        best_replica,
        best_energy,
        coverage: recorder.coverage(),
        trace_path: None,
        manifest_path: None,
        samples: recorder.samples().to_vec(),
    };
    if let Some(run_dir) = config.output.run_directory.clone() {
        write_outputs(config, &mut summary, &recorder, run_dir)?;
    }

    info!(
        best_replica = summary.best_replica,
        best_energy = summary.best_energy,
        unique_configurations = summary.coverage.unique_configurations,
        "annealing run finished"
    );
    Ok(summary)
}

fn anneal_replica(
    config: &AnnealConfig,
    master_seed: u64,
    replica: usize,
    mut model: IsingModel,
    temperatures: &[f64],
    spectral_bound: Option<f64>,
) -> Result<ReplicaRun, IsingError> {
    let seed = determinism::replica_seed(master_seed, replica);
    model.set_seed(Some(seed));
    model.set_algorithm(config.algorithm);
    model.set_flip_trial_rate(config.flip_trial_rate);
    model.give_spins(config.initial_configuration);

    let mut recorder = MetricsRecorder::new();
    for (step, &temperature) in temperatures.iter().enumerate() {
        model.set_temperature(temperature);
        model.set_pinning_parameter(config.pinning.pinning(
            temperature,
            model.len(),
            spectral_bound,
        ));
        model.sweep().map_err(|err| {
            err.with_context("replica", replica.to_string())
                .with_context("step", step.to_string())
        })?;
        if step < config.burn_in || (step - config.burn_in) % config.thinning != 0 {
            continue;
        }
        let sample = sample_of(&model, step, replica);
        debug!(
            replica,
            step,
            energy = sample.energy,
            temperature = sample.temperature,
            "recorded sample"
        );
        recorder.push_sample(sample);
    }

    let quench_flips = if config.quench { model.quench() } else { 0 };
    let outcome = ReplicaOutcome {
        replica,
        seed,
        final_energy: model.standard_energy(),
        spins: model.state().spins().to_vec(),
        configuration_hash: determinism::configuration_hash(model.state().spins()),
        quench_flips,
    };
    debug!(
        replica,
        final_energy = outcome.final_energy,
        quench_flips,
        "replica finished"
    );
    Ok(ReplicaRun { outcome, recorder })
}

fn sample_of(model: &IsingModel, step: usize, replica: usize) -> MetricSample {
    MetricSample {
        step,
        replica,
        temperature: model.temperature(),
        pinning: model.pinning_parameter(),
        energy: model.energy(),
        ground_energy: model.standard_energy(),
        magnetization: model.magnetization(),
        configuration_hash: determinism::configuration_hash(model.state().spins()),
    }
}

fn write_outputs(
    config: &AnnealConfig,
    summary: &mut RunSummary,
    recorder: &MetricsRecorder,
    run_dir: PathBuf,
) -> Result<(), IsingError> {
    std::fs::create_dir_all(&run_dir).map_err(|err| {
        IsingError::Serde(
            ErrorInfo::new("run-dir-create", err.to_string())
                .with_context("path", run_dir.display().to_string()),
        )
    })?;

    let trace_path = run_dir.join(&config.output.trace_file);
    recorder.write_csv(&trace_path).map_err(|err| {
        IsingError::Serde(
            ErrorInfo::new("trace-write", err.to_string())
                .with_context("path", trace_path.display().to_string()),
        )
    })?;

    let best_configuration_hash = summary
        .replicas
        .get(summary.best_replica)
        .map(|outcome| outcome.configuration_hash.clone())
        .unwrap_or_default();
    let manifest = RunManifest {
        config: config.clone(),
        master_seed: summary.master_seed,
        seed_label: config.seed_policy.label.clone(),
        node_count: summary.labels.len(),
        best_replica: summary.best_replica,
        best_energy: summary.best_energy,
        best_configuration_hash,
        trace_file: Some(config.output.trace_file.clone()),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    let manifest_path = run_dir.join(&config.output.manifest_file);
    manifest.write(&manifest_path)?;

    info!(
        trace = %trace_path.display(),
        manifest = %manifest_path.display(),
        "wrote run artefacts"
    );
    summary.trace_path = Some(trace_path);
    summary.manifest_path = Some(manifest_path);
    Ok(())
}
