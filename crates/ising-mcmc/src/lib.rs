#![deny(missing_docs)]
#![doc = "Ising spin model engine with sequential and synchronous annealing rules, \
plus a deterministic multi-replica annealing driver."]

//! The engine stores the coupling matrix and external field densely, keyed
//! by a stable label to index table built once at construction. Sequential
//! rules (Metropolis, Glauber) touch one random node per update; the
//! stochastic cellular automata rules recompute every node in parallel
//! against a pre-update snapshot.

/// Algorithm selection and the sequential/synchronous family split.
pub mod algorithm;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation and configuration hashing.
pub mod determinism;
/// Standard and bipartite Hamiltonians.
pub mod energy;
/// Annealing driver and the public `run` entry point.
pub mod kernel;
/// Run manifest serialization helpers.
pub mod manifest;
/// Metrics collection and coverage summaries.
pub mod metrics;
/// The `IsingModel` facade.
pub mod model;
/// JSON problem files.
pub mod problem;
/// Cooling and pinning schedules.
pub mod schedule;
/// Largest eigenvalue of the negated coupling matrix.
pub mod spectral;
/// Dense label-indexed model state.
pub mod state;
/// Update rule implementations.
pub mod updates;

pub use algorithm::{Algorithm, Family};
pub use config::{AnnealConfig, OutputConfig, SeedPolicy};
pub use energy::EnergyBreakdown;
pub use kernel::{run, ReplicaOutcome, RunSummary};
pub use manifest::RunManifest;
pub use metrics::{CoverageMetrics, MetricSample, MetricsRecorder};
pub use model::IsingModel;
pub use problem::{LinearTerm, Problem, QuadraticTerm};
pub use schedule::{CoolingSchedule, PinningSchedule};
pub use state::StateStore;
pub use updates::UpdateParams;
