use std::fs;
use std::path::{Path, PathBuf};

use ising_core::{ErrorInfo, InitialConfiguration, IsingError};
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::schedule::{CoolingSchedule, PinningSchedule};

/// YAML-configurable parameters governing an annealing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealConfig {
    /// Number of annealing steps. Each step is one sweep.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Number of initial steps excluded from the recorded samples.
    #[serde(default)]
    pub burn_in: usize,
    /// Interval at which to record metrics samples.
    #[serde(default = "default_thinning")]
    pub thinning: usize,
    /// Number of independent replicas.
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    /// Worker threads used to run replicas.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Update rule applied by every replica.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Temperature at step 0.
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,
    /// Cooling schedule.
    #[serde(default)]
    pub schedule: CoolingSchedule,
    /// Pinning schedule for the synchronous rules.
    #[serde(default)]
    pub pinning: PinningSchedule,
    /// Fraction of nodes eligible to flip under flip-constrained SCA.
    #[serde(default = "default_flip_trial_rate")]
    pub flip_trial_rate: f64,
    /// Spin configuration each replica starts from.
    #[serde(default)]
    pub initial_configuration: InitialConfiguration,
    /// Runs a greedy descent on every replica after the last step.
    #[serde(default)]
    pub quench: bool,
    /// Master seed and label.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_steps() -> usize {
    100
}

fn default_thinning() -> usize {
    1
}

fn default_replicas() -> usize {
    1
}

fn default_concurrency() -> usize {
    1
}

fn default_initial_temperature() -> f64 {
    10.0
}

fn default_flip_trial_rate() -> f64 {
    1.0
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            burn_in: 0,
            thinning: default_thinning(),
            replicas: default_replicas(),
            concurrency: default_concurrency(),
            algorithm: Algorithm::default(),
            initial_temperature: default_initial_temperature(),
            schedule: CoolingSchedule::default(),
            pinning: PinningSchedule::default(),
            flip_trial_rate: default_flip_trial_rate(),
            initial_configuration: InitialConfiguration::default(),
            quench: false,
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AnnealConfig {
    /// Parses a configuration from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, IsingError> {
        let config: Self = serde_yaml::from_str(text).map_err(|err| {
            IsingError::Configuration(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, IsingError> {
        let text = fs::read_to_string(path).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text).map_err(|err| match err {
            IsingError::Configuration(info) => {
                IsingError::Configuration(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Rejects settings the driver cannot honour.
    pub fn validate(&self) -> Result<(), IsingError> {
        if self.thinning == 0 {
            return Err(IsingError::Configuration(
                ErrorInfo::new("zero-thinning", "thinning must be at least 1")
                    .with_hint("use thinning: 1 to record every step"),
            ));
        }
        if self.replicas == 0 {
            return Err(IsingError::Configuration(ErrorInfo::new(
                "zero-replicas",
                "at least one replica is required",
            )));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(IsingError::Configuration(
                ErrorInfo::new(
                    "invalid-initial-temperature",
                    "initial temperature must be finite and non-negative",
                )
                .with_context("value", self.initial_temperature.to_string()),
            ));
        }
        Ok(())
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used when the caller does not pass one.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Created if it does not exist.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Trace filename relative to `run_directory`.
    #[serde(default = "default_trace_filename")]
    pub trace_file: PathBuf,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
}

fn default_trace_filename() -> PathBuf {
    PathBuf::from("trace.csv")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            trace_file: default_trace_filename(),
            manifest_file: default_manifest_filename(),
        }
    }
}
