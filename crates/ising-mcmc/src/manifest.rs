use std::fs;
use std::path::{Path, PathBuf};

use ising_core::{ErrorInfo, IsingError};
use serde::{Deserialize, Serialize};

use crate::config::AnnealConfig;

/// Structured manifest describing a completed annealing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: AnnealConfig,
    /// Master seed used to derive replica substreams.
    pub master_seed: u64,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Number of nodes in the problem.
    pub node_count: usize,
    /// Index of the replica with the lowest final standard energy.
    pub best_replica: usize,
    /// Final standard energy of that replica.
    pub best_energy: f64,
    /// Configuration hash of that replica's final spins.
    pub best_configuration_hash: String,
    /// Trace file produced during the run (relative to run directory).
    pub trace_file: Option<PathBuf>,
    /// RFC 3339 timestamp taken when the manifest was built.
    pub created_at: String,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), IsingError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                IsingError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, IsingError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
