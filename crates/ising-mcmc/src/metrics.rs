use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Per-step metrics stored for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    /// Annealing step at which the sample was recorded.
    pub step: usize,
    /// Replica index.
    pub replica: usize,
    /// Temperature applied during the step.
    pub temperature: f64,
    /// Pinning parameter applied during the step.
    pub pinning: f64,
    /// Energy under the Hamiltonian of the active algorithm family.
    pub energy: f64,
    /// Standard Hamiltonian of the current spins.
    pub ground_energy: f64,
    /// Mean spin.
    pub magnetization: f64,
    /// Hex digest of the spin configuration.
    pub configuration_hash: String,
}

/// Aggregate coverage metrics summarising the exploration quality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageMetrics {
    /// Number of distinct configurations among the recorded samples.
    pub unique_configurations: usize,
    /// Number of recorded samples.
    pub samples: usize,
    /// Mean standard energy over the recorded samples.
    pub mean_energy: f64,
    /// Variance of the recorded standard energies.
    pub energy_variance: f64,
}

impl CoverageMetrics {
    /// Returns an empty coverage descriptor.
    pub fn empty() -> Self {
        Self {
            unique_configurations: 0,
            samples: 0,
            mean_energy: 0.0,
            energy_variance: 0.0,
        }
    }
}

/// Collects per-step metrics and computes aggregate coverage proxies.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    samples: Vec<MetricSample>,
    unique_hashes: IndexSet<String>,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a metrics sample.
    pub fn push_sample(&mut self, sample: MetricSample) {
        self.unique_hashes
            .insert(sample.configuration_hash.clone());
        self.samples.push(sample);
    }

    /// Appends every sample of another recorder, in order.
    pub fn extend(&mut self, other: MetricsRecorder) {
        for sample in other.samples {
            self.push_sample(sample);
        }
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Computes coverage metrics from the recorded data.
    pub fn coverage(&self) -> CoverageMetrics {
        if self.samples.is_empty() {
            return CoverageMetrics::empty();
        }
        let energies: Vec<f64> = self
            .samples
            .iter()
            .map(|sample| sample.ground_energy)
            .collect();
        let count = energies.len() as f64;
        let mean_energy = energies.iter().sum::<f64>() / count;
        let energy_variance = if energies.len() > 1 {
            energies
                .iter()
                .map(|&e| (e - mean_energy).powi(2))
                .sum::<f64>()
                / count
        } else {
            0.0
        };
        CoverageMetrics {
            unique_configurations: self.unique_hashes.len(),
            samples: self.samples.len(),
            mean_energy,
            energy_variance,
        }
    }

    /// Writes the recorded samples to a CSV file with a header row.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for sample in &self.samples {
            writer.serialize(sample)?;
        }
        writer.flush()?;
        Ok(())
    }
}
