use std::collections::BTreeMap;
use std::fmt;

use ising_core::{ErrorInfo, InitialConfiguration, IsingError, NodeLabel, RngHandle, Spin};

use crate::algorithm::{Algorithm, Family};
use crate::energy;
use crate::spectral;
use crate::state::{spin_vector, StateStore};
use crate::updates::{self, UpdateParams};

/// Smallest single-flip energy decrease `quench` still acts on.
const QUENCH_TOLERANCE: f64 = 1e-12;

/// Ising model with its update rule, annealing parameters and random source.
///
/// A model is a single-owner object: `update` mutates it in place and there
/// is no internal locking. Each instance owns its RNG, so identically built
/// and identically seeded instances follow identical trajectories.
#[derive(Debug, Clone)]
pub struct IsingModel {
    store: StateStore,
    algorithm: Algorithm,
    temperature: f64,
    pinning_parameter: f64,
    flip_trial_rate: f64,
    rng: RngHandle,
}

impl IsingModel {
    /// Builds a model from linear (external field) and quadratic (coupling) terms.
    ///
    /// All spins start at `+1`. The random source is seeded from entropy;
    /// call [`IsingModel::set_seed`] for reproducible runs.
    pub fn new(
        linear: &BTreeMap<NodeLabel, f64>,
        quadratic: &BTreeMap<(NodeLabel, NodeLabel), f64>,
    ) -> Result<Self, IsingError> {
        Ok(Self {
            store: StateStore::new(linear, quadratic)?,
            algorithm: Algorithm::default(),
            temperature: 0.0,
            pinning_parameter: 0.0,
            flip_trial_rate: 1.0,
            rng: RngHandle::from_entropy(),
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` when the model has no nodes.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Read access to the dense state.
    pub fn state(&self) -> &StateStore {
        &self.store
    }

    /// Node labels in dense index order.
    pub fn node_labels(&self) -> &[NodeLabel] {
        self.store.labels()
    }

    /// Current configuration keyed by label.
    pub fn spins(&self) -> BTreeMap<NodeLabel, Spin> {
        self.labelled(self.store.spins())
    }

    /// Configuration before the most recent synchronous update, keyed by label.
    pub fn previous_spins(&self) -> BTreeMap<NodeLabel, Spin> {
        self.labelled(self.store.previous_spins())
    }

    /// Overwrites the spins of the listed labels.
    ///
    /// Only values of exactly `-1` or `+1` for known labels are applied; the
    /// rest are ignored. Applied entries are mirrored into the previous spins
    /// so both Hamiltonians describe the written configuration. Returns the
    /// number of entries applied.
    pub fn set_spins(&mut self, spins: &BTreeMap<NodeLabel, i64>) -> usize {
        let mut applied = 0;
        for (label, &raw) in spins {
            let (Some(index), Some(spin)) = (self.store.index_of(label), Spin::from_raw(raw))
            else {
                continue;
            };
            self.store.spins_mut()[index] = spin;
            applied += 1;
        }
        if applied > 0 {
            self.store.resync_previous();
        }
        applied
    }

    /// Resets every spin and resynchronizes the previous spins.
    pub fn give_spins(&mut self, configuration: InitialConfiguration) {
        match configuration {
            InitialConfiguration::AllDown => self.store.spins_mut().fill(Spin::Down),
            InitialConfiguration::AllUp => self.store.spins_mut().fill(Spin::Up),
            InitialConfiguration::Uniform => {
                for index in 0..self.store.len() {
                    let spin = if self.rng.bernoulli(0.5) {
                        Spin::Down
                    } else {
                        Spin::Up
                    };
                    self.store.spins_mut()[index] = spin;
                }
            }
        }
        self.store.resync_previous();
    }

    /// Temperature including the Boltzmann constant.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Sets the temperature. Negative and `NaN` inputs become `0`.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature.max(0.0);
    }

    /// Pinning parameter of the synchronous rules.
    pub fn pinning_parameter(&self) -> f64 {
        self.pinning_parameter
    }

    /// Sets the pinning parameter. Negative and `NaN` inputs become `0`.
    pub fn set_pinning_parameter(&mut self, pinning_parameter: f64) {
        self.pinning_parameter = pinning_parameter.max(0.0);
    }

    /// Fraction of nodes eligible to flip under flip-constrained SCA.
    pub fn flip_trial_rate(&self) -> f64 {
        self.flip_trial_rate
    }

    /// Sets the flip trial rate, clamped into `[0, 1]` (`NaN` becomes `0`).
    pub fn set_flip_trial_rate(&mut self, rate: f64) {
        self.flip_trial_rate = rate.max(0.0).min(1.0);
    }

    /// Active update rule.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Selects the update rule.
    ///
    /// Moving between the sequential and synchronous families resynchronizes
    /// the previous spins with the current ones.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm.family() != self.algorithm.family() {
            self.store.resync_previous();
        }
        self.algorithm = algorithm;
    }

    /// Selects the update rule from its numeric tag.
    pub fn set_algorithm_tag(&mut self, tag: u8) -> Result<(), IsingError> {
        let algorithm = Algorithm::try_from(tag)?;
        self.set_algorithm(algorithm);
        Ok(())
    }

    /// Reseeds the random source; `None` draws a fresh seed from entropy.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.rng = RngHandle::from_optional_seed(seed);
    }

    /// Energy under the Hamiltonian of the active algorithm family.
    pub fn energy(&self) -> f64 {
        energy::hamiltonian(&self.store, self.algorithm.family(), self.pinning_parameter)
    }

    /// Standard Hamiltonian of the current spins regardless of the algorithm.
    pub fn standard_energy(&self) -> f64 {
        energy::standard(&self.store)
    }

    /// Mean spin.
    pub fn magnetization(&self) -> f64 {
        if self.store.is_empty() {
            return 0.0;
        }
        let total: f64 = self.store.spins().iter().map(|spin| spin.value()).sum();
        total / self.store.len() as f64
    }

    /// External field coefficient of a node.
    pub fn external_field(&self, label: &NodeLabel) -> Result<f64, IsingError> {
        let index = self.require_index(label)?;
        Ok(self.store.field()[index])
    }

    /// Coupling coefficient between two nodes.
    pub fn coupling(&self, u: &NodeLabel, v: &NodeLabel) -> Result<f64, IsingError> {
        let i = self.require_index(u)?;
        let j = self.require_index(v)?;
        Ok(self.store.coupling()[(i, j)])
    }

    /// Local magnetic field `h_i + Σ_j C_ij s_j` at a node.
    pub fn calc_local_magnetic_field(&self, label: &NodeLabel) -> Result<f64, IsingError> {
        let index = self.require_index(label)?;
        Ok(self
            .store
            .local_field(index, &spin_vector(self.store.spins())))
    }

    /// Largest eigenvalue of the negated coupling matrix.
    pub fn calc_largest_eigenvalue(&self) -> f64 {
        spectral::largest_eigenvalue(self.store.coupling())
    }

    /// Performs one update with the active algorithm.
    pub fn update(&mut self) -> Result<(), IsingError> {
        let params = UpdateParams {
            temperature: self.temperature,
            pinning: self.pinning_parameter,
            flip_trial_rate: self.flip_trial_rate,
        };
        updates::apply(self.algorithm, &mut self.store, &mut self.rng, &params)
    }

    /// One Monte Carlo step: `N` updates for sequential rules, one for synchronous rules.
    pub fn sweep(&mut self) -> Result<(), IsingError> {
        let updates = match self.algorithm.family() {
            Family::Sequential => self.store.len(),
            Family::Synchronous => 1,
        };
        for _ in 0..updates {
            self.update()?;
        }
        Ok(())
    }

    /// Greedy descent on the standard Hamiltonian.
    ///
    /// Flips the node with the most negative single-flip energy change (the
    /// lowest index on ties) until no flip lowers the energy, then
    /// resynchronizes the previous spins. Returns the number of flips.
    pub fn quench(&mut self) -> usize {
        let mut flips = 0;
        loop {
            let snapshot = spin_vector(self.store.spins());
            let fields = self.store.local_fields(&snapshot);
            let best = self
                .store
                .spins()
                .iter()
                .zip(fields.iter())
                .map(|(spin, field)| 2.0 * spin.value() * field)
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (index, delta)| match best {
                    Some((_, best_delta)) if best_delta <= delta => best,
                    _ => Some((index, delta)),
                });
            match best {
                Some((index, delta)) if delta < -QUENCH_TOLERANCE => {
                    let spins = self.store.spins_mut();
                    spins[index] = spins[index].flipped();
                    flips += 1;
                }
                _ => break,
            }
        }
        self.store.resync_previous();
        flips
    }

    fn require_index(&self, label: &NodeLabel) -> Result<usize, IsingError> {
        self.store.index_of(label).ok_or_else(|| {
            IsingError::InvalidInput(
                ErrorInfo::new("unknown-label", "label is not part of the model")
                    .with_context("label", label.to_string()),
            )
        })
    }

    fn labelled(&self, spins: &[Spin]) -> BTreeMap<NodeLabel, Spin> {
        self.store
            .labels()
            .iter()
            .cloned()
            .zip(spins.iter().copied())
            .collect()
    }
}

impl fmt::Display for IsingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current spin configuration:")?;
        for (label, spin) in self.store.labels().iter().zip(self.store.spins()) {
            writeln!(f, "  {label}: {spin}")?;
        }
        writeln!(f, "External magnetic field:")?;
        for (label, bias) in self.store.labels().iter().zip(self.store.field().iter()) {
            writeln!(f, "  {label}: {bias}")?;
        }
        writeln!(f, "Coupling coefficients:")?;
        let n = self.store.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let weight = self.store.coupling()[(i, j)];
                if weight != 0.0 {
                    writeln!(
                        f,
                        "  ({}, {}): {weight}",
                        self.store.labels()[i],
                        self.store.labels()[j]
                    )?;
                }
            }
        }
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Temperature: {}", self.temperature)?;
        write!(f, "Pinning parameter: {}", self.pinning_parameter)
    }
}
