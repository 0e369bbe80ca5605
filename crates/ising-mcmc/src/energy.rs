use ising_core::Spin;
use serde::{Deserialize, Serialize};

use crate::algorithm::Family;
use crate::state::{spin_vector, StateStore};

/// Energy of the current configuration under both Hamiltonians.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnergyBreakdown {
    /// Standard Hamiltonian of the current spins.
    pub standard: f64,
    /// Bipartite Hamiltonian of the current and previous spins.
    pub bipartite: f64,
}

impl EnergyBreakdown {
    /// Evaluates both formulas for the store.
    pub fn evaluate(store: &StateStore, pinning: f64) -> Self {
        Self {
            standard: standard(store),
            bipartite: bipartite(store, pinning),
        }
    }

    /// Value reported for the given family.
    pub fn for_family(&self, family: Family) -> f64 {
        match family {
            Family::Sequential => self.standard,
            Family::Synchronous => self.bipartite,
        }
    }
}

/// Hamiltonian used by the given algorithm family.
pub fn hamiltonian(store: &StateStore, family: Family, pinning: f64) -> f64 {
    match family {
        Family::Sequential => standard(store),
        Family::Synchronous => bipartite(store, pinning),
    }
}

/// `E = -½·sᵗCs - s·h` for the current spins.
pub fn standard(store: &StateStore) -> f64 {
    standard_of(store, store.spins())
}

/// Standard Hamiltonian of an arbitrary configuration over the store's nodes.
pub fn standard_of(store: &StateStore, spins: &[Spin]) -> f64 {
    let s = spin_vector(spins);
    let coupled = store.coupling() * &s;
    // The ½ removes the double counting of each symmetric pair.
    -0.5 * s.dot(&coupled) - s.dot(store.field())
}

/// `E = -½·sᵗC·s' - ½·(s+s')·h + ½·q·(N - s·s')` where `s'` are the previous spins.
pub fn bipartite(store: &StateStore, pinning: f64) -> f64 {
    let s = spin_vector(store.spins());
    let prev = spin_vector(store.previous_spins());
    let n = store.len() as f64;
    let coupled = store.coupling() * &prev;
    let interaction = -0.5 * s.dot(&coupled);
    let external = -0.5 * (&s + &prev).dot(store.field());
    let pinned = 0.5 * pinning * (n - s.dot(&prev));
    interaction + external + pinned
}

/// Change in the standard Hamiltonian when node `index` flips: `2·s_i·h_i`.
pub fn flip_delta(store: &StateStore, index: usize) -> f64 {
    let s = spin_vector(store.spins());
    2.0 * store.spins()[index].value() * store.local_field(index, &s)
}
