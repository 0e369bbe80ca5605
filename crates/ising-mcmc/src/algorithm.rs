use std::fmt;
use std::str::FromStr;

use ising_core::{ErrorInfo, IsingError};
use serde::{Deserialize, Serialize};

/// Update rule applied by [`crate::IsingModel::update`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Single-node Metropolis acceptance.
    #[default]
    Metropolis,
    /// Single-node heat bath (Glauber dynamics).
    Glauber,
    /// Stochastic cellular automata with logistic noise.
    Sca,
    /// SCA restricted to a random fraction of eligible nodes per step.
    FlipConstrainedSca,
    /// Momentum annealing with exponential noise scaled by the previous spins.
    MomentumAnnealing,
    /// Momentum annealing with exponential noise scaled by the current spins.
    ModifiedMomentumAnnealing,
}

/// Grouping of algorithms sharing an energy formula and a notion of "previous spins".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// One node per update, standard Hamiltonian.
    Sequential,
    /// All nodes per update, bipartite Hamiltonian.
    Synchronous,
}

impl Algorithm {
    /// Every algorithm in tag order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Metropolis,
        Algorithm::Glauber,
        Algorithm::Sca,
        Algorithm::FlipConstrainedSca,
        Algorithm::MomentumAnnealing,
        Algorithm::ModifiedMomentumAnnealing,
    ];

    /// Family the algorithm belongs to.
    pub fn family(&self) -> Family {
        match self {
            Algorithm::Metropolis | Algorithm::Glauber => Family::Sequential,
            Algorithm::Sca
            | Algorithm::FlipConstrainedSca
            | Algorithm::MomentumAnnealing
            | Algorithm::ModifiedMomentumAnnealing => Family::Synchronous,
        }
    }

    /// Stable machine readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Metropolis => "metropolis",
            Algorithm::Glauber => "glauber",
            Algorithm::Sca => "sca",
            Algorithm::FlipConstrainedSca => "flip-constrained-sca",
            Algorithm::MomentumAnnealing => "momentum-annealing",
            Algorithm::ModifiedMomentumAnnealing => "modified-momentum-annealing",
        }
    }

    /// Name used in human readable reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Metropolis => "Metropolis method",
            Algorithm::Glauber => "Glauber dynamics",
            Algorithm::Sca => "Stochastic cellular automata",
            Algorithm::FlipConstrainedSca => "Flip-constrained stochastic cellular automata",
            Algorithm::MomentumAnnealing => "Momentum annealing",
            Algorithm::ModifiedMomentumAnnealing => "Modified momentum annealing",
        }
    }

    /// Numeric tag of the algorithm.
    pub fn tag(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = IsingError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Algorithm::ALL.get(tag as usize).copied().ok_or_else(|| {
            IsingError::Configuration(
                ErrorInfo::new("unknown-algorithm-tag", "algorithm tag is not recognised")
                    .with_context("tag", tag.to_string())
                    .with_hint(format!("expected a tag in 0..{}", Algorithm::ALL.len())),
            )
        })
    }
}

impl FromStr for Algorithm {
    type Err = IsingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.as_str() == normalised)
            .ok_or_else(|| {
                IsingError::Configuration(
                    ErrorInfo::new("unknown-algorithm", "algorithm name is not recognised")
                        .with_context("name", value),
                )
            })
    }
}
