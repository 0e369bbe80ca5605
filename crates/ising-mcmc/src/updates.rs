use ising_core::{ErrorInfo, IsingError, RngHandle, Spin};
use rayon::prelude::*;

use crate::algorithm::Algorithm;
use crate::energy;
use crate::state::{spin_vector, StateStore};

/// Scalar parameters read by the update rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateParams {
    /// Temperature including the Boltzmann constant.
    pub temperature: f64,
    /// Pinning parameter of the synchronous rules.
    pub pinning: f64,
    /// Fraction of nodes eligible to flip under flip-constrained SCA.
    pub flip_trial_rate: f64,
}

/// Applies one update of `algorithm` to the store.
///
/// Sequential rules touch one node and leave the previous spins alone.
/// Synchronous rules draw all their noise first, in node order, then evaluate
/// every node in parallel against the pre-update snapshot and commit.
pub fn apply(
    algorithm: Algorithm,
    store: &mut StateStore,
    rng: &mut RngHandle,
    params: &UpdateParams,
) -> Result<(), IsingError> {
    if store.is_empty() {
        return Ok(());
    }
    match algorithm {
        Algorithm::Metropolis => {
            metropolis(store, rng, params);
            Ok(())
        }
        Algorithm::Glauber => {
            glauber(store, rng, params);
            Ok(())
        }
        Algorithm::Sca => sca(store, rng, params),
        Algorithm::FlipConstrainedSca => flip_constrained_sca(store, rng, params),
        Algorithm::MomentumAnnealing => momentum_annealing(store, rng, params),
        Algorithm::ModifiedMomentumAnnealing => modified_momentum_annealing(store, rng, params),
    }
}

/// Applies one update selected by a raw algorithm tag.
pub fn apply_tag(
    tag: u8,
    store: &mut StateStore,
    rng: &mut RngHandle,
    params: &UpdateParams,
) -> Result<(), IsingError> {
    let algorithm = Algorithm::try_from(tag)?;
    apply(algorithm, store, rng, params)
}

/// Metropolis acceptance probability of a flip costing `delta`.
pub fn metropolis_acceptance(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else if temperature == 0.0 {
        0.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Heat-bath probability of assigning `+1` given the local field.
pub fn glauber_probability(local_field: f64, temperature: f64) -> f64 {
    if temperature == 0.0 {
        return if local_field > 0.0 {
            1.0
        } else if local_field < 0.0 {
            0.0
        } else {
            0.5
        };
    }
    1.0 / (1.0 + (-2.0 * local_field / temperature).exp())
}

fn metropolis(store: &mut StateStore, rng: &mut RngHandle, params: &UpdateParams) {
    let index = rng.uniform_index(store.len());
    let delta = energy::flip_delta(store, index);
    let flip = delta < 0.0 || rng.bernoulli(metropolis_acceptance(delta, params.temperature));
    if flip {
        let spins = store.spins_mut();
        spins[index] = spins[index].flipped();
    }
}

fn glauber(store: &mut StateStore, rng: &mut RngHandle, params: &UpdateParams) {
    let index = rng.uniform_index(store.len());
    let snapshot = spin_vector(store.spins());
    let field = store.local_field(index, &snapshot);
    let up = rng.bernoulli(glauber_probability(field, params.temperature));
    store.spins_mut()[index] = if up { Spin::Up } else { Spin::Down };
}

fn sca(
    store: &mut StateStore,
    rng: &mut RngHandle,
    params: &UpdateParams,
) -> Result<(), IsingError> {
    let noise: Vec<f64> = (0..store.len()).map(|_| rng.logistic()).collect();
    let UpdateParams {
        temperature,
        pinning,
        ..
    } = *params;
    synchronous(store, |index, field, spin| {
        field + pinning * spin.value() - temperature * noise[index]
    })
}

fn flip_constrained_sca(
    store: &mut StateStore,
    rng: &mut RngHandle,
    params: &UpdateParams,
) -> Result<(), IsingError> {
    let draws: Vec<(bool, f64)> = (0..store.len())
        .map(|_| {
            let eligible = rng.bernoulli(params.flip_trial_rate);
            (eligible, rng.logistic())
        })
        .collect();
    let UpdateParams {
        temperature,
        pinning,
        ..
    } = *params;
    synchronous(store, |index, field, spin| {
        let (eligible, noise) = draws[index];
        if eligible {
            field + pinning * spin.value() - temperature * noise
        } else {
            // Limit of an infinite bias towards the current sign.
            spin.value()
        }
    })
}

fn momentum_annealing(
    store: &mut StateStore,
    rng: &mut RngHandle,
    params: &UpdateParams,
) -> Result<(), IsingError> {
    let noise: Vec<f64> = (0..store.len()).map(|_| rng.exponential()).collect();
    let previous: Vec<f64> = store.previous_spins().iter().map(|s| s.value()).collect();
    let UpdateParams {
        temperature,
        pinning,
        ..
    } = *params;
    synchronous(store, |index, field, spin| {
        field + pinning * spin.value() - temperature * previous[index] * noise[index]
    })
}

fn modified_momentum_annealing(
    store: &mut StateStore,
    rng: &mut RngHandle,
    params: &UpdateParams,
) -> Result<(), IsingError> {
    let noise: Vec<f64> = (0..store.len()).map(|_| rng.exponential()).collect();
    let UpdateParams {
        temperature,
        pinning,
        ..
    } = *params;
    synchronous(store, |index, field, spin| {
        field + pinning * spin.value() - temperature * spin.value() * noise[index]
    })
}

/// Evaluates `sign(argument(i, h_i, s_i))` for every node against the
/// pre-update snapshot, then commits the new vector.
fn synchronous<F>(store: &mut StateStore, argument: F) -> Result<(), IsingError>
where
    F: Fn(usize, f64, Spin) -> f64 + Sync + Send,
{
    let snapshot = spin_vector(store.spins());
    let next: Result<Vec<Spin>, usize> = {
        let view: &StateStore = store;
        let current = view.spins();
        (0..view.len())
            .into_par_iter()
            .map(|index| {
                let field = view.local_field(index, &snapshot);
                Spin::from_sign(argument(index, field, current[index])).ok_or(index)
            })
            .collect()
    };
    match next {
        Ok(next) => {
            store.commit(next);
            Ok(())
        }
        Err(index) => Err(degenerate(store, index)),
    }
}

fn degenerate(store: &StateStore, index: usize) -> IsingError {
    let label = store
        .label_of(index)
        .map(|label| label.to_string())
        .unwrap_or_default();
    IsingError::NumericDegeneracy(
        ErrorInfo::new("sign-of-nan", "synchronous update argument has no sign")
            .with_context("node", label)
            .with_hint("an infinite temperature met a zero noise draw; use a finite temperature"),
    )
}
