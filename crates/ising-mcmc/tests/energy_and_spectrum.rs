use std::collections::BTreeMap;

use ising_core::{InitialConfiguration, NodeLabel};
use ising_mcmc::energy::{self, EnergyBreakdown};
use ising_mcmc::spectral::pinning_from_spectral_bound;
use ising_mcmc::{Algorithm, Family, IsingModel};

fn two_node_model() -> IsingModel {
    let quadratic: BTreeMap<_, _> = [((NodeLabel::from(0), NodeLabel::from(1)), -1.0)]
        .into_iter()
        .collect();
    IsingModel::new(&BTreeMap::new(), &quadratic).unwrap()
}

fn triangle_model() -> IsingModel {
    let linear: BTreeMap<_, _> = [
        (NodeLabel::from("a"), 0.5),
        (NodeLabel::from("b"), -0.25),
        (NodeLabel::from("c"), 1.0),
    ]
    .into_iter()
    .collect();
    let quadratic: BTreeMap<_, _> = [
        ((NodeLabel::from("a"), NodeLabel::from("b")), 1.0),
        ((NodeLabel::from("b"), NodeLabel::from("c")), -2.0),
        ((NodeLabel::from("a"), NodeLabel::from("c")), 0.5),
    ]
    .into_iter()
    .collect();
    IsingModel::new(&linear, &quadratic).unwrap()
}

#[test]
fn two_node_antiferromagnet_energy_is_one() {
    let model = two_node_model();
    assert_eq!(model.algorithm(), Algorithm::Metropolis);
    assert!((model.energy() - 1.0).abs() < 1e-12);
}

#[test]
fn flipping_one_node_of_the_pair_lowers_energy() {
    let mut model = two_node_model();
    let spins: BTreeMap<_, _> = [(NodeLabel::from(1), -1)].into_iter().collect();
    assert_eq!(model.set_spins(&spins), 1);
    assert!((model.energy() + 1.0).abs() < 1e-12);
}

#[test]
fn largest_eigenvalue_of_pair_is_one() {
    let model = two_node_model();
    assert!((model.calc_largest_eigenvalue() - 1.0).abs() < 1e-12);
    assert!((pinning_from_spectral_bound(1.0) - 0.5).abs() < 1e-12);
    assert_eq!(pinning_from_spectral_bound(-3.0), 0.0);
}

#[test]
fn bipartite_energy_matches_standard_when_previous_equals_current() {
    let mut model = triangle_model();
    model.set_seed(Some(11));
    model.give_spins(InitialConfiguration::Uniform);
    model.set_pinning_parameter(0.8);

    let store = model.state();
    assert_eq!(store.spins(), store.previous_spins());
    let breakdown = EnergyBreakdown::evaluate(store, model.pinning_parameter());
    assert!((breakdown.standard - breakdown.bipartite).abs() < 1e-12);

    model.set_algorithm(Algorithm::Sca);
    assert!((model.energy() - model.standard_energy()).abs() < 1e-12);
}

#[test]
fn energy_follows_the_active_family() {
    let mut model = triangle_model();
    model.set_seed(Some(5));
    model.set_algorithm(Algorithm::Sca);
    model.set_temperature(2.0);
    model.set_pinning_parameter(0.4);
    model.update().unwrap();

    let store = model.state();
    let breakdown = EnergyBreakdown::evaluate(store, model.pinning_parameter());
    assert_eq!(model.energy(), breakdown.for_family(Family::Synchronous));
    assert_eq!(model.standard_energy(), breakdown.for_family(Family::Sequential));
    assert_eq!(
        model.energy(),
        energy::hamiltonian(store, Family::Synchronous, model.pinning_parameter())
    );
}

#[test]
fn flip_delta_matches_energy_difference() {
    let model = triangle_model();
    let store = model.state();
    let before = energy::standard(store);
    for index in 0..store.len() {
        let mut flipped = store.spins().to_vec();
        flipped[index] = flipped[index].flipped();
        let after = energy::standard_of(store, &flipped);
        assert!((energy::flip_delta(store, index) - (after - before)).abs() < 1e-12);
    }
}

#[test]
fn local_field_includes_external_field() {
    let model = triangle_model();
    // All spins +1: h_a = 0.5 + 1.0 + 0.5.
    let field = model
        .calc_local_magnetic_field(&NodeLabel::from("a"))
        .unwrap();
    assert!((field - 2.0).abs() < 1e-12);
    let err = model
        .calc_local_magnetic_field(&NodeLabel::from("missing"))
        .unwrap_err();
    assert_eq!(err.info().code, "unknown-label");
}
