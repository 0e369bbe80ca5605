use std::collections::BTreeMap;

use ising_core::{InitialConfiguration, IsingError, NodeLabel, Spin};
use ising_mcmc::{Algorithm, IsingModel};

fn chain(n: i64) -> IsingModel {
    let linear: BTreeMap<_, _> = (0..n)
        .map(|i| (NodeLabel::from(i), if i % 2 == 0 { 0.2 } else { -0.3 }))
        .collect();
    let quadratic: BTreeMap<_, _> = (0..n - 1)
        .map(|i| {
            let weight = if i % 3 == 0 { -1.0 } else { 0.8 };
            ((NodeLabel::from(i), NodeLabel::from(i + 1)), weight)
        })
        .collect();
    IsingModel::new(&linear, &quadratic).unwrap()
}

#[test]
fn setters_clamp_instead_of_failing() {
    let mut model = chain(3);
    model.set_temperature(-1.0);
    assert_eq!(model.temperature(), 0.0);
    model.set_temperature(f64::NAN);
    assert_eq!(model.temperature(), 0.0);
    model.set_temperature(2.5);
    assert_eq!(model.temperature(), 2.5);

    model.set_pinning_parameter(-3.0);
    assert_eq!(model.pinning_parameter(), 0.0);
    model.set_pinning_parameter(f64::NAN);
    assert_eq!(model.pinning_parameter(), 0.0);

    model.set_flip_trial_rate(1.5);
    assert_eq!(model.flip_trial_rate(), 1.0);
    model.set_flip_trial_rate(-0.2);
    assert_eq!(model.flip_trial_rate(), 0.0);
    model.set_flip_trial_rate(f64::NAN);
    assert_eq!(model.flip_trial_rate(), 0.0);
}

#[test]
fn set_spins_ignores_unknown_labels_and_out_of_domain_values() {
    let mut model = chain(3);
    let updates: BTreeMap<_, _> = [
        (NodeLabel::from(0), -1),
        (NodeLabel::from(1), 0),
        (NodeLabel::from(2), 3),
        (NodeLabel::from("ghost"), -1),
    ]
    .into_iter()
    .collect();
    assert_eq!(model.set_spins(&updates), 1);

    let spins = model.spins();
    assert_eq!(spins[&NodeLabel::from(0)], Spin::Down);
    assert_eq!(spins[&NodeLabel::from(1)], Spin::Up);
    assert_eq!(spins[&NodeLabel::from(2)], Spin::Up);
    assert_eq!(model.previous_spins(), spins);
}

#[test]
fn give_spins_resets_both_vectors() {
    let mut model = chain(5);
    model.give_spins(InitialConfiguration::AllDown);
    assert!(model.spins().values().all(|&spin| spin == Spin::Down));
    assert_eq!(model.magnetization(), -1.0);

    model.set_seed(Some(4));
    model.set_algorithm(Algorithm::Sca);
    model.set_temperature(1.0);
    model.update().unwrap();
    model.give_spins(InitialConfiguration::AllUp);
    assert_eq!(model.magnetization(), 1.0);
    assert_eq!(model.state().spins(), model.state().previous_spins());
}

#[test]
fn algorithm_tags_round_trip_and_reject_unknown_values() {
    let mut model = chain(2);
    for algorithm in Algorithm::ALL {
        model.set_algorithm_tag(algorithm.tag()).unwrap();
        assert_eq!(model.algorithm(), algorithm);
        assert_eq!(algorithm.as_str().parse::<Algorithm>().unwrap(), algorithm);
    }
    let err = model.set_algorithm_tag(6).unwrap_err();
    match err {
        IsingError::Configuration(info) => assert_eq!(info.code, "unknown-algorithm-tag"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(model.algorithm(), Algorithm::ModifiedMomentumAnnealing);
    assert_eq!(
        "flip_constrained_sca".parse::<Algorithm>().unwrap(),
        Algorithm::FlipConstrainedSca
    );
    assert!("annealing".parse::<Algorithm>().is_err());
}

#[test]
fn switching_family_resynchronizes_previous_spins() {
    let mut model = chain(8);
    model.set_seed(Some(17));
    model.give_spins(InitialConfiguration::Uniform);
    model.set_algorithm(Algorithm::Sca);
    model.set_temperature(3.0);
    model.set_pinning_parameter(0.1);
    for _ in 0..5 {
        model.update().unwrap();
    }

    let kept = model.state().previous_spins().to_vec();
    model.set_algorithm(Algorithm::MomentumAnnealing);
    assert_eq!(model.state().previous_spins(), kept.as_slice());

    model.set_algorithm(Algorithm::Metropolis);
    assert_eq!(model.state().spins(), model.state().previous_spins());
}

#[test]
fn quench_reaches_a_single_flip_local_minimum() {
    let mut model = chain(12);
    model.set_seed(Some(99));
    model.give_spins(InitialConfiguration::Uniform);
    let before = model.standard_energy();

    model.quench();
    let after = model.standard_energy();
    assert!(after <= before);
    let spins = model.spins();
    for label in model.node_labels() {
        let field = model.calc_local_magnetic_field(label).unwrap();
        let delta = 2.0 * spins[label].value() * field;
        assert!(delta >= -1e-9, "flipping {label} would lower the energy");
    }
    assert_eq!(model.state().spins(), model.state().previous_spins());
    assert_eq!(model.quench(), 0);
}

#[test]
fn display_lists_state_and_parameters() {
    let mut model = chain(2);
    model.set_temperature(1.5);
    let text = model.to_string();
    assert!(text.contains("Current spin configuration:"));
    assert!(text.contains("(0, 1): -1"));
    assert!(text.contains("Algorithm: Metropolis method"));
    assert!(text.contains("Temperature: 1.5"));
}

#[test]
fn seeded_models_follow_identical_trajectories() {
    let mut a = chain(9);
    let mut b = chain(9);
    for model in [&mut a, &mut b] {
        model.set_seed(Some(2024));
        model.give_spins(InitialConfiguration::Uniform);
    }
    let schedule = [
        (Algorithm::Metropolis, 2.0, 0.0),
        (Algorithm::Glauber, 1.0, 0.0),
        (Algorithm::Sca, 0.8, 0.4),
        (Algorithm::FlipConstrainedSca, 0.5, 0.4),
        (Algorithm::MomentumAnnealing, 0.3, 0.6),
        (Algorithm::ModifiedMomentumAnnealing, 0.1, 0.8),
    ];
    for (algorithm, temperature, pinning) in schedule {
        for model in [&mut a, &mut b] {
            model.set_algorithm(algorithm);
            model.set_temperature(temperature);
            model.set_pinning_parameter(pinning);
        }
        for _ in 0..20 {
            a.update().unwrap();
            b.update().unwrap();
            assert_eq!(a.spins(), b.spins());
            assert_eq!(a.energy().to_bits(), b.energy().to_bits());
        }
    }
}
