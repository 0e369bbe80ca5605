use std::collections::BTreeMap;

use ising_core::{IsingError, NodeLabel};
use ising_mcmc::{Algorithm, IsingModel};
use proptest::prelude::*;

fn label(value: i64) -> NodeLabel {
    NodeLabel::from(value)
}

fn pair(u: i64, v: i64, weight: f64) -> ((NodeLabel, NodeLabel), f64) {
    ((label(u), label(v)), weight)
}

#[test]
fn conflicting_mirrored_couplings_are_rejected() {
    let quadratic: BTreeMap<_, _> = [pair(0, 1, -1.0), pair(1, 0, 2.0)].into_iter().collect();
    let err = IsingModel::new(&BTreeMap::new(), &quadratic).unwrap_err();
    match err {
        IsingError::InvalidInput(info) => assert_eq!(info.code, "conflicting-coupling"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn equal_mirrored_couplings_are_accepted() {
    let quadratic: BTreeMap<_, _> = [pair(0, 1, -0.5), pair(1, 0, -0.5)].into_iter().collect();
    let model = IsingModel::new(&BTreeMap::new(), &quadratic).unwrap();
    assert_eq!(model.coupling(&label(0), &label(1)).unwrap(), -0.5);
    assert_eq!(model.coupling(&label(1), &label(0)).unwrap(), -0.5);
}

#[test]
fn self_pairs_are_zeroed_but_keep_their_label() {
    let quadratic: BTreeMap<_, _> = [pair(3, 3, 4.0), pair(0, 1, 1.0)].into_iter().collect();
    let model = IsingModel::new(&BTreeMap::new(), &quadratic).unwrap();
    assert_eq!(model.len(), 3);
    assert_eq!(model.node_labels(), &[label(0), label(1), label(3)]);
    assert_eq!(model.coupling(&label(3), &label(3)).unwrap(), 0.0);
}

#[test]
fn self_pairs_are_ignored_even_when_non_finite() {
    let quadratic: BTreeMap<_, _> = [
        pair(2, 2, f64::NAN),
        pair(5, 5, f64::INFINITY),
        pair(0, 2, -1.0),
    ]
    .into_iter()
    .collect();
    let model = IsingModel::new(&BTreeMap::new(), &quadratic).unwrap();
    assert_eq!(model.node_labels(), &[label(0), label(2), label(5)]);
    assert_eq!(model.coupling(&label(2), &label(2)).unwrap(), 0.0);
    assert_eq!(model.coupling(&label(5), &label(5)).unwrap(), 0.0);
    assert_eq!(model.coupling(&label(0), &label(2)).unwrap(), -1.0);
}

#[test]
fn universe_is_union_of_linear_and_quadratic_labels() {
    let linear: BTreeMap<_, _> = [(NodeLabel::from("field-only"), 0.25)].into_iter().collect();
    let quadratic: BTreeMap<_, _> = [pair(0, 1, 1.0)].into_iter().collect();
    let model = IsingModel::new(&linear, &quadratic).unwrap();
    assert_eq!(
        model.node_labels(),
        &[label(0), label(1), NodeLabel::from("field-only")]
    );
    assert_eq!(
        model.external_field(&NodeLabel::from("field-only")).unwrap(),
        0.25
    );
    assert_eq!(model.external_field(&label(0)).unwrap(), 0.0);
}

#[test]
fn non_finite_coefficients_are_rejected() {
    let linear: BTreeMap<_, _> = [(label(0), f64::NAN)].into_iter().collect();
    let err = IsingModel::new(&linear, &BTreeMap::new()).unwrap_err();
    assert_eq!(err.info().code, "non-finite-coefficient");

    let quadratic: BTreeMap<_, _> = [pair(0, 1, f64::INFINITY)].into_iter().collect();
    let err = IsingModel::new(&BTreeMap::new(), &quadratic).unwrap_err();
    assert_eq!(err.info().code, "non-finite-coefficient");
}

#[test]
fn empty_model_updates_are_no_ops() {
    let mut model = IsingModel::new(&BTreeMap::new(), &BTreeMap::new()).unwrap();
    model.set_seed(Some(1));
    for algorithm in Algorithm::ALL {
        model.set_algorithm(algorithm);
        model.update().unwrap();
        assert_eq!(model.energy(), 0.0);
    }
    assert!(model.is_empty());
    assert_eq!(model.calc_largest_eigenvalue(), 0.0);
}

proptest! {
    #[test]
    fn couplings_are_symmetric_with_zero_diagonal(
        seed in any::<u64>(),
        weights in prop::collection::vec(-2.0f64..2.0, 15),
        fields in prop::collection::vec(-1.0f64..1.0, 6),
    ) {
        let linear: BTreeMap<_, _> = fields
            .iter()
            .enumerate()
            .map(|(index, &bias)| (label(index as i64), bias))
            .collect();
        let mut quadratic = BTreeMap::new();
        let mut slot = 0;
        for u in 0..6i64 {
            for v in (u + 1)..6 {
                quadratic.insert((label(u), label(v)), weights[slot]);
                slot += 1;
            }
        }

        let mut model = IsingModel::new(&linear, &quadratic).unwrap();
        let coupling = model.state().coupling();
        prop_assert_eq!(coupling.nrows(), 6);
        for i in 0..6 {
            prop_assert_eq!(coupling[(i, i)], 0.0);
            for j in 0..6 {
                prop_assert_eq!(coupling[(i, j)], coupling[(j, i)]);
            }
        }

        model.set_seed(Some(seed));
        model.set_temperature(0.7);
        model.set_pinning_parameter(0.3);
        for algorithm in Algorithm::ALL {
            model.set_algorithm(algorithm);
            for _ in 0..4 {
                model.update().unwrap();
                let values: Vec<i64> = model.spins().values().map(|&spin| i64::from(spin)).collect();
                prop_assert_eq!(values.len(), 6);
                prop_assert!(values.iter().all(|&value| value == -1 || value == 1));
                prop_assert!(model.energy().is_finite());
            }
        }
    }
}
