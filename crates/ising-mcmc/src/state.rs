use std::collections::{BTreeMap, BTreeSet, HashMap};

use ising_core::{ErrorInfo, IsingError, NodeLabel, Spin};
use nalgebra::{DMatrix, DVector};

/// Dense storage for spins, fields and couplings of one model.
///
/// The label table, field vector and coupling matrix are fixed at
/// construction. Only the spin vectors change afterwards.
#[derive(Debug, Clone)]
pub struct StateStore {
    labels: Vec<NodeLabel>,
    indices: HashMap<NodeLabel, usize>,
    field: DVector<f64>,
    coupling: DMatrix<f64>,
    spins: Vec<Spin>,
    previous: Vec<Spin>,
}

impl StateStore {
    /// Builds the store from linear (field) and quadratic (coupling) terms.
    ///
    /// The node universe is the union of every label in either map, indexed
    /// in label order. Self pairs contribute their label but no coupling.
    /// Both orderings of a pair may be supplied only with equal values.
    pub fn new(
        linear: &BTreeMap<NodeLabel, f64>,
        quadratic: &BTreeMap<(NodeLabel, NodeLabel), f64>,
    ) -> Result<Self, IsingError> {
        let mut universe: BTreeSet<&NodeLabel> = linear.keys().collect();
        for (u, v) in quadratic.keys() {
            universe.insert(u);
            universe.insert(v);
        }
        let labels: Vec<NodeLabel> = universe.into_iter().cloned().collect();
        let indices: HashMap<NodeLabel, usize> = labels
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), index))
            .collect();
        let n = labels.len();

        let mut field = DVector::<f64>::zeros(n);
        for (label, &bias) in linear {
            if !bias.is_finite() {
                return Err(non_finite("linear", label.to_string(), bias));
            }
            field[indices[label]] = bias;
        }

        let mut coupling = DMatrix::<f64>::zeros(n, n);
        for ((u, v), &weight) in quadratic {
            if u == v {
                continue;
            }
            if !weight.is_finite() {
                return Err(non_finite("quadratic", format!("({u}, {v})"), weight));
            }
            if let Some(&mirrored) = quadratic.get(&(v.clone(), u.clone())) {
                if mirrored != weight {
                    return Err(IsingError::InvalidInput(
                        ErrorInfo::new(
                            "conflicting-coupling",
                            "both orderings of a pair carry different couplings",
                        )
                        .with_context("pair", format!("({u}, {v})"))
                        .with_context("forward", weight.to_string())
                        .with_context("reverse", mirrored.to_string())
                        .with_hint("supply each unordered pair once"),
                    ));
                }
            }
            let (i, j) = (indices[u], indices[v]);
            coupling[(i, j)] = weight;
            coupling[(j, i)] = weight;
        }

        Ok(Self {
            labels,
            indices,
            field,
            coupling,
            spins: vec![Spin::Up; n],
            previous: vec![Spin::Up; n],
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when the model has no nodes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in dense index order.
    pub fn labels(&self) -> &[NodeLabel] {
        &self.labels
    }

    /// Dense index of `label`, if it belongs to the model.
    pub fn index_of(&self, label: &NodeLabel) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Label stored at `index`.
    pub fn label_of(&self, index: usize) -> Option<&NodeLabel> {
        self.labels.get(index)
    }

    /// External field vector.
    pub fn field(&self) -> &DVector<f64> {
        &self.field
    }

    /// Symmetric coupling matrix with zero diagonal.
    pub fn coupling(&self) -> &DMatrix<f64> {
        &self.coupling
    }

    /// Current spins.
    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    /// Spins before the most recent synchronous update.
    pub fn previous_spins(&self) -> &[Spin] {
        &self.previous
    }

    pub(crate) fn spins_mut(&mut self) -> &mut [Spin] {
        &mut self.spins
    }

    /// Replaces the spin vector and keeps the outgoing one as the previous spins.
    pub(crate) fn commit(&mut self, next: Vec<Spin>) {
        debug_assert_eq!(next.len(), self.spins.len());
        self.previous = std::mem::replace(&mut self.spins, next);
    }

    /// Copies the current spins into the previous-spin snapshot.
    pub(crate) fn resync_previous(&mut self) {
        self.previous.copy_from_slice(&self.spins);
    }

    /// Local field `h_i = field_i + (C s)_i` at one node.
    ///
    /// The coupling matrix is symmetric, so column `i` is used in place of
    /// row `i` to stay on contiguous storage.
    pub fn local_field(&self, index: usize, spins: &DVector<f64>) -> f64 {
        self.field[index] + self.coupling.column(index).dot(spins)
    }

    /// Local fields at every node for the given configuration.
    pub fn local_fields(&self, spins: &DVector<f64>) -> DVector<f64> {
        &self.coupling * spins + &self.field
    }
}

/// Converts a spin slice into a dense `±1.0` vector.
pub fn spin_vector(spins: &[Spin]) -> DVector<f64> {
    DVector::from_iterator(spins.len(), spins.iter().map(|spin| spin.value()))
}

fn non_finite(term: &str, key: String, value: f64) -> IsingError {
    IsingError::InvalidInput(
        ErrorInfo::new("non-finite-coefficient", "coefficients must be finite")
            .with_context("term", term)
            .with_context("key", key)
            .with_context("value", value.to_string()),
    )
}
