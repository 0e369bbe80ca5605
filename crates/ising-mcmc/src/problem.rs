use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ising_core::{ErrorInfo, IsingError, NodeLabel};
use serde::{Deserialize, Serialize};

use crate::model::IsingModel;

/// External field on one node, serialized as `[label, bias]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTerm(pub NodeLabel, pub f64);

/// Coupling between two nodes, serialized as `[u, v, bias]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticTerm(pub NodeLabel, pub NodeLabel, pub f64);

/// Problem definition read by the driver and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// External field terms.
    #[serde(default)]
    pub linear: Vec<LinearTerm>,
    /// Coupling terms.
    #[serde(default)]
    pub quadratic: Vec<QuadraticTerm>,
}

/// Linear and quadratic maps accepted by [`IsingModel::new`].
pub type ProblemMaps = (
    BTreeMap<NodeLabel, f64>,
    BTreeMap<(NodeLabel, NodeLabel), f64>,
);

impl Problem {
    /// Parses a problem from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, IsingError> {
        serde_json::from_str(text)
            .map_err(|err| IsingError::Serde(ErrorInfo::new("problem-parse", err.to_string())))
    }

    /// Reads a JSON problem file.
    pub fn load(path: &Path) -> Result<Self, IsingError> {
        let text = fs::read_to_string(path).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("problem-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_json_str(&text).map_err(|err| match err {
            IsingError::Serde(info) => {
                IsingError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Collects the terms into maps, rejecting repeated entries with different values.
    pub fn to_maps(&self) -> Result<ProblemMaps, IsingError> {
        let mut linear = BTreeMap::new();
        for LinearTerm(label, bias) in &self.linear {
            if let Some(previous) = linear.insert(label.clone(), *bias) {
                if previous != *bias {
                    return Err(IsingError::InvalidInput(
                        ErrorInfo::new("duplicate-linear-term", "node listed with two biases")
                            .with_context("label", label.to_string()),
                    ));
                }
            }
        }
        let mut quadratic = BTreeMap::new();
        for QuadraticTerm(u, v, bias) in &self.quadratic {
            if let Some(previous) = quadratic.insert((u.clone(), v.clone()), *bias) {
                if previous != *bias {
                    return Err(IsingError::InvalidInput(
                        ErrorInfo::new("duplicate-quadratic-term", "pair listed with two biases")
                            .with_context("pair", format!("({u}, {v})")),
                    ));
                }
            }
        }
        Ok((linear, quadratic))
    }

    /// Builds an unseeded model from the problem terms.
    pub fn build_model(&self) -> Result<IsingModel, IsingError> {
        let (linear, quadratic) = self.to_maps()?;
        IsingModel::new(&linear, &quadratic)
    }
}
