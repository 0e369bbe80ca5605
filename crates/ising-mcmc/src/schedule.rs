use serde::{Deserialize, Serialize};

/// Temperature schedule applied by the annealing driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CoolingSchedule {
    /// `T0 / (1 + a·ln(1 + k))` (Aarts & Korst).
    Logarithmic {
        /// Decay coefficient.
        #[serde(default = "default_logarithmic_a")]
        a: f64,
    },
    /// `T0 · ratio^k` (Kirkpatrick, Gelatt & Vecchi).
    Geometric {
        /// Multiplicative factor between consecutive steps.
        #[serde(default = "default_ratio")]
        ratio: f64,
    },
    /// `T0 / (1 + a·k²)`.
    Quadratic {
        /// Decay coefficient.
        #[serde(default = "default_quadratic_a")]
        a: f64,
    },
    /// `T0 / (1 + a·k)`.
    LinearInverse {
        /// Decay coefficient.
        #[serde(default = "default_linear_a")]
        a: f64,
    },
    /// `T0` at every step.
    Constant,
}

fn default_logarithmic_a() -> f64 {
    2.0
}

fn default_ratio() -> f64 {
    0.95
}

fn default_quadratic_a() -> f64 {
    0.0675
}

fn default_linear_a() -> f64 {
    9.45
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Logarithmic {
            a: default_logarithmic_a(),
        }
    }
}

impl CoolingSchedule {
    /// Temperature at `step` starting from `initial`.
    ///
    /// Coefficients are clamped so the sequence never increases, and the
    /// result is never negative.
    pub fn temperature(&self, initial: f64, step: usize) -> f64 {
        let initial = initial.max(0.0);
        let k = step as f64;
        let value = match self {
            CoolingSchedule::Logarithmic { a } => initial / (1.0 + a.max(0.0) * k.ln_1p()),
            CoolingSchedule::Geometric { ratio } => initial * ratio.clamp(0.0, 1.0).powf(k),
            CoolingSchedule::Quadratic { a } => initial / (1.0 + a.max(0.0) * k * k),
            CoolingSchedule::LinearInverse { a } => initial / (1.0 + a.max(0.0) * k),
            CoolingSchedule::Constant => initial,
        };
        value.max(0.0)
    }
}

/// Builds the temperature sequence for `steps` steps.
pub fn build_ladder(schedule: &CoolingSchedule, initial: f64, steps: usize) -> Vec<f64> {
    (0..steps)
        .map(|step| schedule.temperature(initial, step))
        .collect()
}

/// Pinning parameter schedule for the synchronous rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PinningSchedule {
    /// Constant value.
    Fixed {
        /// Pinning parameter.
        #[serde(default)]
        value: f64,
    },
    /// Half the largest eigenvalue of the negated coupling matrix.
    Spectral,
    /// `min(ln(1 + 1/T)^8, ¼·ln N)`, recomputed every step.
    TemperatureCoupled,
}

impl Default for PinningSchedule {
    fn default() -> Self {
        PinningSchedule::Fixed { value: 0.0 }
    }
}

impl PinningSchedule {
    /// Whether the schedule needs the spectral bound of the couplings.
    pub fn needs_spectral_bound(&self) -> bool {
        matches!(self, PinningSchedule::Spectral)
    }

    /// Pinning parameter for the given temperature and model size.
    ///
    /// `spectral_bound` is only read by [`PinningSchedule::Spectral`]; a
    /// missing bound yields `0`.
    pub fn pinning(&self, temperature: f64, node_count: usize, spectral_bound: Option<f64>) -> f64 {
        match self {
            PinningSchedule::Fixed { value } => value.max(0.0),
            PinningSchedule::Spectral => spectral_bound
                .map(crate::spectral::pinning_from_spectral_bound)
                .unwrap_or(0.0),
            PinningSchedule::TemperatureCoupled => {
                let cap = (0.25 * (node_count as f64).ln()).max(0.0);
                if temperature <= 0.0 {
                    return cap;
                }
                (1.0 / temperature).ln_1p().powi(8).min(cap)
            }
        }
    }
}
