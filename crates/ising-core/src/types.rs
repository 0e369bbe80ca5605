use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, IsingError};

/// Caller supplied identifier of a node.
///
/// Labels are totally ordered with every integer label sorting before every
/// named label. Dense indices are assigned in this order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeLabel {
    /// Integer label.
    Int(i64),
    /// String label.
    Name(String),
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Int(value) => write!(f, "{value}"),
            NodeLabel::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<i64> for NodeLabel {
    fn from(value: i64) -> Self {
        NodeLabel::Int(value)
    }
}

impl From<i32> for NodeLabel {
    fn from(value: i32) -> Self {
        NodeLabel::Int(value as i64)
    }
}

impl From<usize> for NodeLabel {
    fn from(value: usize) -> Self {
        NodeLabel::Int(value as i64)
    }
}

impl From<&str> for NodeLabel {
    fn from(value: &str) -> Self {
        NodeLabel::Name(value.to_owned())
    }
}

impl From<String> for NodeLabel {
    fn from(value: String) -> Self {
        NodeLabel::Name(value)
    }
}

/// Binary state of a node. Serialized as the integers `-1` and `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Spin {
    /// `-1`.
    Down,
    /// `+1`.
    Up,
}

/// Spin assigned when a synchronous update rule evaluates `sign(0)`.
pub const SIGN_OF_ZERO: Spin = Spin::Up;

impl Spin {
    /// Returns the spin as `-1.0` or `+1.0`.
    pub fn value(self) -> f64 {
        match self {
            Spin::Down => -1.0,
            Spin::Up => 1.0,
        }
    }

    /// Returns the opposite spin.
    pub fn flipped(self) -> Self {
        match self {
            Spin::Down => Spin::Up,
            Spin::Up => Spin::Down,
        }
    }

    /// Sign of `x` with the zero tie-break pinned to [`SIGN_OF_ZERO`].
    ///
    /// Returns `None` for `NaN`, which has no sign.
    pub fn from_sign(x: f64) -> Option<Self> {
        if x > 0.0 {
            Some(Spin::Up)
        } else if x < 0.0 {
            Some(Spin::Down)
        } else if x == 0.0 {
            Some(SIGN_OF_ZERO)
        } else {
            None
        }
    }

    /// Accepts exactly `-1` and `+1`.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            -1 => Some(Spin::Down),
            1 => Some(Spin::Up),
            _ => None,
        }
    }
}

impl From<Spin> for i64 {
    fn from(spin: Spin) -> Self {
        match spin {
            Spin::Down => -1,
            Spin::Up => 1,
        }
    }
}

impl TryFrom<i64> for Spin {
    type Error = IsingError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Spin::from_raw(raw).ok_or_else(|| {
            IsingError::InvalidInput(
                ErrorInfo::new("spin-domain", "spin values must be -1 or +1")
                    .with_context("value", raw.to_string()),
            )
        })
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spin::Down => write!(f, "-1"),
            Spin::Up => write!(f, "+1"),
        }
    }
}

/// Initial configurations accepted by `give_spins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InitialConfiguration {
    /// Every spin `-1`.
    AllDown,
    /// Every spin `+1`.
    #[default]
    AllUp,
    /// Each spin independently `±1` with probability one half.
    Uniform,
}
