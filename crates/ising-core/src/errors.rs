//! Structured error types shared across the Ising crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`IsingError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (labels, values, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the Ising engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum IsingError {
    /// Unknown algorithm tag or invalid run configuration.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Construction inputs violating the coupling contract, or unknown labels.
    #[error("invalid input: {0}")]
    InvalidInput(ErrorInfo),
    /// A synchronous update produced an argument with no defined sign.
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(ErrorInfo),
    /// Serialization and I/O errors raised by drivers and manifests.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl IsingError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            IsingError::Configuration(info)
            | IsingError::InvalidInput(info)
            | IsingError::NumericDegeneracy(info)
            | IsingError::Serde(info) => info,
        }
    }

    /// Adds a context entry to the payload while keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            IsingError::Configuration(info) => {
                IsingError::Configuration(info.with_context(key, value))
            }
            IsingError::InvalidInput(info) => IsingError::InvalidInput(info.with_context(key, value)),
            IsingError::NumericDegeneracy(info) => {
                IsingError::NumericDegeneracy(info.with_context(key, value))
            }
            IsingError::Serde(info) => IsingError::Serde(info.with_context(key, value)),
        }
    }
}
