//! Structured error types shared across NQS crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`NqsError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (names, counts, etc.).
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

/// Canonical error type for the NQS evaluation framework.
///
/// Evaluators never catch or re-wrap collaborator failures: a `Model`,
/// `Sampling` or `Estimator` error raised during a triggered evaluation
/// propagates to the training loop unchanged and leaves the evaluator's
/// history untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NqsError {
    /// Invalid evaluator or sampling configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Access to a metric or observable name that was never configured.
    #[error("field error: {0}")]
    Field(ErrorInfo),
    /// Wavefunction model failures (amplitudes, normalization).
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Monte Carlo sampling failures.
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Local estimator computation failures.
    #[error("estimator error: {0}")]
    Estimator(ErrorInfo),
    /// Serialization and export errors.
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

impl NqsError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NqsError::Config(info)
            | NqsError::Field(info)
            | NqsError::Model(info)
            | NqsError::Sampling(info)
            | NqsError::Estimator(info)
            | NqsError::Serde(info) => info,
        }
    }
}
