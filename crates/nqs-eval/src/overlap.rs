//! Wavefunction overlap metrics: fidelity and KL divergence.
//!
//! Both metrics compare the model against a fixed target over an
//! enumerated state space, so they are exact (no sampling noise) and only
//! usable for small systems. They consume the model's public amplitude
//! and normalization surface and nothing else.

use nqs_core::{ErrorInfo, NqsError, SampleBatch, Wavefunction};

use crate::metric::{Metric, MetricParams};
use crate::record::MetricValue;

/// Squared overlap between the model and a fixed target wavefunction.
///
/// The target amplitude vector is aligned with the rows of the state
/// space. Neither side needs to be normalized; both norms are divided out
/// before the overlap is squared, so the value lies in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Fidelity {
    target: Vec<f64>,
    space: SampleBatch,
    target_norm: f64,
}

impl Fidelity {
    /// Creates the metric from target amplitudes over `space`.
    pub fn new(target: Vec<f64>, space: SampleBatch) -> Result<Self, NqsError> {
        if target.len() != space.len() {
            return Err(NqsError::Config(
                ErrorInfo::new("target-length", "target amplitudes do not cover the space")
                    .with_context("target", target.len().to_string())
                    .with_context("space", space.len().to_string()),
            ));
        }
        let target_norm: f64 = target.iter().map(|amplitude| amplitude * amplitude).sum();
        if target_norm <= 0.0 {
            return Err(NqsError::Config(ErrorInfo::new(
                "target-norm",
                "target wavefunction has zero norm",
            )));
        }
        Ok(Self {
            target,
            space,
            target_norm,
        })
    }
}

impl Metric for Fidelity {
    fn evaluate(
        &self,
        model: &dyn Wavefunction,
        _params: &MetricParams,
    ) -> Result<MetricValue, NqsError> {
        let normalization = positive_normalization(model, &self.space)?;
        let mut overlap = 0.0;
        for (row, &target) in self.space.rows().zip(&self.target) {
            overlap += target * model.amplitude(row)?;
        }
        Ok(MetricValue::Scalar(
            (overlap * overlap) / (normalization * self.target_norm),
        ))
    }
}

/// KL divergence of the model distribution from a fixed target.
///
/// Computed as `sum p_target * ln(p_target / p_model)` over the space
/// with both distributions normalized. Zero-probability target states
/// contribute nothing; a model assigning zero probability where the
/// target has support drives the divergence to infinity, which is
/// recorded as-is rather than raised.
#[derive(Debug, Clone)]
pub struct KlDivergence {
    target_probs: Vec<f64>,
    space: SampleBatch,
    target_total: f64,
}

impl KlDivergence {
    /// Creates the metric from unnormalized target probabilities.
    pub fn new(target_probs: Vec<f64>, space: SampleBatch) -> Result<Self, NqsError> {
        if target_probs.len() != space.len() {
            return Err(NqsError::Config(
                ErrorInfo::new("target-length", "target probabilities do not cover the space")
                    .with_context("target", target_probs.len().to_string())
                    .with_context("space", space.len().to_string()),
            ));
        }
        if target_probs.iter().any(|&probability| probability < 0.0) {
            return Err(NqsError::Config(ErrorInfo::new(
                "target-probs",
                "target probabilities must be non-negative",
            )));
        }
        let target_total: f64 = target_probs.iter().sum();
        if target_total <= 0.0 {
            return Err(NqsError::Config(ErrorInfo::new(
                "target-probs",
                "target probabilities must not all vanish",
            )));
        }
        Ok(Self {
            target_probs,
            space,
            target_total,
        })
    }
}

impl Metric for KlDivergence {
    fn evaluate(
        &self,
        model: &dyn Wavefunction,
        _params: &MetricParams,
    ) -> Result<MetricValue, NqsError> {
        let normalization = positive_normalization(model, &self.space)?;
        let mut divergence = 0.0;
        for (row, &target) in self.space.rows().zip(&self.target_probs) {
            let p_target = target / self.target_total;
            if p_target == 0.0 {
                continue;
            }
            let p_model = model.probability(row)? / normalization;
            divergence += p_target * (p_target / p_model).ln();
        }
        Ok(MetricValue::Scalar(divergence))
    }
}

fn positive_normalization(
    model: &dyn Wavefunction,
    space: &SampleBatch,
) -> Result<f64, NqsError> {
    let normalization = model.normalization(space)?;
    if normalization <= 0.0 {
        return Err(NqsError::Model(
            ErrorInfo::new("normalization", "partition proxy is not positive")
                .with_context("value", normalization.to_string()),
        ));
    }
    Ok(normalization)
}
