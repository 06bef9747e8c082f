//! Single-site Pauli polarization observables.

use nqs_core::{NqsError, Observable, SampleBatch, Wavefunction};
use serde::{Deserialize, Serialize};

use crate::{batch_width, flip_ratio_sum, to_pm1};

/// Longitudinal polarization averaged over the chain.
///
/// Diagonal in the sampling basis: the estimator for a configuration is
/// the mean sigma-z eigenvalue over all sites, optionally folded to its
/// absolute value (the usual convention when the model may break the
/// spin-flip symmetry in either direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SigmaZ {
    /// Record the absolute value of the per-sample polarization.
    #[serde(default)]
    pub absolute: bool,
}

impl SigmaZ {
    /// Creates the observable; `absolute` folds the sign away.
    pub fn new(absolute: bool) -> Self {
        Self { absolute }
    }
}

impl Observable for SigmaZ {
    fn name(&self) -> String {
        "SigmaZ".to_string()
    }

    fn local_estimators(
        &self,
        _model: &dyn Wavefunction,
        batch: &SampleBatch,
    ) -> Result<Vec<f64>, NqsError> {
        let width = batch_width(batch.num_visible())?;
        Ok(batch
            .rows()
            .map(|row| {
                let total: f64 = row.iter().map(|&spin| to_pm1(spin)).sum();
                let value = total / width;
                if self.absolute {
                    value.abs()
                } else {
                    value
                }
            })
            .collect())
    }
}

/// Transverse polarization averaged over the chain.
///
/// Off-diagonal: the estimator sums amplitude ratios of single-spin flips,
/// so it consults the model for every site of every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SigmaX;

impl SigmaX {
    /// Creates the observable.
    pub fn new() -> Self {
        Self
    }
}

impl Observable for SigmaX {
    fn name(&self) -> String {
        "SigmaX".to_string()
    }

    fn local_estimators(
        &self,
        model: &dyn Wavefunction,
        batch: &SampleBatch,
    ) -> Result<Vec<f64>, NqsError> {
        let width = batch_width(batch.num_visible())?;
        let mut estimators = Vec::with_capacity(batch.len());
        for row in batch.rows() {
            estimators.push(flip_ratio_sum(model, row)? / width);
        }
        Ok(estimators)
    }
}
