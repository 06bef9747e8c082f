//! Monte Carlo sampling parameters forwarded to wavefunction models.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NqsError};

/// Parameters governing one Monte Carlo sampling call.
///
/// The evaluator treats these as an opaque, immutable bag captured at
/// construction time and handed to [`crate::Wavefunction::sample`] on
/// every triggered epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleOptions {
    /// Number of configurations to draw.
    pub num_samples: usize,
    /// Number of parallel Markov chains; 0 lets the sampler decide.
    #[serde(default)]
    pub num_chains: usize,
    /// Initial Gibbs steps discarded before recording begins.
    #[serde(default = "default_burn_in")]
    pub burn_in: usize,
    /// Gibbs sweeps advanced between recorded samples.
    #[serde(default = "default_steps")]
    pub steps: usize,
}

fn default_num_samples() -> usize {
    1000
}

fn default_burn_in() -> usize {
    1000
}

fn default_steps() -> usize {
    1
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self::new(default_num_samples())
    }
}

impl SampleOptions {
    /// Creates options drawing `num_samples` with default chain settings.
    pub fn new(num_samples: usize) -> Self {
        Self {
            num_samples,
            num_chains: 0,
            burn_in: default_burn_in(),
            steps: default_steps(),
        }
    }

    /// Validates the options; `num_samples` must be positive.
    pub fn validate(&self) -> Result<(), NqsError> {
        if self.num_samples == 0 {
            return Err(NqsError::Config(
                ErrorInfo::new("sample-count", "num_samples must be a positive integer")
                    .with_hint("draw at least one sample per evaluation"),
            ));
        }
        Ok(())
    }
}
