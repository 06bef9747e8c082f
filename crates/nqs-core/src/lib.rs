#![deny(missing_docs)]
#![doc = "Core traits and data types for the NQS training-time evaluation framework."]

pub mod errors;
pub mod rng;
pub mod sampling;
mod space;

pub use errors::{ErrorInfo, NqsError};
pub use rng::{derive_substream_seed, RngHandle};
pub use sampling::SampleOptions;
pub use space::{hilbert_space, SampleBatch, MAX_ENUMERABLE_VISIBLE};

/// Read-only handle onto the wavefunction model being trained.
///
/// The training loop owns and mutates the model; evaluators only inspect
/// it through this trait. How amplitudes are computed and how parameters
/// are represented is entirely the implementor's concern.
pub trait Wavefunction: Send + Sync {
    /// Number of visible spins in the system being learned.
    fn num_visible(&self) -> usize;

    /// Unnormalized amplitude of a single visible configuration.
    fn amplitude(&self, state: &[u8]) -> Result<f64, NqsError>;

    /// Unnormalized probability of a configuration.
    fn probability(&self, state: &[u8]) -> Result<f64, NqsError> {
        Ok(self.amplitude(state)?.powi(2))
    }

    /// Partition-function proxy: the sum of unnormalized probabilities
    /// over an enumerated state space.
    fn normalization(&self, space: &SampleBatch) -> Result<f64, NqsError> {
        let mut total = 0.0;
        for row in space.rows() {
            total += self.probability(row)?;
        }
        Ok(total)
    }

    /// Draws a batch of configurations from the model distribution.
    ///
    /// Implementations run `options.num_chains` Markov chains (0 means the
    /// sampler picks a chain count itself), discard `options.burn_in`
    /// Gibbs steps, then record a sample every `options.steps` sweeps
    /// until `options.num_samples` configurations are collected. The call
    /// blocks until the full batch is available.
    fn sample(&self, rng: &mut RngHandle, options: &SampleOptions) -> Result<SampleBatch, NqsError>;
}

/// A physical quantity whose expectation value is estimated from samples.
///
/// Implementations compute one local estimator value per configuration in
/// the batch; the evaluator reduces those to mean, variance and standard
/// error. The name doubles as the record key under which statistics are
/// stored, so it must be stable for the lifetime of the evaluator.
pub trait Observable: Send + Sync {
    /// Stable name identifying this observable in recorded histories.
    fn name(&self) -> String;

    /// Per-sample local estimator values for the given batch.
    fn local_estimators(
        &self,
        model: &dyn Wavefunction,
        batch: &SampleBatch,
    ) -> Result<Vec<f64>, NqsError>;
}
