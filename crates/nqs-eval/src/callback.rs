//! Epoch callbacks and the cadence gate shared by evaluators.

use nqs_core::{ErrorInfo, NqsError, Wavefunction};
use serde::{Deserialize, Serialize};

/// Cadence gate deciding which epochs trigger an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    period: usize,
}

impl Cadence {
    /// Creates a gate firing every `period` epochs; `period` must be positive.
    pub fn new(period: usize) -> Result<Self, NqsError> {
        if period == 0 {
            return Err(NqsError::Config(
                ErrorInfo::new("period", "period must be a positive integer")
                    .with_hint("use period = 1 to evaluate every epoch"),
            ));
        }
        Ok(Self { period })
    }

    /// The configured period in epochs.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Returns true when `epoch` lies on the cadence grid.
    ///
    /// Epochs are counted from 1 and must arrive in increasing order;
    /// out-of-order or repeated epochs are not detected.
    pub fn triggers(&self, epoch: usize) -> bool {
        epoch % self.period == 0
    }
}

/// Training-loop callback invoked once per completed epoch.
///
/// The loop calls [`EpochCallback::on_epoch_end`] with strictly increasing
/// epochs starting at 1 and blocks until the call returns; evaluators run
/// in-line and never spawn threads. Implementations inspect the model but
/// never mutate it.
pub trait EpochCallback {
    /// Reacts to the end of `epoch`; non-triggering epochs are no-ops.
    fn on_epoch_end(&mut self, epoch: usize, model: &dyn Wavefunction) -> Result<(), NqsError>;
}

/// Ordered list of callbacks borrowed from the training-loop owner.
///
/// The owner keeps the evaluators themselves (and reads their histories
/// after training); the set only borrows them for the duration of a run.
#[derive(Default)]
pub struct CallbackSet<'a> {
    callbacks: Vec<&'a mut dyn EpochCallback>,
}

impl std::fmt::Debug for CallbackSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSet")
            .field("len", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

impl<'a> CallbackSet<'a> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Registers a callback; notification follows registration order.
    pub fn push(&mut self, callback: &'a mut dyn EpochCallback) {
        self.callbacks.push(callback);
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns true when no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Notifies every callback of a completed epoch.
    ///
    /// Stops at the first error; the failing evaluator has appended
    /// nothing for this epoch and later callbacks are not invoked.
    pub fn notify(&mut self, epoch: usize, model: &dyn Wavefunction) -> Result<(), NqsError> {
        for callback in &mut self.callbacks {
            callback.on_epoch_end(epoch, model)?;
        }
        Ok(())
    }
}
