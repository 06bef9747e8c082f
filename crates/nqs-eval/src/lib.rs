#![deny(missing_docs)]
#![doc = "Cadence-gated training-time evaluation of metrics and observables."]

//! During an iterative wavefunction optimization, the training loop calls
//! every registered [`EpochCallback`] once per completed epoch. Evaluators
//! gate on their period, measure against the current model snapshot, and
//! append one named record per trigger to an exclusively-owned history
//! that can be read back field-by-field after (or during) training.

/// Epoch callbacks and the cadence gate.
pub mod callback;
/// Append-only evaluation histories.
pub mod history;
/// Named metric functions and their evaluator.
pub mod metric;
/// Sampling-based observable statistics evaluator.
pub mod observable;
/// Wavefunction overlap metrics.
pub mod overlap;
/// Recorded values and per-field statistics.
pub mod record;

pub use callback::{Cadence, CallbackSet, EpochCallback};
pub use history::EvaluationHistory;
pub use metric::{Metric, MetricEvaluator, MetricFn, MetricParams};
pub use observable::ObservableEvaluator;
pub use overlap::{Fidelity, KlDivergence};
pub use record::{MetricValue, ObservableStatistics, RecordEntry, StatisticsSeries};
