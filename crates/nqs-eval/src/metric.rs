//! Named metric functions evaluated against the model at a fixed cadence.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use nqs_core::{NqsError, Wavefunction};
use serde::{Deserialize, Serialize};

use crate::callback::{Cadence, EpochCallback};
use crate::history::EvaluationHistory;
use crate::record::{format_epoch_line, MetricValue};

/// Immutable bag of named numeric knobs forwarded to every metric call.
///
/// Captured once at evaluator construction; structured context (target
/// amplitudes, state spaces) is captured by the metric objects themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricParams(BTreeMap<String, f64>);

impl MetricParams {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named knob.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Looks up a knob by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }
}

/// Capability implemented by anything evaluable as a named metric.
///
/// Plain functions and closures participate through the [`MetricFn`]
/// adapter.
pub trait Metric: Send + Sync {
    /// Evaluates the metric against the current model snapshot.
    fn evaluate(
        &self,
        model: &dyn Wavefunction,
        params: &MetricParams,
    ) -> Result<MetricValue, NqsError>;
}

/// Adapter turning a plain function or closure into a [`Metric`].
pub struct MetricFn<F>(F);

impl<F> MetricFn<F>
where
    F: Fn(&dyn Wavefunction, &MetricParams) -> Result<MetricValue, NqsError> + Send + Sync,
{
    /// Wraps the function for registration in a metric table.
    pub fn new(function: F) -> Self {
        Self(function)
    }
}

impl<F> Metric for MetricFn<F>
where
    F: Fn(&dyn Wavefunction, &MetricParams) -> Result<MetricValue, NqsError> + Send + Sync,
{
    fn evaluate(
        &self,
        model: &dyn Wavefunction,
        params: &MetricParams,
    ) -> Result<MetricValue, NqsError> {
        (self.0)(model, params)
    }
}

/// Cadence-gated evaluator for a table of named metric functions.
///
/// On every `period`-th epoch each registered function is applied to the
/// model and its return captured verbatim; one record per trigger lands in
/// the history. A failing function aborts the whole epoch's evaluation,
/// the error propagates to the caller, and nothing is recorded.
pub struct MetricEvaluator {
    cadence: Cadence,
    metrics: IndexMap<String, Box<dyn Metric>>,
    params: MetricParams,
    verbose: bool,
    history: EvaluationHistory<MetricValue>,
}

impl std::fmt::Debug for MetricEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricEvaluator")
            .field("period", &self.cadence.period())
            .field("metrics", &self.metrics.keys().collect::<Vec<_>>())
            .field("records", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl MetricEvaluator {
    /// Creates an evaluator firing every `period` epochs.
    pub fn new(
        period: usize,
        metrics: IndexMap<String, Box<dyn Metric>>,
        params: MetricParams,
        verbose: bool,
    ) -> Result<Self, NqsError> {
        let cadence = Cadence::new(period)?;
        let history = EvaluationHistory::new(metrics.keys().cloned());
        Ok(Self {
            cadence,
            metrics,
            params,
            verbose,
            history,
        })
    }

    /// The recorded history.
    pub fn history(&self) -> &EvaluationHistory<MetricValue> {
        &self.history
    }

    /// Time-ordered values recorded under `name`.
    pub fn series(&self, name: &str) -> Result<&[MetricValue], NqsError> {
        self.history.series(name)
    }

    /// The cadence gate.
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }
}

impl EpochCallback for MetricEvaluator {
    fn on_epoch_end(&mut self, epoch: usize, model: &dyn Wavefunction) -> Result<(), NqsError> {
        if !self.cadence.triggers(epoch) {
            return Ok(());
        }
        let mut record = IndexMap::with_capacity(self.metrics.len());
        for (name, metric) in &self.metrics {
            record.insert(name.clone(), metric.evaluate(model, &self.params)?);
        }
        let line = self.verbose.then(|| format_epoch_line(epoch, &record));
        self.history.append(epoch, record)?;
        if let Some(line) = line {
            println!("{line}");
        }
        Ok(())
    }
}
