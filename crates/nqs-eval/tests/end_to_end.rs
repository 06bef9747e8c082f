use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use nqs_core::{
    NqsError, Observable, RngHandle, SampleBatch, SampleOptions, Wavefunction,
};
use nqs_eval::{
    CallbackSet, Metric, MetricEvaluator, MetricFn, MetricParams, MetricValue,
    ObservableEvaluator,
};
use nqs_obs::{SigmaZ, TfimChainEnergy};

/// Deterministic stand-in for a trained model: successive sampling calls
/// alternate between the all-up and all-down configuration.
struct ScriptedModel {
    num_visible: usize,
    sample_calls: AtomicUsize,
}

impl ScriptedModel {
    fn new(num_visible: usize) -> Self {
        Self {
            num_visible,
            sample_calls: AtomicUsize::new(0),
        }
    }
}

impl Wavefunction for ScriptedModel {
    fn num_visible(&self) -> usize {
        self.num_visible
    }

    fn amplitude(&self, _state: &[u8]) -> Result<f64, NqsError> {
        Ok(1.0)
    }

    fn sample(
        &self,
        _rng: &mut RngHandle,
        options: &SampleOptions,
    ) -> Result<SampleBatch, NqsError> {
        let call = self.sample_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let spin = if call % 2 == 1 { 0u8 } else { 1u8 };
        let mut batch = SampleBatch::new(self.num_visible);
        for _ in 0..options.num_samples {
            batch.push_row(&vec![spin; self.num_visible])?;
        }
        Ok(batch)
    }
}

#[test]
fn thousand_epoch_training_run() {
    let model = ScriptedModel::new(2);
    let observables: Vec<Box<dyn Observable>> = vec![
        Box::new(SigmaZ::new(false)),
        Box::new(TfimChainEnergy::new(1.0)),
    ];
    let mut observable_eval =
        ObservableEvaluator::new(100, observables, SampleOptions::new(32), 11, false).unwrap();

    let mut metrics: IndexMap<String, Box<dyn Metric>> = IndexMap::new();
    metrics.insert(
        "Amplitude00".to_string(),
        Box::new(MetricFn::new(
            |model: &dyn Wavefunction, _params: &MetricParams| -> Result<MetricValue, NqsError> {
                Ok(MetricValue::Scalar(model.amplitude(&[0, 0])?))
            },
        )),
    );
    let mut metric_eval = MetricEvaluator::new(250, metrics, MetricParams::new(), false).unwrap();

    {
        let mut callbacks = CallbackSet::new();
        callbacks.push(&mut observable_eval);
        callbacks.push(&mut metric_eval);
        assert_eq!(callbacks.len(), 2);
        for epoch in 1..=1000 {
            callbacks.notify(epoch, &model).unwrap();
        }
    }

    // Ten observable records at epochs 100, 200, ..., 1000.
    assert_eq!(observable_eval.history().len(), 10);
    let expected_epochs: Vec<usize> = (1..=10).map(|index| index * 100).collect();
    assert_eq!(observable_eval.history().epochs(), expected_epochs.as_slice());
    assert_eq!(model.sample_calls.load(Ordering::SeqCst), 10);

    // Magnetization alternates with the scripted sampling sequence.
    let magnetization = observable_eval.series("SigmaZ").unwrap();
    let expected_means: Vec<f64> = (1..=10)
        .map(|call| if call % 2 == 1 { 1.0 } else { -1.0 })
        .collect();
    assert_eq!(magnetization.means(), expected_means);
    assert!(magnetization.variances().iter().all(|&var| var == 0.0));

    // Named accessors and string-keyed components answer identically.
    let energy = observable_eval.series("TfimChainEnergy").unwrap();
    assert_eq!(energy.means(), energy.component("mean").unwrap());
    assert_eq!(energy.variances(), energy.component("variance").unwrap());
    assert_eq!(energy.std_errors(), energy.component("std_error").unwrap());
    for mean in energy.means() {
        assert!((mean + 1.5).abs() < 1e-12);
    }

    // The metric evaluator ran on its own, coarser grid.
    assert_eq!(metric_eval.history().epochs(), &[250, 500, 750, 1000]);
    for value in metric_eval.series("Amplitude00").unwrap() {
        assert_eq!(value.as_scalar(), Some(1.0));
    }
}
