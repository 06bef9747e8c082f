use indexmap::IndexMap;
use nqs_core::{
    hilbert_space, ErrorInfo, NqsError, RngHandle, SampleBatch, SampleOptions, Wavefunction,
};
use nqs_eval::{
    EpochCallback, Fidelity, KlDivergence, Metric, MetricEvaluator, MetricParams,
};

/// Model with explicitly tabulated amplitudes over the full visible space.
struct VectorModel {
    num_visible: usize,
    amplitudes: Vec<f64>,
}

impl VectorModel {
    fn index(&self, state: &[u8]) -> usize {
        state
            .iter()
            .fold(0usize, |acc, &spin| (acc << 1) | spin as usize)
    }
}

impl Wavefunction for VectorModel {
    fn num_visible(&self) -> usize {
        self.num_visible
    }

    fn amplitude(&self, state: &[u8]) -> Result<f64, NqsError> {
        Ok(self.amplitudes[self.index(state)])
    }

    fn sample(
        &self,
        _rng: &mut RngHandle,
        _options: &SampleOptions,
    ) -> Result<SampleBatch, NqsError> {
        Err(NqsError::Sampling(ErrorInfo::new(
            "not-sampled",
            "tabulated model does not sample",
        )))
    }
}

fn unwrap_scalar(metric: &dyn Metric, model: &dyn Wavefunction) -> f64 {
    metric
        .evaluate(model, &MetricParams::new())
        .unwrap()
        .as_scalar()
        .unwrap()
}

#[test]
fn fidelity_of_identical_states_is_one() {
    let space = hilbert_space(2).unwrap();
    let amplitudes = vec![0.5, 1.0, 2.0, 0.25];
    let model = VectorModel {
        num_visible: 2,
        amplitudes: amplitudes.clone(),
    };
    let fidelity = Fidelity::new(amplitudes, space).unwrap();
    assert!((unwrap_scalar(&fidelity, &model) - 1.0).abs() < 1e-12);
}

#[test]
fn fidelity_of_orthogonal_states_is_zero() {
    let space = hilbert_space(2).unwrap();
    let model = VectorModel {
        num_visible: 2,
        amplitudes: vec![0.0, 1.0, 0.0, 0.0],
    };
    let fidelity = Fidelity::new(vec![1.0, 0.0, 0.0, 0.0], space).unwrap();
    assert_eq!(unwrap_scalar(&fidelity, &model), 0.0);
}

#[test]
fn kl_divergence_vanishes_for_matching_distributions() {
    let space = hilbert_space(2).unwrap();
    let amplitudes = vec![0.5, 1.0, 2.0, 0.25];
    let model = VectorModel {
        num_visible: 2,
        amplitudes: amplitudes.clone(),
    };
    let target_probs: Vec<f64> = amplitudes.iter().map(|a| a * a).collect();
    let divergence = KlDivergence::new(target_probs, space).unwrap();
    assert!(unwrap_scalar(&divergence, &model).abs() < 1e-12);
}

#[test]
fn kl_divergence_diverges_off_support() {
    let space = hilbert_space(2).unwrap();
    let model = VectorModel {
        num_visible: 2,
        amplitudes: vec![0.0, 1.0, 0.0, 0.0],
    };
    let divergence = KlDivergence::new(vec![1.0, 0.0, 0.0, 0.0], space).unwrap();
    assert!(unwrap_scalar(&divergence, &model).is_infinite());
}

#[test]
fn target_length_mismatch_is_rejected() {
    let space = hilbert_space(2).unwrap();
    let err = Fidelity::new(vec![1.0, 0.0], space).unwrap_err();
    match err {
        NqsError::Config(info) => assert_eq!(info.code, "target-length"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn overlap_metrics_run_inside_an_evaluator() {
    let amplitudes = vec![0.5, 1.0, 2.0, 0.25];
    let model = VectorModel {
        num_visible: 2,
        amplitudes: amplitudes.clone(),
    };
    let target_probs: Vec<f64> = amplitudes.iter().map(|a| a * a).collect();

    let mut metrics: IndexMap<String, Box<dyn Metric>> = IndexMap::new();
    metrics.insert(
        "Fidelity".to_string(),
        Box::new(Fidelity::new(amplitudes, hilbert_space(2).unwrap()).unwrap()),
    );
    metrics.insert(
        "KL".to_string(),
        Box::new(KlDivergence::new(target_probs, hilbert_space(2).unwrap()).unwrap()),
    );
    let mut evaluator = MetricEvaluator::new(1, metrics, MetricParams::new(), false).unwrap();

    for epoch in 1..=3 {
        evaluator.on_epoch_end(epoch, &model).unwrap();
    }

    for value in evaluator.series("Fidelity").unwrap() {
        assert!((value.as_scalar().unwrap() - 1.0).abs() < 1e-12);
    }
    for value in evaluator.series("KL").unwrap() {
        assert!(value.as_scalar().unwrap().abs() < 1e-12);
    }
}
