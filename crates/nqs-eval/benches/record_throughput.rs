use criterion::{criterion_group, criterion_main, Criterion};
use nqs_core::{
    NqsError, Observable, RngHandle, SampleBatch, SampleOptions, Wavefunction,
};
use nqs_eval::{EpochCallback, ObservableEvaluator};
use nqs_obs::{NeighbourInteraction, SigmaZ};

struct ConstantModel {
    num_visible: usize,
}

impl Wavefunction for ConstantModel {
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
        let mut batch = SampleBatch::new(self.num_visible);
        for index in 0..options.num_samples {
            let spin = (index % 2) as u8;
            batch.push_row(&vec![spin; self.num_visible])?;
        }
        Ok(batch)
    }
}

fn bench_epoch_sweep(c: &mut Criterion) {
    let model = ConstantModel { num_visible: 8 };

    c.bench_function("observable_epoch_sweep", |b| {
        b.iter(|| {
            let observables: Vec<Box<dyn Observable>> = vec![
                Box::new(SigmaZ::new(false)),
                Box::new(NeighbourInteraction::nearest(false)),
            ];
            let mut evaluator =
                ObservableEvaluator::new(10, observables, SampleOptions::new(128), 5, false)
                    .unwrap();
            for epoch in 1..=200 {
                evaluator.on_epoch_end(epoch, &model).unwrap();
            }
            evaluator.history().len()
        })
    });
}

criterion_group!(benches, bench_epoch_sweep);
criterion_main!(benches);
