#![deny(missing_docs)]
#![doc = "Spin-chain observables estimated from Monte Carlo sample batches."]

mod interaction;
mod pauli;
mod tfim;

pub use interaction::NeighbourInteraction;
pub use pauli::{SigmaX, SigmaZ};
pub use tfim::TfimChainEnergy;

use nqs_core::{ErrorInfo, NqsError, Wavefunction};

/// Maps a 0/1 occupation value onto the +1/-1 eigenvalue of sigma-z.
pub(crate) fn to_pm1(spin: u8) -> f64 {
    1.0 - 2.0 * f64::from(spin)
}

/// Sums the amplitude ratios of all single-spin flips of `row`.
///
/// This is the shared kernel of the off-diagonal estimators: for each site
/// the spin is flipped in place, the amplitude ratio accumulated, and the
/// flip undone before moving on.
pub(crate) fn flip_ratio_sum(model: &dyn Wavefunction, row: &[u8]) -> Result<f64, NqsError> {
    let reference = model.amplitude(row)?;
    if reference == 0.0 {
        return Err(NqsError::Estimator(
            ErrorInfo::new("amplitude-zero", "reference amplitude vanishes")
                .with_hint("off-diagonal estimators need nonzero sample amplitudes"),
        ));
    }
    let mut flipped = row.to_vec();
    let mut total = 0.0;
    for site in 0..row.len() {
        flipped[site] ^= 1;
        total += model.amplitude(&flipped)? / reference;
        flipped[site] ^= 1;
    }
    Ok(total)
}

/// Returns the batch width as a float, rejecting zero-spin systems.
pub(crate) fn batch_width(num_visible: usize) -> Result<f64, NqsError> {
    if num_visible == 0 {
        return Err(NqsError::Estimator(ErrorInfo::new(
            "empty-system",
            "cannot estimate observables on a zero-spin system",
        )));
    }
    Ok(num_visible as f64)
}
