//! Spin-configuration batches and Hilbert-space enumeration.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NqsError};

/// Largest system size for which the full visible space may be enumerated.
///
/// `2^24` rows of 24 bytes already occupy ~400 MB; anything beyond that is
/// a caller mistake rather than a workable request.
pub const MAX_ENUMERABLE_VISIBLE: usize = 24;

/// Batch of spin configurations, stored row-major as 0/1 occupation bytes.
///
/// Every row has exactly `num_visible` entries. Batches are produced by
/// [`crate::Wavefunction::sample`] and by [`hilbert_space`], and consumed
/// by observables computing per-sample local estimators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleBatch {
    num_visible: usize,
    data: Vec<u8>,
}

impl SampleBatch {
    /// Creates an empty batch for systems with `num_visible` spins.
    pub fn new(num_visible: usize) -> Self {
        Self {
            num_visible,
            data: Vec::new(),
        }
    }

    /// Builds a batch from explicit rows, validating width and values.
    pub fn from_rows(num_visible: usize, rows: &[Vec<u8>]) -> Result<Self, NqsError> {
        let mut batch = Self::new(num_visible);
        for row in rows {
            batch.push_row(row)?;
        }
        Ok(batch)
    }

    /// Appends one configuration to the batch.
    pub fn push_row(&mut self, row: &[u8]) -> Result<(), NqsError> {
        if row.len() != self.num_visible {
            return Err(NqsError::Config(
                ErrorInfo::new("batch-row-width", "configuration width mismatch")
                    .with_context("expected", self.num_visible.to_string())
                    .with_context("actual", row.len().to_string()),
            ));
        }
        if let Some(&value) = row.iter().find(|&&value| value > 1) {
            return Err(NqsError::Config(
                ErrorInfo::new("batch-row-values", "configurations must be 0/1 valued")
                    .with_context("value", value.to_string()),
            ));
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Number of configurations in the batch.
    pub fn len(&self) -> usize {
        if self.num_visible == 0 {
            0
        } else {
            self.data.len() / self.num_visible
        }
    }

    /// Returns true when the batch holds no configurations.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of spins per configuration.
    pub fn num_visible(&self) -> usize {
        self.num_visible
    }

    /// Returns the configuration at `index`, if present.
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len() {
            return None;
        }
        let start = index * self.num_visible;
        Some(&self.data[start..start + self.num_visible])
    }

    /// Iterates over all configurations in insertion order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.data.chunks_exact(self.num_visible.max(1))
    }
}

/// Enumerates the full visible space of an `num_visible`-spin system.
///
/// Configurations are emitted in lexicographic order, the leftmost spin
/// being the most significant bit. Used for exact normalization sums and
/// the fidelity/KL metrics, which only make sense for small systems.
pub fn hilbert_space(num_visible: usize) -> Result<SampleBatch, NqsError> {
    if num_visible == 0 || num_visible > MAX_ENUMERABLE_VISIBLE {
        return Err(NqsError::Config(
            ErrorInfo::new("space-size", "visible space is not enumerable")
                .with_context("num_visible", num_visible.to_string())
                .with_hint(format!(
                    "num_visible must lie in 1..={MAX_ENUMERABLE_VISIBLE}"
                )),
        ));
    }
    let mut batch = SampleBatch::new(num_visible);
    let mut row = vec![0u8; num_visible];
    for index in 0..(1usize << num_visible) {
        for (bit, entry) in row.iter_mut().enumerate() {
            *entry = ((index >> (num_visible - 1 - bit)) & 1) as u8;
        }
        batch.push_row(&row)?;
    }
    Ok(batch)
}
