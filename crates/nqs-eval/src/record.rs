//! Recorded values and per-field statistics.

use indexmap::IndexMap;
use nqs_core::{ErrorInfo, NqsError};
use serde::{Deserialize, Serialize};

/// Formatting hooks shared by everything an evaluation history can store.
pub trait RecordEntry: Clone {
    /// Compact rendering used in verbose epoch lines.
    fn summary(&self) -> String;

    /// Column suffixes this entry type contributes to a CSV export.
    ///
    /// An empty suffix means the field name itself is the column header.
    fn csv_components() -> &'static [&'static str];

    /// CSV cell values, aligned with [`RecordEntry::csv_components`].
    fn csv_values(&self) -> Vec<String>;
}

/// Value captured for one metric at one triggered epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum MetricValue {
    /// A single scalar.
    Scalar(f64),
    /// An array of scalars, captured verbatim from the metric function.
    Array(Vec<f64>),
}

impl MetricValue {
    /// Returns the scalar payload, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricValue::Scalar(value) => Some(*value),
            MetricValue::Array(_) => None,
        }
    }

    /// Returns the array payload, if this is an array.
    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            MetricValue::Scalar(_) => None,
            MetricValue::Array(values) => Some(values),
        }
    }
}

impl RecordEntry for MetricValue {
    fn summary(&self) -> String {
        match self {
            MetricValue::Scalar(value) => format!("{value:.6}"),
            MetricValue::Array(values) => {
                let cells: Vec<String> = values.iter().map(|value| format!("{value:.6}")).collect();
                format!("[{}]", cells.join(", "))
            }
        }
    }

    fn csv_components() -> &'static [&'static str] {
        &[""]
    }

    fn csv_values(&self) -> Vec<String> {
        match self {
            MetricValue::Scalar(value) => vec![format!("{value:.6}")],
            MetricValue::Array(values) => {
                let cells: Vec<String> = values.iter().map(|value| format!("{value:.6}")).collect();
                vec![cells.join(";")]
            }
        }
    }
}

/// Sample statistics of one observable at one triggered epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservableStatistics {
    /// Sample mean of the local estimator.
    pub mean: f64,
    /// Population variance of the local estimator.
    pub variance: f64,
    /// Standard error of the mean, `sqrt(variance / n)`.
    pub std_error: f64,
}

impl ObservableStatistics {
    /// Reduces a batch of local estimator values to summary statistics.
    ///
    /// A single-sample batch legitimately yields zero variance and zero
    /// standard error; only an empty batch is an error.
    pub fn from_estimators(values: &[f64]) -> Result<Self, NqsError> {
        if values.is_empty() {
            return Err(NqsError::Estimator(ErrorInfo::new(
                "estimator-empty",
                "observable produced no estimator values",
            )));
        }
        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let mean_sq = values.iter().map(|value| value * value).sum::<f64>() / count;
        let variance = (mean_sq - mean * mean).max(0.0);
        let std_error = (variance / count).sqrt();
        Ok(Self {
            mean,
            variance,
            std_error,
        })
    }
}

impl RecordEntry for ObservableStatistics {
    fn summary(&self) -> String {
        format!(
            "mean={:.6} var={:.6} err={:.6}",
            self.mean, self.variance, self.std_error
        )
    }

    fn csv_components() -> &'static [&'static str] {
        &["mean", "variance", "std_error"]
    }

    fn csv_values(&self) -> Vec<String> {
        vec![
            format!("{:.6}", self.mean),
            format!("{:.6}", self.variance),
            format!("{:.6}", self.std_error),
        ]
    }
}

/// Time-ordered view over one observable's recorded statistics.
///
/// The named accessors and the string-keyed [`StatisticsSeries::component`]
/// are equivalent entries into the same lookup.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsSeries<'a> {
    values: &'a [ObservableStatistics],
}

impl<'a> StatisticsSeries<'a> {
    pub(crate) fn new(values: &'a [ObservableStatistics]) -> Self {
        Self { values }
    }

    /// The underlying statistics records in trigger order.
    pub fn values(&self) -> &'a [ObservableStatistics] {
        self.values
    }

    /// Number of recorded triggers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Means across all triggers, in order.
    pub fn means(&self) -> Vec<f64> {
        self.values.iter().map(|stats| stats.mean).collect()
    }

    /// Variances across all triggers, in order.
    pub fn variances(&self) -> Vec<f64> {
        self.values.iter().map(|stats| stats.variance).collect()
    }

    /// Standard errors across all triggers, in order.
    pub fn std_errors(&self) -> Vec<f64> {
        self.values.iter().map(|stats| stats.std_error).collect()
    }

    /// String-keyed twin of the named accessors.
    pub fn component(&self, component: &str) -> Result<Vec<f64>, NqsError> {
        match component {
            "mean" => Ok(self.means()),
            "variance" => Ok(self.variances()),
            "std_error" => Ok(self.std_errors()),
            other => Err(NqsError::Field(
                ErrorInfo::new("unknown-component", "no such statistics component")
                    .with_context("component", other)
                    .with_hint("valid components: mean, variance, std_error"),
            )),
        }
    }
}

/// Renders the verbose line printed after a triggered evaluation.
pub(crate) fn format_epoch_line<V: RecordEntry>(epoch: usize, record: &IndexMap<String, V>) -> String {
    let mut line = format!("epoch {epoch}");
    for (name, value) in record {
        line.push_str(&format!(" | {name}: {}", value.summary()));
    }
    line
}
