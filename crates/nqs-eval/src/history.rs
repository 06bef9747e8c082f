//! Append-only evaluation histories keyed by configured field names.

use std::io::Write;

use indexmap::IndexMap;
use nqs_core::{ErrorInfo, NqsError};

use crate::record::RecordEntry;

/// Append-only store of records produced at triggered epochs.
///
/// One column per configured name, every column aligned with the list of
/// trigger epochs. The key set is fixed at construction; records with a
/// different key set are rejected and a failed append leaves the store
/// unchanged. Reads are pure.
#[derive(Debug, Clone)]
pub struct EvaluationHistory<V> {
    epochs: Vec<usize>,
    columns: IndexMap<String, Vec<V>>,
}

impl<V> EvaluationHistory<V> {
    /// Creates an empty history for the given field names.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let columns = names.into_iter().map(|name| (name, Vec::new())).collect();
        Self {
            epochs: Vec::new(),
            columns,
        }
    }

    /// Configured field names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Epochs at which records were captured, in increasing order.
    pub fn epochs(&self) -> &[usize] {
        &self.epochs
    }

    /// Number of records captured so far.
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    /// Returns true when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Appends one record; its key set must match the configured names.
    pub fn append(&mut self, epoch: usize, record: IndexMap<String, V>) -> Result<(), NqsError> {
        if record.len() != self.columns.len()
            || record.keys().any(|name| !self.columns.contains_key(name))
        {
            let expected: Vec<&str> = self.names().collect();
            let actual: Vec<&str> = record.keys().map(String::as_str).collect();
            return Err(NqsError::Config(
                ErrorInfo::new("record-keys", "record keys do not match configured names")
                    .with_context("expected", expected.join(", "))
                    .with_context("actual", actual.join(", ")),
            ));
        }
        for (name, value) in record {
            if let Some(column) = self.columns.get_mut(&name) {
                column.push(value);
            }
        }
        self.epochs.push(epoch);
        Ok(())
    }

    /// Time-ordered values recorded under `name`.
    pub fn series(&self, name: &str) -> Result<&[V], NqsError> {
        match self.columns.get(name) {
            Some(column) => Ok(column.as_slice()),
            None => {
                let configured: Vec<&str> = self.names().collect();
                Err(NqsError::Field(
                    ErrorInfo::new("unknown-field", "name was never configured")
                        .with_context("name", name)
                        .with_context("configured", configured.join(", ")),
                ))
            }
        }
    }
}

impl<V: RecordEntry> EvaluationHistory<V> {
    /// Writes the history as CSV with 6-decimal fixed-point values.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<(), NqsError> {
        let mut header = vec!["epoch".to_string()];
        for name in self.names() {
            for component in V::csv_components() {
                if component.is_empty() {
                    header.push(name.to_string());
                } else {
                    header.push(format!("{name}_{component}"));
                }
            }
        }
        writeln!(writer, "{}", header.join(",")).map_err(csv_error)?;
        for (index, epoch) in self.epochs.iter().enumerate() {
            let mut cells = vec![epoch.to_string()];
            for column in self.columns.values() {
                cells.extend(column[index].csv_values());
            }
            writeln!(writer, "{}", cells.join(",")).map_err(csv_error)?;
        }
        Ok(())
    }
}

fn csv_error(err: std::io::Error) -> NqsError {
    NqsError::Serde(ErrorInfo::new("csv-write", err.to_string()))
}
