//! The tabular result of an extraction: one labeled series per input point.

use polars::prelude::DataFrame;

/// An ordered mapping from point labels to their extracted series, plus
/// metadata naming the value and uncertainty columns.
///
/// Records appear in the same order as the input points, including
/// duplicates; two identical points produce two entries under the same
/// label.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    records: Vec<(String, DataFrame)>,
    default_columns: Vec<String>,
    default_error_columns: Vec<String>,
}

impl SeriesTable {
    pub(crate) fn new(
        records: Vec<(String, DataFrame)>,
        default_columns: Vec<String>,
        default_error_columns: Vec<String>,
    ) -> Self {
        Self {
            records,
            default_columns,
            default_error_columns,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Labels in input-point order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|(label, _)| label.as_str())
    }

    /// The first record stored under `label`, if any.
    pub fn get(&self, label: &str) -> Option<&DataFrame> {
        self.records
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, frame)| frame)
    }

    /// `(label, frame)` pairs in input-point order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.records
            .iter()
            .map(|(label, frame)| (label.as_str(), frame))
    }

    /// Consumes the table, yielding its records in input-point order.
    pub fn into_records(self) -> Vec<(String, DataFrame)> {
        self.records
    }

    /// Names of the columns holding the primary values.
    pub fn default_columns(&self) -> &[String] {
        &self.default_columns
    }

    /// Names of the columns holding per-value uncertainties.
    pub fn default_error_columns(&self) -> &[String] {
        &self.default_error_columns
    }
}
