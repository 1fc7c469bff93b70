use crate::types::geo_point::GridCell;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridSeriesError {
    #[error("Failed to read dataset file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Variable '{variable}' missing from dataset file '{path}'")]
    MissingVariable { path: PathBuf, variable: String },

    #[error("Dataset file '{path}' is malformed: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Grid cell {cell} holds {found} values for {expected} timestamps")]
    CellLength {
        cell: GridCell,
        expected: usize,
        found: usize,
    },

    #[error("Time axis is not strictly increasing")]
    TimeAxisNotIncreasing,
}
