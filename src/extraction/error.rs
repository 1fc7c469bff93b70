use crate::registry::error::RegistryError;
use crate::series::error::GridSeriesError;
use crate::types::date_spec::DateParseError;
use crate::types::geo_point::GridCell;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No dataset registered under key '{key}'")]
    DataNotAvailable { key: &'static str },

    #[error("Point ({lat}, {lon}) maps to grid cell {cell}, which is absent from the dataset")]
    PointOutOfDomain { lat: f64, lon: f64, cell: GridCell },

    #[error("Point ({lat}, {lon}) has a non-finite coordinate")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Dataset file '{0}' has an empty time axis")]
    EmptyTimeAxis(PathBuf),

    #[error(transparent)]
    DateParse(#[from] DateParseError),

    #[error(transparent)]
    Read(#[from] GridSeriesError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
