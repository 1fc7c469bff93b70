//! The collaborator interface that parses a local dataset file.

use crate::series::error::GridSeriesError;
use crate::series::grid_series::GridSeries;
use std::path::Path;

/// Variable names identifying the axes and values inside the raw file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesFields {
    pub latitude: &'static str,
    pub longitude: &'static str,
    pub value: &'static str,
    pub time: &'static str,
}

/// Variable names of the GLDAS monthly land mass product.
pub const GLDAS_FIELDS: SeriesFields = SeriesFields {
    latitude: "Latitude",
    longitude: "Longitude",
    value: "Water_Thickness",
    time: "Time",
};

/// Parses a local dataset file into a [`GridSeries`].
///
/// The file format itself is not this crate's concern; an implementation
/// (typically netCDF-backed) is injected into [`crate::Gldas`] at
/// construction. Implementations report problems through
/// [`GridSeriesError`] and must be callable from a blocking task.
pub trait GridSeriesReader: Send + Sync {
    fn read(&self, path: &Path, fields: &SeriesFields) -> Result<GridSeries, GridSeriesError>;
}
