//! Turns the cached dataset into labeled per-point time series.

use crate::extraction::error::ExtractionError;
use crate::gldas::{DATASET_KEY, EQUIVALENT_WATER_THICKNESS, UNCERTAINTY};
use crate::registry::store::DatasetRegistry;
use crate::series::grid_series::GridSeries;
use crate::series::reader::{GridSeriesReader, GLDAS_FIELDS};
use crate::types::date_spec::DateSpec;
use crate::types::geo_point::{GeoPoint, GridCell};
use crate::types::series_table::SeriesTable;
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::{Column, DataFrame, DateChunked, IntoSeries};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task;

pub(crate) struct SeriesExtractor {
    registry: Arc<dyn DatasetRegistry>,
    reader: Arc<dyn GridSeriesReader>,
}

impl SeriesExtractor {
    pub(crate) fn new(
        registry: Arc<dyn DatasetRegistry>,
        reader: Arc<dyn GridSeriesReader>,
    ) -> Self {
        Self { registry, reader }
    }

    /// See [`crate::Gldas::extract`] for the contract.
    pub(crate) async fn extract(
        &self,
        points: &[GeoPoint],
        start_date: &DateSpec,
        end_date: &DateSpec,
        resample: bool,
    ) -> Result<SeriesTable, ExtractionError> {
        let path = self
            .registry
            .get_location(DATASET_KEY)?
            .ok_or(ExtractionError::DataNotAvailable { key: DATASET_KEY })?;

        debug!("Loading dataset '{}' from {:?}", DATASET_KEY, path);
        let series = self.load(path.clone()).await?;

        // Unspecified bounds bind to the ends of the full loaded axis.
        let (first, last) = series
            .time_bounds()
            .ok_or_else(|| ExtractionError::EmptyTimeAxis(path.clone()))?;
        let start = start_date.resolve(first)?;
        let end = end_date.resolve(last)?;

        let window = series.window(start, end);
        let dates = &series.times()[window.clone()];

        let mut records = Vec::with_capacity(points.len());
        for point in points {
            let cell =
                GridCell::containing(*point).ok_or(ExtractionError::InvalidCoordinate {
                    lat: point.0,
                    lon: point.1,
                })?;
            let values =
                series
                    .cell_values(&cell)
                    .ok_or(ExtractionError::PointOutOfDomain {
                        lat: point.0,
                        lon: point.1,
                        cell,
                    })?;
            let cut = &values[window.clone()];
            let frame = if resample {
                resampled_record(dates, cut, start, end)?
            } else {
                record(dates.to_vec(), cut.to_vec())?
            };
            records.push((point.label(), frame));
        }

        info!(
            "Extracted {} series over [{}, {}]",
            records.len(),
            start,
            end
        );
        Ok(SeriesTable::new(
            records,
            vec![EQUIVALENT_WATER_THICKNESS.to_string()],
            vec![UNCERTAINTY.to_string()],
        ))
    }

    async fn load(&self, path: PathBuf) -> Result<GridSeries, ExtractionError> {
        let reader = Arc::clone(&self.reader);
        task::spawn_blocking(move || reader.read(&path, &GLDAS_FIELDS))
            .await?
            .map_err(ExtractionError::from)
    }
}

/// A record over exactly the dates present in the cut series.
fn record(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<DataFrame, ExtractionError> {
    let uncertainty = vec![f64::NAN; values.len()];
    frame(dates, values, uncertainty)
}

/// Reindexes the record onto every calendar day in `[start, end]`, leaving
/// NaN rows for days the source does not cover.
fn resampled_record(
    dates: &[NaiveDate],
    values: &[f64],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DataFrame, ExtractionError> {
    let by_date: HashMap<NaiveDate, f64> = dates
        .iter()
        .copied()
        .zip(values.iter().copied())
        .collect();
    let mut calendar = Vec::new();
    let mut filled = Vec::new();
    let mut day = start;
    while day <= end {
        calendar.push(day);
        filled.push(by_date.get(&day).copied().unwrap_or(f64::NAN));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    let uncertainty = vec![f64::NAN; filled.len()];
    frame(calendar, filled, uncertainty)
}

fn frame(
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    uncertainty: Vec<f64>,
) -> Result<DataFrame, ExtractionError> {
    let date_column: Column = DateChunked::from_naive_date("date".into(), dates)
        .into_series()
        .into();
    let value_column = Column::new(EQUIVALENT_WATER_THICKNESS.into(), values);
    let uncertainty_column = Column::new(UNCERTAINTY.into(), uncertainty);
    DataFrame::new(vec![date_column, value_column, uncertainty_column])
        .map_err(ExtractionError::from)
}
