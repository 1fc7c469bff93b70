//! In-memory form of the loaded dataset: one time axis, one value vector
//! per grid cell.

use crate::series::error::GridSeriesError;
use crate::types::geo_point::GridCell;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::ops::Range;

/// A three-axis (latitude, longitude, time) series of water thickness,
/// flattened to a map from grid cell to its value vector.
///
/// Every value vector is aligned with the time axis: `cells[cell][i]` is the
/// value at `times[i]`. Construction validates that alignment, so lookups
/// never have to.
#[derive(Debug, Clone)]
pub struct GridSeries {
    times: Vec<NaiveDate>,
    cells: HashMap<GridCell, Vec<f64>>,
}

impl GridSeries {
    /// Builds a series from a strictly increasing time axis and per-cell
    /// value vectors of the same length.
    pub fn new(
        times: Vec<NaiveDate>,
        cells: HashMap<GridCell, Vec<f64>>,
    ) -> Result<Self, GridSeriesError> {
        if !times.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(GridSeriesError::TimeAxisNotIncreasing);
        }
        for (cell, values) in &cells {
            if values.len() != times.len() {
                return Err(GridSeriesError::CellLength {
                    cell: *cell,
                    expected: times.len(),
                    found: values.len(),
                });
            }
        }
        Ok(Self { times, cells })
    }

    /// The full time axis, in ascending order.
    pub fn times(&self) -> &[NaiveDate] {
        &self.times
    }

    /// First and last timestamp, or `None` for an empty axis.
    pub fn time_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.times.first()?, *self.times.last()?))
    }

    /// Index range of the timestamps falling inside the inclusive window
    /// `[start, end]`. Empty when the window misses the axis entirely.
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> Range<usize> {
        let lo = self.times.partition_point(|t| *t < start);
        let hi = self.times.partition_point(|t| *t <= end);
        lo..hi.max(lo)
    }

    /// The value vector of `cell`, aligned with [`GridSeries::times`], or
    /// `None` when the cell is absent from the dataset.
    pub fn cell_values(&self, cell: &GridCell) -> Option<&[f64]> {
        self.cells.get(cell).map(Vec::as_slice)
    }
}
