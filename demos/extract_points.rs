use chrono::NaiveDate;
use gldas::{
    DatasetRegistry, DateSpec, GeoPoint, Gldas, GldasError, GridCell, GridSeries,
    GridSeriesError, GridSeriesReader, MemoryRegistry, SeriesFields, DATASET_KEY,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Stands in for a netCDF-backed reader: one year of monthly values for the
/// grid cell covering New Orleans.
struct SyntheticReader;

impl GridSeriesReader for SyntheticReader {
    fn read(&self, _path: &Path, _fields: &SeriesFields) -> Result<GridSeries, GridSeriesError> {
        let times: Vec<NaiveDate> = (1..=12)
            .map(|month| NaiveDate::from_ymd_opt(2020, month, 15).unwrap())
            .collect();
        let values = (0..12).map(|i| (i as f64) * 0.4 - 2.0).collect();
        let mut cells = HashMap::new();
        cells.insert(GridCell::at(30.5, 269.5).unwrap(), values);
        GridSeries::new(times, cells)
    }
}

#[tokio::main]
async fn main() -> Result<(), GldasError> {
    let registry = Arc::new(MemoryRegistry::new());
    registry.set_location(DATASET_KEY, Path::new("synthetic.nc"))?;
    let client = Gldas::with_registry(Arc::new(SyntheticReader), registry);

    let table = client
        .extract()
        .points(&[GeoPoint(30.2, -90.8), GeoPoint(30.9, 269.1)])
        .start_date(DateSpec::from("2020-03-01"))
        .end_date(DateSpec::from("2020-06-30"))
        .resample(true)
        .call()
        .await?;

    for (label, frame) in table.iter() {
        println!("{label}:\n{frame}");
    }
    Ok(())
}
