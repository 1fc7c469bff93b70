use gldas::{Gldas, GldasError, GridSeries, GridSeriesError, GridSeriesReader, SeriesFields};
use std::path::Path;
use std::sync::Arc;

// Downloading alone never touches the reader; wiring a real netCDF reader
// is only needed for extraction.
struct NoReader;

impl GridSeriesReader for NoReader {
    fn read(&self, path: &Path, _fields: &SeriesFields) -> Result<GridSeries, GridSeriesError> {
        Err(GridSeriesError::Malformed {
            path: path.to_path_buf(),
            message: "no reader wired into this demo".to_string(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), GldasError> {
    let client = Gldas::new(Arc::new(NoReader))?;
    let path = client.fetch_dataset().call().await?;
    println!("GLDAS dataset stored at {:?}", path);
    Ok(())
}
