mod error;
mod extraction;
mod gldas;
mod registry;
mod retrieval;
mod series;
mod types;
mod utils;

pub use error::GldasError;
pub use gldas::*;

pub use extraction::error::ExtractionError;
pub use registry::error::RegistryError;
pub use registry::store::{DatasetRegistry, FileRegistry, MemoryRegistry};
pub use retrieval::error::RetrievalError;

pub use series::error::GridSeriesError;
pub use series::grid_series::GridSeries;
pub use series::reader::{GridSeriesReader, SeriesFields, GLDAS_FIELDS};

pub use types::date_spec::{DateParseError, DateSpec};
pub use types::geo_point::{normalize_longitude, GeoPoint, GridCell};
pub use types::series_table::SeriesTable;
