//! This module provides the main entry point for accessing GLDAS land water
//! mass data. It covers downloading the current monthly dataset file and
//! extracting per-point time series of Equivalent Water Thickness from the
//! cached copy.

use crate::error::GldasError;
use crate::extraction::extractor::SeriesExtractor;
use crate::registry::store::{DatasetRegistry, FileRegistry};
use crate::retrieval::retriever::DatasetRetriever;
use crate::series::reader::GridSeriesReader;
use crate::types::date_spec::DateSpec;
use crate::types::geo_point::GeoPoint;
use crate::types::series_table::SeriesTable;
use crate::utils::default_registry_path;
use bon::bon;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Registry key under which the dataset's local path is recorded.
pub const DATASET_KEY: &str = "gldas";

/// Name of the primary value column in extraction results.
pub const EQUIVALENT_WATER_THICKNESS: &str = "Equivalent Water Thickness (cm)";

/// Name of the uncertainty column in extraction results. The source dataset
/// carries no per-point uncertainty, so this column is NaN throughout.
pub const UNCERTAINTY: &str = "Uncertainty";

/// Bound on the whole remote session (connect, list, transfer) unless the
/// caller overrides it per fetch.
pub const DEFAULT_RETRIEVAL_TIMEOUT: Duration = Duration::from_secs(600);

/// The main client struct for accessing GLDAS data.
///
/// Construction injects the two collaborators: a [`GridSeriesReader`] that
/// parses the raw dataset file (this crate does not parse the file format
/// itself), and optionally a [`DatasetRegistry`] mapping dataset names to
/// local paths. [`Gldas::new`] uses the registry persisted in the user
/// config directory; [`Gldas::with_registry`] accepts any implementation,
/// such as [`crate::MemoryRegistry`].
///
/// # Examples
///
/// ```no_run
/// # use gldas::{GeoPoint, Gldas, GldasError, GridSeries, GridSeriesError, GridSeriesReader, SeriesFields};
/// # use std::path::Path;
/// # use std::sync::Arc;
/// # struct NetcdfReader;
/// # impl GridSeriesReader for NetcdfReader {
/// #     fn read(&self, _: &Path, _: &SeriesFields) -> Result<GridSeries, GridSeriesError> {
/// #         unimplemented!()
/// #     }
/// # }
/// # #[tokio::main]
/// # async fn main() -> Result<(), GldasError> {
/// let client = Gldas::new(Arc::new(NetcdfReader))?;
///
/// // Download the current monthly file and remember where it landed.
/// let path = client.fetch_dataset().call().await?;
/// println!("dataset cached at {:?}", path);
///
/// // Pull a daily-resampled series for one point.
/// let table = client
///     .extract()
///     .points(&[GeoPoint(30.2, -90.8)])
///     .start_date("2020-02-01".into())
///     .end_date("2020-02-29".into())
///     .resample(true)
///     .call()
///     .await?;
/// for (label, frame) in table.iter() {
///     println!("{label}:\n{frame}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Gldas {
    retriever: DatasetRetriever,
    extractor: SeriesExtractor,
}

#[bon]
impl Gldas {
    /// Creates a client backed by the registry file in the user config
    /// directory, so fetched dataset locations survive the process.
    ///
    /// # Errors
    ///
    /// Returns [`GldasError::ConfigDirResolution`] when no config directory
    /// can be determined, or [`GldasError::Registry`] when the registry file
    /// exists but cannot be read or parsed.
    pub fn new(reader: Arc<dyn GridSeriesReader>) -> Result<Self, GldasError> {
        let registry = FileRegistry::open(default_registry_path()?)?;
        Ok(Self::with_registry(reader, Arc::new(registry)))
    }

    /// Creates a client with a caller-supplied registry.
    pub fn with_registry(
        reader: Arc<dyn GridSeriesReader>,
        registry: Arc<dyn DatasetRegistry>,
    ) -> Self {
        Self {
            retriever: DatasetRetriever::new(Arc::clone(&registry)),
            extractor: SeriesExtractor::new(registry, reader),
        }
    }

    /// Fetches the GLDAS dataset file and registers its absolute path under
    /// [`DATASET_KEY`].
    ///
    /// Without arguments this opens an anonymous FTP session to the NASA
    /// archive, expects the remote directory to list exactly one `.nc`
    /// file, and stores it under its remote name in the current working
    /// directory. An existing file at the target is overwritten.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.output_path(PathBuf)`: Optional. Where to store the download: a
    ///   directory receives the remote file name inside it, any other path
    ///   is used verbatim.
    /// * `.local_source(PathBuf)`: Optional. An already-downloaded file;
    ///   its absolute path is registered and returned without any network
    ///   access.
    /// * `.timeout(Duration)`: Optional. Bound on the whole remote session.
    ///   Defaults to [`DEFAULT_RETRIEVAL_TIMEOUT`].
    ///
    /// # Returns
    ///
    /// The canonical absolute path of the registered dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RetrievalError::NoDataFound`] when nothing in the
    /// remote listing matches, [`crate::RetrievalError::TooManyMatches`]
    /// when the listing is ambiguous (nothing is downloaded in that case),
    /// [`crate::RetrievalError::Timeout`] when the session exceeds the
    /// bound, and [`crate::RetrievalError::LocalSource`] when a given
    /// `local_source` cannot be resolved.
    #[builder]
    pub async fn fetch_dataset(
        &self,
        output_path: Option<PathBuf>,
        local_source: Option<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<PathBuf, GldasError> {
        let timeout = timeout.unwrap_or(DEFAULT_RETRIEVAL_TIMEOUT);
        self.retriever
            .fetch(output_path, local_source, timeout)
            .await
            .map_err(GldasError::from)
    }

    /// Extracts one labeled water-thickness series per input point from the
    /// registered dataset file.
    ///
    /// Each point is mapped to the one-degree grid cell containing it
    /// (longitude normalized into `[0, 360)`), the cell's series is cut to
    /// the inclusive date window, and an all-NaN uncertainty column is
    /// attached. Records keep the input point order, duplicates included,
    /// labeled `"<lat>, <lon>"` from the original coordinates.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.points(&[GeoPoint])`: **Required.** The points to extract.
    /// * `.start_date(DateSpec)` / `.end_date(DateSpec)`: Optional. Window
    ///   bounds; [`DateSpec::Unspecified`] (the default) binds to the first
    ///   and last timestamp of the loaded series.
    /// * `.resample(bool)`: Optional, default `false`. When set, reindexes
    ///   every record onto each calendar day in the window, with NaN rows
    ///   for days the source does not cover.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExtractionError::DataNotAvailable`] when no dataset
    /// was ever registered, [`crate::ExtractionError::PointOutOfDomain`]
    /// when a point maps to a cell the dataset does not contain, and
    /// [`crate::ExtractionError::DateParse`] for unparseable textual dates.
    #[builder]
    pub async fn extract(
        &self,
        points: &[GeoPoint],
        start_date: Option<DateSpec>,
        end_date: Option<DateSpec>,
        resample: Option<bool>,
    ) -> Result<SeriesTable, GldasError> {
        let start_date = start_date.unwrap_or_default();
        let end_date = end_date.unwrap_or_default();
        let resample = resample.unwrap_or(false);
        self.extractor
            .extract(points, &start_date, &end_date, resample)
            .await
            .map_err(GldasError::from)
    }
}
