//! Downloads the current monthly dataset file and records where it landed.

use crate::gldas::DATASET_KEY;
use crate::registry::store::DatasetRegistry;
use crate::retrieval::error::RetrievalError;
use crate::retrieval::remote::{FtpStore, RemoteStore, REMOTE_DIR, REMOTE_HOST};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::{task, time};

const DATA_SUFFIX: &str = ".nc";

pub(crate) struct DatasetRetriever {
    registry: Arc<dyn DatasetRegistry>,
}

impl DatasetRetriever {
    pub(crate) fn new(registry: Arc<dyn DatasetRegistry>) -> Self {
        Self { registry }
    }

    /// Fetches the dataset and registers its canonical absolute path under
    /// [`DATASET_KEY`]. See [`crate::Gldas::fetch_dataset`] for the contract.
    pub(crate) async fn fetch(
        &self,
        output_path: Option<PathBuf>,
        local_source: Option<PathBuf>,
        timeout: Duration,
    ) -> Result<PathBuf, RetrievalError> {
        self.fetch_from(FtpStore::connect, output_path, local_source, timeout)
            .await
    }

    async fn fetch_from<S, F>(
        &self,
        connect: F,
        output_path: Option<PathBuf>,
        local_source: Option<PathBuf>,
        timeout: Duration,
    ) -> Result<PathBuf, RetrievalError>
    where
        S: RemoteStore + 'static,
        F: FnOnce() -> Result<S, RetrievalError> + Send + 'static,
    {
        if let Some(source) = local_source {
            info!("Using pre-staged dataset at {:?}", source);
            let resolved = tokio::fs::canonicalize(&source)
                .await
                .map_err(|e| RetrievalError::LocalSource(source.clone(), e))?;
            self.registry.set_location(DATASET_KEY, &resolved)?;
            return Ok(resolved);
        }

        info!("Downloading GLDAS land mass data from {}", REMOTE_HOST);
        let download = task::spawn_blocking(move || {
            let mut store = connect()?;
            download_via(&mut store, output_path)
        });
        // The blocking session cannot be interrupted; on timeout it is left
        // to finish in the background while the caller gets the error.
        let target = match time::timeout(timeout, download).await {
            Ok(joined) => joined??,
            Err(_) => {
                return Err(RetrievalError::Timeout {
                    host: REMOTE_HOST,
                    timeout,
                })
            }
        };

        let resolved = tokio::fs::canonicalize(&target)
            .await
            .map_err(|e| RetrievalError::PathResolution(target.clone(), e))?;
        self.registry.set_location(DATASET_KEY, &resolved)?;
        Ok(resolved)
    }
}

/// Lists the remote directory, selects the single dataset file, and stores
/// its bytes at the resolved target path. Existing files are overwritten.
fn download_via(
    store: &mut dyn RemoteStore,
    output_path: Option<PathBuf>,
) -> Result<PathBuf, RetrievalError> {
    let names = store.list()?;
    let name = select_dataset_file(&names)?;
    let bytes = store.retrieve(name)?;
    let target = resolve_target(output_path, name);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| RetrievalError::FileWrite(target.clone(), e))?;
        }
    }
    fs::write(&target, &bytes).map_err(|e| RetrievalError::FileWrite(target.clone(), e))?;
    info!("Stored {} bytes at {:?}", bytes.len(), target);
    Ok(target)
}

/// The remote directory is expected to hold exactly one current monthly
/// file; anything else is a hard stop, never resolved heuristically.
fn select_dataset_file(names: &[String]) -> Result<&str, RetrievalError> {
    let matches: Vec<&String> = names
        .iter()
        .filter(|name| name.ends_with(DATA_SUFFIX))
        .collect();
    match matches.as_slice() {
        [] => Err(RetrievalError::NoDataFound {
            directory: REMOTE_DIR,
            suffix: DATA_SUFFIX,
        }),
        [single] => Ok(single.as_str()),
        many => {
            warn!("Ambiguous remote listing: {:?}", many);
            Err(RetrievalError::TooManyMatches {
                directory: REMOTE_DIR,
                suffix: DATA_SUFFIX,
                count: many.len(),
            })
        }
    }
}

/// `None` stores under the remote name in the working directory; a directory
/// stores the remote name inside it; any other path is used verbatim.
fn resolve_target(output_path: Option<PathBuf>, name: &str) -> PathBuf {
    match output_path {
        None => PathBuf::from(name),
        Some(path) if path.is_dir() => path.join(name),
        Some(path) => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::store::MemoryRegistry;
    use std::sync::Mutex;
    use std::thread;

    const PAYLOAD: &[u8] = b"netcdf-bytes";

    struct FakeStore {
        names: Vec<String>,
        retrieved: Arc<Mutex<Vec<String>>>,
        list_delay: Option<Duration>,
    }

    impl FakeStore {
        fn new(names: &[&str]) -> (Self, Arc<Mutex<Vec<String>>>) {
            let retrieved = Arc::new(Mutex::new(Vec::new()));
            let store = Self {
                names: names.iter().map(|n| n.to_string()).collect(),
                retrieved: Arc::clone(&retrieved),
                list_delay: None,
            };
            (store, retrieved)
        }
    }

    impl RemoteStore for FakeStore {
        fn list(&mut self) -> Result<Vec<String>, RetrievalError> {
            if let Some(delay) = self.list_delay {
                thread::sleep(delay);
            }
            Ok(self.names.clone())
        }

        fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, RetrievalError> {
            self.retrieved.lock().unwrap().push(name.to_string());
            Ok(PAYLOAD.to_vec())
        }
    }

    #[test]
    fn selection_requires_exactly_one_match() {
        let single = vec!["README.txt".to_string(), "GLDAS_2022.nc".to_string()];
        assert_eq!(select_dataset_file(&single).unwrap(), "GLDAS_2022.nc");

        let none = vec!["README.txt".to_string(), "data.nc.md5".to_string()];
        assert!(matches!(
            select_dataset_file(&none),
            Err(RetrievalError::NoDataFound { .. })
        ));

        let many = vec!["a.nc".to_string(), "b.nc".to_string(), "c.txt".to_string()];
        assert!(matches!(
            select_dataset_file(&many),
            Err(RetrievalError::TooManyMatches { count: 2, .. })
        ));
    }

    #[test]
    fn suffix_match_is_end_anchored_and_case_sensitive() {
        let names = vec!["GLDAS.NC".to_string(), "gldas.nc.bak".to_string()];
        assert!(matches!(
            select_dataset_file(&names),
            Err(RetrievalError::NoDataFound { .. })
        ));
    }

    #[test]
    fn target_defaults_to_the_remote_name_in_the_working_directory() {
        assert_eq!(
            resolve_target(None, "GLDAS_2022.nc"),
            PathBuf::from("GLDAS_2022.nc")
        );
    }

    #[test]
    fn explicit_file_target_is_used_verbatim() {
        assert_eq!(
            resolve_target(Some(PathBuf::from("/tmp/renamed.nc")), "GLDAS_2022.nc"),
            PathBuf::from("/tmp/renamed.nc")
        );
    }

    #[test]
    fn directory_target_receives_the_remote_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_target(Some(dir.path().to_path_buf()), "GLDAS_2022.nc"),
            dir.path().join("GLDAS_2022.nc")
        );
    }

    #[test]
    fn ambiguous_listings_download_nothing() {
        let (mut store, retrieved) = FakeStore::new(&["a.nc", "b.nc"]);
        let err = download_via(&mut store, None).unwrap_err();
        assert!(matches!(err, RetrievalError::TooManyMatches { count: 2, .. }));
        assert!(retrieved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_downloads_the_single_match_and_registers_it() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("GLDAS_2022.nc");
        let registry = Arc::new(MemoryRegistry::new());
        let retriever = DatasetRetriever::new(registry.clone());

        let (store, retrieved) = FakeStore::new(&["GLDAS_2022.nc"]);
        let path = retriever
            .fetch_from(
                move || Ok(store),
                Some(out.clone()),
                None,
                Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("GLDAS_2022.nc"));
        assert_eq!(fs::read(&path).unwrap(), PAYLOAD);
        assert_eq!(
            registry.get_location(DATASET_KEY).unwrap(),
            Some(path.clone())
        );
        assert_eq!(*retrieved.lock().unwrap(), ["GLDAS_2022.nc"]);
    }

    #[tokio::test]
    async fn fetch_overwrites_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("GLDAS_2022.nc");
        fs::write(&out, b"stale").unwrap();

        let registry = Arc::new(MemoryRegistry::new());
        let retriever = DatasetRetriever::new(registry);
        let (store, _) = FakeStore::new(&["GLDAS_2022.nc"]);
        retriever
            .fetch_from(
                move || Ok(store),
                Some(out.clone()),
                None,
                Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert_eq!(fs::read(&out).unwrap(), PAYLOAD);
    }

    #[tokio::test]
    async fn slow_remote_sessions_time_out() {
        let registry = Arc::new(MemoryRegistry::new());
        let retriever = DatasetRetriever::new(registry.clone());

        // Ambiguous listing, so the detached session stores nothing once
        // the delay elapses.
        let (mut store, _) = FakeStore::new(&["a.nc", "b.nc"]);
        store.list_delay = Some(Duration::from_millis(500));
        let err = retriever
            .fetch_from(move || Ok(store), None, None, Duration::from_millis(20))
            .await
            .unwrap_err();

        assert!(matches!(err, RetrievalError::Timeout { .. }));
        assert_eq!(registry.get_location(DATASET_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn local_source_registers_without_touching_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("staged.nc");
        fs::write(&staged, PAYLOAD).unwrap();

        let registry = Arc::new(MemoryRegistry::new());
        let retriever = DatasetRetriever::new(registry.clone());
        let path = retriever
            .fetch(None, Some(staged), Duration::from_secs(5))
            .await
            .unwrap();

        assert!(path.is_absolute());
        assert_eq!(registry.get_location(DATASET_KEY).unwrap(), Some(path));
    }

    #[tokio::test]
    async fn missing_local_source_is_an_error() {
        let registry = Arc::new(MemoryRegistry::new());
        let retriever = DatasetRetriever::new(registry);
        let err = retriever
            .fetch(
                None,
                Some(PathBuf::from("/no/such/file.nc")),
                Duration::from_secs(5),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::LocalSource(..)));
    }
}
