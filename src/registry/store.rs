//! Maps dataset names to the local paths of their downloaded copies.

use crate::registry::error::RegistryError;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Resolves a dataset's logical name to its local file path.
///
/// The retriever writes one entry per fetch; the extractor reads it back.
/// Implementations decide the entry lifetime: the process
/// ([`MemoryRegistry`]) or a persisted file ([`FileRegistry`]).
pub trait DatasetRegistry: Send + Sync {
    /// The registered local path of `name`, or `None` when never set.
    fn get_location(&self, name: &str) -> Result<Option<PathBuf>, RegistryError>;

    /// Registers `path` as the local copy of `name`, replacing any previous
    /// entry.
    fn set_location(&self, name: &str, path: &Path) -> Result<(), RegistryError>;
}

/// Registry with process lifetime; entries vanish when the process exits.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: Mutex<HashMap<String, PathBuf>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetRegistry for MemoryRegistry {
    fn get_location(&self, name: &str) -> Result<Option<PathBuf>, RegistryError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(name).cloned())
    }

    fn set_location(&self, name: &str, path: &Path) -> Result<(), RegistryError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.to_string(), path.to_path_buf());
        Ok(())
    }
}

/// Registry persisted as a JSON name-to-path map, written through on every
/// [`DatasetRegistry::set_location`] so entries survive the process.
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    entries: Mutex<HashMap<String, PathBuf>>,
}

impl FileRegistry {
    /// Opens the registry stored at `path`, creating parent directories as
    /// needed. A missing file starts an empty registry.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| RegistryError::DirCreation(parent.to_path_buf(), e))?;
            }
        }
        let entries = match fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| RegistryError::Parse(path.clone(), e))?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(RegistryError::Read(path.clone(), e)),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetRegistry for FileRegistry {
    fn get_location(&self, name: &str) -> Result<Option<PathBuf>, RegistryError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(name).cloned())
    }

    fn set_location(&self, name: &str, path: &Path) -> Result<(), RegistryError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.to_string(), path.to_path_buf());
        let serialized =
            serde_json::to_vec_pretty(&*entries).map_err(RegistryError::Serialize)?;
        fs::write(&self.path, serialized)
            .map_err(|e| RegistryError::Write(self.path.clone(), e))?;
        info!("Registered dataset '{}' at {:?}", name, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_registry_round_trips_and_overwrites() {
        let registry = MemoryRegistry::new();
        assert_eq!(registry.get_location("gldas").unwrap(), None);

        registry
            .set_location("gldas", Path::new("/data/a.nc"))
            .unwrap();
        assert_eq!(
            registry.get_location("gldas").unwrap(),
            Some(PathBuf::from("/data/a.nc"))
        );

        registry
            .set_location("gldas", Path::new("/data/b.nc"))
            .unwrap();
        assert_eq!(
            registry.get_location("gldas").unwrap(),
            Some(PathBuf::from("/data/b.nc"))
        );
    }

    #[test]
    fn file_registry_persists_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let registry_path = dir.path().join("config").join("datasets.json");

        {
            let registry = FileRegistry::open(&registry_path).unwrap();
            registry
                .set_location("gldas", Path::new("/data/GLDAS_2022.nc"))
                .unwrap();
        }

        let reopened = FileRegistry::open(&registry_path).unwrap();
        assert_eq!(
            reopened.get_location("gldas").unwrap(),
            Some(PathBuf::from("/data/GLDAS_2022.nc"))
        );
        assert_eq!(reopened.get_location("grace").unwrap(), None);
    }

    #[test]
    fn file_registry_starts_empty_without_a_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileRegistry::open(dir.path().join("datasets.json")).unwrap();
        assert_eq!(registry.get_location("gldas").unwrap(), None);
    }

    #[test]
    fn file_registry_rejects_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let registry_path = dir.path().join("datasets.json");
        fs::write(&registry_path, b"not json").unwrap();
        assert!(matches!(
            FileRegistry::open(&registry_path),
            Err(RegistryError::Parse(..))
        ));
    }
}
