use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to create registry directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read registry file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write registry file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse registry file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode registry entries")]
    Serialize(#[source] serde_json::Error),
}
