use crate::registry::error::RegistryError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("{count} files matching '*{suffix}' found in remote directory '{directory}', expected exactly one")]
    TooManyMatches {
        directory: &'static str,
        suffix: &'static str,
        count: usize,
    },

    #[error("No file matching '*{suffix}' found in remote directory '{directory}'")]
    NoDataFound {
        directory: &'static str,
        suffix: &'static str,
    },

    #[error("Remote retrieval from '{host}' exceeded {timeout:?}")]
    Timeout {
        host: &'static str,
        timeout: Duration,
    },

    #[error("FTP session with '{host}' failed")]
    Ftp {
        host: &'static str,
        #[source]
        source: suppaftp::FtpError,
    },

    #[error("Failed to write dataset file '{0}'")]
    FileWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to resolve absolute path of '{0}'")]
    PathResolution(PathBuf, #[source] std::io::Error),

    #[error("Local source file '{0}' is not accessible")]
    LocalSource(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
