use crate::extraction::error::ExtractionError;
use crate::registry::error::RegistryError;
use crate::retrieval::error::RetrievalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GldasError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to determine config directory")]
    ConfigDirResolution,
}
