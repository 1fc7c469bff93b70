use crate::error::GldasError;
use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = "gldas";
const REGISTRY_FILE_NAME: &str = "datasets.json";

pub(crate) fn default_registry_path() -> Result<PathBuf, GldasError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(REGISTRY_FILE_NAME))
        .ok_or(GldasError::ConfigDirResolution)
}
