//! Global configuration location (~/.config/quill/config.toml)

use std::path::PathBuf;

use crate::error::{QuillError, Result};

const CONFIG_DIR: &str = "quill";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "QUILL_CONFIG_DIR";

/// Path of the global config file, honoring `QUILL_CONFIG_DIR`
pub fn config_path() -> Result<PathBuf> {
    let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
        PathBuf::from(env_dir)
    } else {
        dirs::config_dir()
            .ok_or_else(|| QuillError::Other("unable to determine config directory".to_string()))?
            .join(CONFIG_DIR)
    };

    Ok(config_dir.join(CONFIG_FILE))
}
