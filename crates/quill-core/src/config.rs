//! Configuration for quill
//!
//! Read from `config.toml` in the quill config directory, or from an
//! explicit path. Every section is optional; missing keys take defaults.

pub mod global;
pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{QuillError, Result};

pub use types::{GroupingConfig, LinksConfig, QuillConfig, SearchConfig, TitleConfig};

impl QuillConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: QuillConfig =
            toml::from_str(&content).map_err(|e| QuillError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Load from the global config location, falling back to defaults
    pub fn discover() -> Result<Self> {
        let path = global::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| QuillError::failed_operation("serialize config", e))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let reason = if self.grouping.batch_size == 0 {
            "grouping.batch_size must be at least 1"
        } else if self.grouping.max_resident_batches == 0 {
            "grouping.max_resident_batches must be at least 1"
        } else {
            return Ok(());
        };
        Err(QuillError::InvalidConfig {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })
    }
}
