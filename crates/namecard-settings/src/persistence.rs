//! Settings Persistence
//!
//! Locates, loads and saves the editor configuration in the platform's
//! configuration directory.

use crate::config::Config;
use crate::error::{Result, SettingsError};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "namecard";
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Create a persistence layer bound to `path` with default config
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            path: path.into(),
        }
    }

    /// Default config file location, `<config dir>/namecard/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load settings from file
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = Config::load_from_file(&path)?;
        Ok(Self { config, path })
    }

    /// Load settings from file, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::new(path);
        }

        match Config::load_from_file(&path) {
            Ok(config) => Self { config, path },
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::new(path)
            }
        }
    }

    /// Save settings to the bound path, creating parent directories.
    pub fn save(&self) -> Result<()> {
        Self::ensure_parent_dir(&self.path)?;
        self.config.save_to_file(&self.path)
    }

    fn ensure_parent_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
