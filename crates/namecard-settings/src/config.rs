//! Configuration for the namecard editor
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Paper size and safe margin
//! - Guide visibility
//! - Canvas defaults
//! - Text defaults for newly created fields
//! - Asset lookup for relative image references

use crate::error::{ConfigError, Result, SettingsError};
use namecard_core::units::{cm_to_px, PaperSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paper settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperSettings {
    /// Paper width in centimeters
    pub width_cm: f64,
    /// Paper height in centimeters
    pub height_cm: f64,
    /// Safe print margin in centimeters
    pub margin_cm: f64,
}

impl PaperSettings {
    pub fn size(&self) -> PaperSize {
        PaperSize::new(self.width_cm, self.height_cm)
    }
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            width_cm: PaperSize::BADGE.width_cm,
            height_cm: PaperSize::BADGE.height_cm,
            margin_cm: 0.5,
        }
    }
}

/// Guide overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideSettings {
    /// Show border, margin and center guides
    pub show: bool,
    /// Show the paper size label on new default templates
    pub show_size_label: bool,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            show: true,
            show_size_label: true,
        }
    }
}

/// Canvas defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Background fill color
    pub background_color: String,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Text defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Font family for new text fields
    pub font_family: String,
    /// Fill color for new text fields
    pub default_fill: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font_family: "Noto Sans KR".to_string(),
            default_fill: "#000000".to_string(),
        }
    }
}

/// Asset lookup settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory that relative image references resolve against
    pub base_dir: Option<PathBuf>,
}

/// Complete editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paper: PaperSettings,
    pub guides: GuideSettings,
    pub canvas: CanvasSettings,
    pub text: TextSettings,
    pub assets: AssetSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.paper.size().is_valid() {
            return Err(ConfigError::invalid(
                "paper",
                format!(
                    "paper size must be positive, got {}x{}",
                    self.paper.width_cm, self.paper.height_cm
                ),
            ));
        }

        if !self.paper.margin_cm.is_finite() || self.paper.margin_cm < 0.0 {
            return Err(ConfigError::invalid(
                "paper.margin_cm",
                "margin must be a non-negative number",
            ));
        }

        let (w, h) = self.paper.size().to_px();
        let inset = cm_to_px(self.paper.margin_cm) * 2.0;
        if inset >= w || inset >= h {
            return Err(ConfigError::invalid(
                "paper.margin_cm",
                "margin leaves no printable area",
            ));
        }

        if self.canvas.background_color.trim().is_empty() {
            return Err(ConfigError::invalid(
                "canvas.background_color",
                "color must not be empty",
            ));
        }

        if self.text.font_family.trim().is_empty() {
            return Err(ConfigError::invalid(
                "text.font_family",
                "font family must not be empty",
            ));
        }

        Ok(())
    }

    /// Resolve an image reference against the configured asset directory.
    ///
    /// URLs and absolute paths are returned unchanged.
    pub fn resolve_asset(&self, source_ref: &str) -> String {
        if source_ref.contains("://") || source_ref.starts_with("data:") {
            return source_ref.to_string();
        }
        match &self.assets.base_dir {
            Some(base) if Path::new(source_ref).is_relative() => {
                base.join(source_ref).to_string_lossy().into_owned()
            }
            _ => source_ref.to_string(),
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
