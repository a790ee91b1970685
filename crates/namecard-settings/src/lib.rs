//! Namecard Settings Crate
//!
//! Handles editor configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{AssetSettings, CanvasSettings, Config, GuideSettings, PaperSettings, TextSettings};
pub use error::{ConfigError, SettingsError};
pub use persistence::SettingsPersistence;
