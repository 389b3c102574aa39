//! Capture and locale settings read by the tab controller.
//!
//! Settings are stored in `~/.config/termtabs/settings.yaml`. A missing or
//! empty file yields `Settings::default()`.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings shared between the controller and whoever reloads them.
pub type SharedSettings = Arc<RwLock<Settings>>;

/// Read-only flags consulted when refreshing or creating the capture manager tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Save screen captures into the capture folder
    pub enable_capture_to_folder: bool,

    /// Copy screen captures to the clipboard
    pub enable_capture_to_clipboard: bool,

    /// Bring the capture manager to front after every capture
    pub auto_switch_on_capture: bool,

    /// Locale used for built-in labels (e.g. "en", "de")
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_capture_to_folder: true,
            enable_capture_to_clipboard: true,
            auto_switch_on_capture: true,
            locale: "en".to_string(),
        }
    }
}

impl Settings {
    /// Whether the capture trigger should be offered at all.
    ///
    /// Either capture target being enabled is enough.
    pub fn enabled_capture_to_folder_and_clipboard(&self) -> bool {
        self.enable_capture_to_folder || self.enable_capture_to_clipboard
    }

    /// Whether a capture should switch focus to the capture manager.
    pub fn switches_to_capture_manager(&self) -> bool {
        self.enable_capture_to_folder && self.auto_switch_on_capture
    }

    /// Wrap these settings for sharing with a controller.
    pub fn into_shared(self) -> SharedSettings {
        Arc::new(RwLock::new(self))
    }

    /// Directory holding termtabs configuration files
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termtabs")
    }

    /// Default settings file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.yaml")
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_yaml_ng::from_str(&contents)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;
        settings.validate()?;

        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(ConfigError::from)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents = serde_yaml_ng::to_string(self)
            .map_err(ConfigError::from)
            .context("Failed to serialize settings")?;

        fs::write(path, contents)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        log::info!("Saved settings to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let locale_ok = !self.locale.is_empty()
            && self
                .locale
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !locale_ok {
            return Err(ConfigError::Validation(format!(
                "locale {:?} is not a language tag",
                self.locale
            )));
        }
        Ok(())
    }
}
