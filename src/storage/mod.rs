//! Storage Layer
//!
//! Locates the preferences directory and persists the API credential.

pub mod settings;

use anyhow::Result;
use std::path::PathBuf;

pub use settings::{SettingsError, SettingsStore, StoredSettings, DEFAULT_MODEL, SETTINGS_FILE_NAME};

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "screentranslator", "ScreenTranslator")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}
