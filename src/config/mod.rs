//! Application Configuration
//!
//! User preferences stored in TOML format. The API credential is not part of
//! this file; it lives in the settings store (see `storage::settings`).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::language::Language;

/// Application preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Capture settings
    pub capture: CaptureSettings,
    /// Region selector overlay settings
    pub overlay: OverlaySettings,
    /// Translation API settings
    pub translation: TranslationSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Write the last used language pair back to the config file
    pub remember_languages: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            remember_languages: true,
        }
    }
}

/// Capture-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Time to let the window system apply the hide before reading pixels
    pub settle_delay_ms: u64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 250,
        }
    }
}

/// Region selector overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Fill opacity of the selector window (0.0 - 1.0)
    pub opacity: f32,
    /// Outline color as RGB
    pub border_color: [u8; 3],
    /// Size used when the selector is first created
    pub default_size: (f32, f32),
    /// Position used when the selector is first created
    pub default_position: (f32, f32),
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            opacity: 0.5,
            border_color: [255, 0, 0],
            default_size: (300.0, 200.0),
            default_position: (100.0, 100.0),
        }
    }
}

/// Translation API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Send a test request before accepting a new API key
    pub verify_on_save: bool,
    /// Source language selected at startup
    pub default_source: Language,
    /// Target language selected at startup
    pub default_target: Language,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 60,
            verify_on_save: true,
            default_source: Language::Japanese,
            default_target: Language::English,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert!(config.general.remember_languages);
        assert_eq!(config.capture.settle_delay_ms, 250);

        assert!((config.overlay.opacity - 0.5).abs() < 0.01);
        assert_eq!(config.overlay.border_color, [255, 0, 0]);
        assert_eq!(config.overlay.default_size, (300.0, 200.0));

        assert_eq!(config.translation.api_base, "https://api.openai.com/v1");
        assert_eq!(config.translation.request_timeout_secs, 60);
        assert!(config.translation.verify_on_save);
        assert_eq!(config.translation.default_source, Language::Japanese);
        assert_eq!(config.translation.default_target, Language::English);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.translation.default_source = Language::Korean;
        config.translation.api_base = "http://localhost:8080/v1".to_string();
        config.overlay.opacity = 0.3;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.translation.default_source, Language::Korean);
        assert_eq!(parsed.translation.api_base, "http://localhost:8080/v1");
        assert!((parsed.overlay.opacity - 0.3).abs() < 0.01);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str(
            "[capture]\nsettle_delay_ms = 400\n\n[translation]\ndefault_target = \"korean\"\n",
        )
        .unwrap();

        assert_eq!(parsed.capture.settle_delay_ms, 400);
        assert_eq!(parsed.translation.default_target, Language::Korean);
        assert_eq!(parsed.translation.default_source, Language::Japanese);
        assert_eq!(parsed.translation.request_timeout_secs, 60);
        assert!(parsed.general.remember_languages);
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.capture.settle_delay_ms = 500;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.capture.settle_delay_ms, 500);
        assert_eq!(loaded.overlay.default_position, config.overlay.default_position);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
