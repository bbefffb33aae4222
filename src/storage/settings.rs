//! Credential persistence
//!
//! A flat JSON record holding the API key and the model identifier. The key
//! falls back to the environment when the file does not provide one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default settings file, resolved against the working directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// The only model offered for translation
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Environment variables consulted, in order, when the file has no key
pub const API_KEY_ENV_VARS: [&str; 2] = ["OPENAI_API_KEY", "api_key"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted settings record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for StoredSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
        }
    }
}

impl StoredSettings {
    /// Record for a freshly entered key, always paired with the fixed model
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            model: default_model(),
        }
    }

    /// The credential, if present and non-empty
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// Reads and writes the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SETTINGS_FILE_NAME)
    }
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings using the process environment for the key fallback
    pub fn load(&self) -> StoredSettings {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Load settings, resolving the key fallback through `env`
    ///
    /// A missing or unreadable file yields defaults; the environment is only
    /// consulted when the file has no non-empty key.
    pub fn load_with_env<F>(&self, env: F) -> StoredSettings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = self.read_file().unwrap_or_default();

        if settings.credential().is_none() {
            let from_env = API_KEY_ENV_VARS
                .iter()
                .find_map(|name| env(name).filter(|value| !value.is_empty()).map(|v| (*name, v)));
            if let Some((name, key)) = from_env {
                debug!("Using API key from environment variable {}", name);
                settings.api_key = Some(key);
            }
        }

        settings
    }

    fn read_file(&self) -> Option<StoredSettings> {
        if !self.path.exists() {
            debug!("No settings file at {:?}", self.path);
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error loading settings from {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", self.path);
                Some(settings)
            }
            Err(e) => {
                warn!("Error parsing settings from {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Overwrite the settings file with `settings`
    pub fn save(&self, settings: &StoredSettings) -> Result<(), SettingsError> {
        if settings.credential().is_none() {
            return Err(SettingsError::MissingApiKey);
        }

        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn store_with(dir: &TempDir, content: Option<&str>) -> SettingsStore {
        let path = dir.path().join(SETTINGS_FILE_NAME);
        if let Some(content) = content {
            std::fs::write(&path, content).unwrap();
        }
        SettingsStore::new(path)
    }

    #[test]
    fn test_env_used_when_file_lacks_key() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some(r#"{"model": "gpt-4o-mini"}"#));

        let settings = store.load_with_env(env_from(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(settings.credential(), Some("sk-env"));
    }

    #[test]
    fn test_file_key_wins_over_env() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some(r#"{"api_key": "sk-file", "model": "gpt-4o-mini"}"#));

        let settings = store.load_with_env(env_from(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(settings.credential(), Some("sk-file"));
    }

    #[test]
    fn test_empty_file_key_falls_back_to_env() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some(r#"{"api_key": ""}"#));

        let settings = store.load_with_env(env_from(&[("api_key", "sk-lower")]));
        assert_eq!(settings.credential(), Some("sk-lower"));
    }

    #[test]
    fn test_openai_env_var_preferred() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, None);

        let settings = store.load_with_env(env_from(&[
            ("api_key", "sk-lower"),
            ("OPENAI_API_KEY", "sk-upper"),
        ]));
        assert_eq!(settings.credential(), Some("sk-upper"));
    }

    #[test]
    fn test_no_credential_anywhere() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, None);

        let settings = store.load_with_env(env_from(&[]));
        assert_eq!(settings.credential(), None);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_malformed_file_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some("{not json"));

        let settings = store.load_with_env(env_from(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(settings.credential(), Some("sk-env"));
    }

    #[test]
    fn test_save_overwrites_and_reloads() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some(r#"{"api_key": "old", "model": "other", "extra": 1}"#));

        store.save(&StoredSettings::with_api_key("sk-new")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["api_key"], "sk-new");
        assert_eq!(raw["model"], DEFAULT_MODEL);
        assert!(raw.get("extra").is_none());

        let settings = store.load_with_env(env_from(&[]));
        assert_eq!(settings.credential(), Some("sk-new"));
    }

    #[test]
    fn test_save_rejects_blank_key() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, None);

        let err = store.save(&StoredSettings::with_api_key("   ")).unwrap_err();
        assert!(matches!(err, SettingsError::MissingApiKey));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_error_propagates() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("missing").join(SETTINGS_FILE_NAME));

        let err = store.save(&StoredSettings::with_api_key("sk")).unwrap_err();
        assert!(matches!(err, SettingsError::Write { .. }));
    }
}
