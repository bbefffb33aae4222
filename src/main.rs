//! Screen Translator - capture a screen region, read its text and translate it
//!
//! A small always-available window plus a movable capture frame. Pressing
//! Translate reads the pixels under the frame, runs OCR for the source
//! language and sends the text to a hosted chat model.

mod capture;
mod config;
mod dashboard;
mod language;
mod overlay;
mod pipeline;
mod shared;
mod storage;
mod translation;
mod vision;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::AppConfig;
use crate::dashboard::TranslatorApp;
use crate::shared::{AppContext, SharedAppState};
use crate::storage::{SettingsStore, SETTINGS_FILE_NAME};

/// Screen Translator - OCR and translate any part of the screen
#[derive(Parser, Debug)]
#[command(name = "screen-translator")]
#[command(about = "Capture a screen region, extract its text and translate it")]
struct Args {
    /// Settings file holding the API key
    #[arg(long, default_value = SETTINGS_FILE_NAME)]
    settings: PathBuf,

    /// Preferences file (defaults to config.toml in the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Variables from .env feed the API key fallback
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to read .env: {}", e),
    }

    info!("Screen Translator starting...");

    let config_path = resolve_config_path(args.config);
    let config = load_or_create_config(config_path.as_deref());

    let settings_store = SettingsStore::new(args.settings);
    info!("Using settings file {:?}", settings_store.path());
    let settings = settings_store.load();

    let extractor = match vision::default_extractor() {
        Ok(extractor) => Some(extractor),
        Err(e) => {
            warn!("Error initializing OCR: {}", e);
            None
        }
    };
    let context = AppContext::build(settings, extractor, &config.translation);
    if !context.has_credential() {
        warn!("No API key found in settings or environment");
    }

    let shared_state = Arc::new(RwLock::new(SharedAppState::new(config, context)));
    let app = TranslatorApp::new(shared_state, settings_store, config_path)
        .context("failed to start worker runtime")?;

    dashboard::app::run_dashboard(app).map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    info!("Screen Translator shutdown complete");

    Ok(())
}

/// `--config`, else `config.toml` in the platform config directory
fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    match storage::get_config_dir() {
        Ok(dir) => Some(dir.join("config.toml")),
        Err(e) => {
            warn!("No config directory available: {}", e);
            None
        }
    }
}

/// Load configuration from file or create default
fn load_or_create_config(path: Option<&std::path::Path>) -> AppConfig {
    if let Some(path) = path {
        if path.exists() {
            match config::load_config(path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", path);
                    return config;
                }
                Err(e) => warn!("Error loading configuration from {:?}: {}", path, e),
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}
