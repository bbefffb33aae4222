//! Dashboard UI Module
//!
//! The main translator window: language pair, context, result area, the
//! Translate action and the settings dialog.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::TranslatorApp;
pub use state::DashboardState;
