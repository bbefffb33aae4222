//! Dashboard views

pub mod settings;
pub mod translate;

pub use settings::render_settings_dialog;
pub use translate::render_translate_view;
