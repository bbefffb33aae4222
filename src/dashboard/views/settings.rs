//! Settings dialog - API key entry

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::state::SettingsDialogState;
use crate::dashboard::theme::{self, ThemeColors};
use crate::shared::{SharedAppState, UiCommand};

/// Render the settings dialog if it is open
pub fn render_settings_dialog(
    ctx: &egui::Context,
    dialog: &mut SettingsDialogState,
    shared_state: &Arc<RwLock<SharedAppState>>,
) {
    if !dialog.open {
        return;
    }

    let model = shared_state.read().context.model().to_string();
    let mut window_open = true;

    egui::Window::new("Settings")
        .open(&mut window_open)
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(RichText::new("OpenAI API Key:").color(ThemeColors::TEXT_SECONDARY));
            ui.add(
                egui::TextEdit::singleline(&mut dialog.api_key_input)
                    .password(!dialog.show_key)
                    .desired_width(f32::INFINITY),
            );
            ui.checkbox(&mut dialog.show_key, "Show API Key");

            ui.add_space(12.0);

            ui.label(RichText::new("Model:").color(ThemeColors::TEXT_SECONDARY));
            ui.add_enabled_ui(false, |ui| {
                egui::ComboBox::from_id_salt("settings_model")
                    .selected_text(model.as_str())
                    .width(ui.available_width())
                    .show_ui(ui, |_ui| {});
            });

            ui.add_space(16.0);

            let save = ui.add_enabled(
                !dialog.verifying,
                theme::primary_button("Save Settings").min_size(egui::vec2(ui.available_width(), 32.0)),
            );
            if save.clicked() {
                let api_key = dialog.api_key_input.trim().to_string();
                if api_key.is_empty() {
                    dialog.set_error("API key is required");
                } else {
                    dialog.error = None;
                    dialog.verifying = true;
                    shared_state
                        .write()
                        .runtime
                        .send(UiCommand::SaveSettings { api_key });
                }
            }

            if dialog.verifying {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Checking connection...").color(ThemeColors::TEXT_SECONDARY));
                });
            }

            if let Some(error) = &dialog.error {
                ui.add_space(8.0);
                ui.label(RichText::new(format!("Error: {}", error)).color(ThemeColors::ERROR));
            }
        });

    if !window_open {
        dialog.close();
    }
}
