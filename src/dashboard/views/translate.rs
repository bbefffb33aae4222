//! Translate view - language pair, context, result and the Translate action

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::components::StatusCard;
use crate::dashboard::state::{SettingsDialogState, TranslateViewState};
use crate::dashboard::theme::{self, ThemeColors};
use crate::language::Language;
use crate::shared::{SharedAppState, UiCommand};

/// Render the translate view
pub fn render_translate_view(
    ui: &mut egui::Ui,
    view_state: &mut TranslateViewState,
    dialog: &mut SettingsDialogState,
    shared_state: &Arc<RwLock<SharedAppState>>,
) {
    let (ready, busy, can_translate, status, result_text, current_key) = {
        let state = shared_state.read();
        (
            state.context.is_ready(),
            state.runtime.pipeline_state.is_busy(),
            state.can_translate(),
            state.status(),
            state.runtime.result_text.clone(),
            state.context.settings().credential().map(str::to_string),
        )
    };

    // Services are swapped on save; not while a run is using them
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!busy, theme::secondary_button("⚙ Settings"))
            .clicked()
        {
            dialog.open_with(current_key.as_deref());
        }
        if ui
            .add_enabled(ready, theme::secondary_button("📷 Show Capture"))
            .clicked()
        {
            shared_state.write().runtime.send(UiCommand::ShowCapture);
        }
    });

    ui.add_space(12.0);

    let languages_before = (view_state.source, view_state.target);
    ui.add_enabled_ui(ready, |ui| {
        ui.label(RichText::new("Source Language:").color(ThemeColors::TEXT_SECONDARY));
        ui.horizontal(|ui| {
            language_combo(ui, "source_language", &mut view_state.source);
            if ui
                .add(theme::secondary_button("⇄"))
                .on_hover_text("Swap languages")
                .clicked()
            {
                view_state.swap_languages();
            }
        });

        ui.add_space(4.0);
        ui.label(RichText::new("Target Language:").color(ThemeColors::TEXT_SECONDARY));
        language_combo(ui, "target_language", &mut view_state.target);
    });

    if languages_before != (view_state.source, view_state.target) {
        let mut state = shared_state.write();
        if state.config.general.remember_languages {
            state.config.translation.default_source = view_state.source;
            state.config.translation.default_target = view_state.target;
            state.runtime.send(UiCommand::SaveConfig);
        }
    }

    ui.add_space(12.0);

    ui.label(RichText::new("Context (Optional):").color(ThemeColors::TEXT_SECONDARY));
    ui.add_enabled_ui(ready, |ui| {
        let text_color = if view_state.showing_placeholder() {
            ThemeColors::TEXT_MUTED
        } else {
            ThemeColors::TEXT_PRIMARY
        };
        let response = ui.add(
            egui::TextEdit::multiline(&mut view_state.context_text)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .text_color(text_color),
        );
        if response.gained_focus() {
            view_state.focus_context();
        }
        if response.lost_focus() {
            view_state.blur_context();
        }
    });

    ui.add_space(12.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Translation").color(ThemeColors::TEXT_SECONDARY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!result_text.is_empty(), egui::Button::new("Copy").small())
                .clicked()
            {
                ui.ctx().copy_text(result_text.clone());
            }
        });
    });

    let result_height = (ui.available_height() - 110.0).max(120.0);
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(theme::ROUNDING + 2.0))
        .inner_margin(8.0)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .max_height(result_height)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut result_text.as_str())
                            .desired_width(f32::INFINITY)
                            .frame(false)
                            .font(egui::TextStyle::Body),
                    );
                });
        });

    ui.add_space(12.0);

    let translate = ui.add_enabled(
        can_translate,
        theme::primary_button("Translate").min_size(egui::vec2(ui.available_width(), 36.0)),
    );
    if translate.clicked() {
        let request = view_state.request();
        shared_state.write().runtime.send(UiCommand::Translate(request));
    }

    ui.add_space(12.0);
    StatusCard::new(&status).show(ui);
}

fn language_combo(ui: &mut egui::Ui, id: &str, selected: &mut Language) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.display_name())
        .width(220.0)
        .show_ui(ui, |ui| {
            for language in Language::ALL {
                ui.selectable_value(selected, language, language.display_name());
            }
        });
}
