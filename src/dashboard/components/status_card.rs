//! Status card component for the single status line

use egui::{Color32, RichText, Rounding, Vec2};

use crate::dashboard::theme::{self, ThemeColors};
use crate::shared::{StatusLevel, StatusLine};

/// A card displaying the current status
pub struct StatusCard<'a> {
    line: &'a StatusLine,
}

/// Dot color for a status level
pub fn status_color(level: StatusLevel) -> Color32 {
    match level {
        StatusLevel::Idle => ThemeColors::TEXT_SECONDARY,
        StatusLevel::Working => ThemeColors::ACCENT,
        StatusLevel::Success => ThemeColors::SUCCESS,
        StatusLevel::Error => ThemeColors::ERROR,
    }
}

impl<'a> StatusCard<'a> {
    pub fn new(line: &'a StatusLine) -> Self {
        Self { line }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let color = status_color(self.line.level);
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(theme::ROUNDING + 2.0))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.horizontal(|ui| {
                    // Status indicator dot
                    let dot_center = ui.cursor().left_top() + Vec2::new(6.0, 10.0);
                    ui.painter().circle_filled(dot_center, 4.0, color);
                    ui.add_space(16.0);

                    let text_color = if self.line.level == StatusLevel::Error {
                        color
                    } else {
                        ThemeColors::TEXT_PRIMARY
                    };
                    ui.label(RichText::new(&self.line.text).size(14.0).color(text_color));

                    if self.line.level == StatusLevel::Working {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spinner();
                        });
                    }
                });
            });
    }
}
