//! Dark look for the translator window
//!
//! One rounding radius for every widget and window, a blue accent for the
//! Translate action and focused fields, and a text size large enough for CJK
//! glyphs in the result area.

use egui::{Color32, Rounding, Stroke, TextStyle, Visuals};

/// Corner radius shared by buttons, fields and the result frame
pub const ROUNDING: f32 = 6.0;

/// Point size of body and button text
const TEXT_SIZE: f32 = 15.0;

/// Dark color palette
pub struct ThemeColors;

impl ThemeColors {
    pub const BG_DARK: Color32 = Color32::from_rgb(18, 18, 24);
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(28, 28, 36);
    pub const BG_LIGHT: Color32 = Color32::from_rgb(38, 38, 48);
    pub const BG_HOVER: Color32 = Color32::from_rgb(48, 48, 60);

    pub const ACCENT: Color32 = Color32::from_rgb(88, 166, 255);
    pub const SUCCESS: Color32 = Color32::from_rgb(46, 204, 113);
    pub const ERROR: Color32 = Color32::from_rgb(231, 76, 60);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 175);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 100, 115);

    pub const BORDER: Color32 = Color32::from_rgb(50, 50, 65);
}

/// Install the dark style on `ctx`
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let mut visuals = Visuals::dark();

    visuals.panel_fill = ThemeColors::BG_DARK;
    visuals.window_fill = ThemeColors::BG_MEDIUM;
    visuals.extreme_bg_color = ThemeColors::BG_DARK;
    visuals.faint_bg_color = ThemeColors::BG_LIGHT;
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);
    visuals.window_rounding = Rounding::same(ROUNDING + 2.0);
    visuals.menu_rounding = Rounding::same(ROUNDING);

    let widgets = &mut visuals.widgets;
    for (widget, fill, text) in [
        (&mut widgets.noninteractive, ThemeColors::BG_MEDIUM, ThemeColors::TEXT_SECONDARY),
        (&mut widgets.inactive, ThemeColors::BG_LIGHT, ThemeColors::TEXT_PRIMARY),
        (&mut widgets.hovered, ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY),
        (&mut widgets.active, ThemeColors::ACCENT, ThemeColors::TEXT_PRIMARY),
        (&mut widgets.open, ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.fg_stroke = Stroke::new(1.0, text);
        widget.rounding = Rounding::same(ROUNDING);
    }

    let accent = ThemeColors::ACCENT;
    visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(accent.r(), accent.g(), accent.b(), 77);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    for text_style in [TextStyle::Body, TextStyle::Button] {
        if let Some(font) = style.text_styles.get_mut(&text_style) {
            font.size = TEXT_SIZE;
        }
    }

    ctx.set_style(style);
}

/// Filled accent button for Translate
pub fn primary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE).strong())
        .fill(ThemeColors::ACCENT)
        .rounding(Rounding::same(ROUNDING))
}

/// Outlined button for Settings, Show Capture and the dialog actions
pub fn secondary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(ThemeColors::TEXT_PRIMARY))
        .fill(ThemeColors::BG_LIGHT)
        .stroke(Stroke::new(1.0, ThemeColors::BORDER))
        .rounding(Rounding::same(ROUNDING))
}
