//! Painting helpers for the region selector window

use egui::{Color32, Pos2, Rect, Rounding, Stroke, Vec2};

use crate::config::OverlaySettings;

/// Visual style of the region selector
#[derive(Debug, Clone)]
pub struct SelectorStyle {
    /// Window fill, alpha carries the configured opacity
    pub fill: Color32,
    /// Outline and control color
    pub accent: Color32,
    /// Darker accent for hovered controls
    pub accent_hover: Color32,
    /// Outline width
    pub border_width: f32,
    /// Edge length of the close button and resize handle
    pub control_size: f32,
}

impl Default for SelectorStyle {
    fn default() -> Self {
        Self::from_settings(&OverlaySettings::default())
    }
}

impl SelectorStyle {
    pub fn from_settings(settings: &OverlaySettings) -> Self {
        let [r, g, b] = settings.border_color;
        let alpha = (settings.opacity.clamp(0.05, 1.0) * 255.0) as u8;
        Self {
            fill: Color32::from_rgba_unmultiplied(40, 40, 48, alpha),
            accent: Color32::from_rgb(r, g, b),
            accent_hover: Color32::from_rgb(r / 2, g / 2, b / 2),
            border_width: 2.0,
            control_size: 20.0,
        }
    }

    /// Close button area in the top-right corner of `window`
    pub fn close_rect(&self, window: Rect) -> Rect {
        Rect::from_min_size(
            Pos2::new(window.max.x - self.control_size, window.min.y),
            Vec2::splat(self.control_size),
        )
    }

    /// Resize handle area in the bottom-right corner of `window`
    pub fn handle_rect(&self, window: Rect) -> Rect {
        Rect::from_min_size(window.max - Vec2::splat(self.control_size), Vec2::splat(self.control_size))
    }
}

/// Draw the capture boundary
pub fn draw_outline(painter: &egui::Painter, window: Rect, style: &SelectorStyle) {
    painter.rect_stroke(
        window.shrink(style.border_width / 2.0),
        Rounding::ZERO,
        Stroke::new(style.border_width, style.accent),
    );
}

/// Draw the resize handle with a diagonal grip
pub fn draw_handle(painter: &egui::Painter, rect: Rect, hovered: bool, style: &SelectorStyle) {
    let fill = if hovered { style.accent_hover } else { style.accent };
    painter.rect_filled(rect, Rounding::ZERO, fill);

    let stroke = Stroke::new(1.5, Color32::WHITE);
    for inset in [5.0, 10.0] {
        painter.line_segment(
            [
                Pos2::new(rect.max.x - 3.0, rect.min.y + inset),
                Pos2::new(rect.min.x + inset, rect.max.y - 3.0),
            ],
            stroke,
        );
    }
}
