//! Region Selector Overlay
//!
//! An undecorated, always-on-top, semi-transparent window the user drags and
//! resizes over the text to capture. The window is an immediate egui viewport
//! that follows the `RegionSelector` state every frame.

pub mod region;
pub mod widgets;

use egui::{Sense, ViewportBuilder, ViewportCommand, ViewportId};

pub use region::{CaptureRegion, GestureKind, RegionSelector, MIN_REGION_SIZE};
pub use widgets::SelectorStyle;

use crate::config::OverlaySettings;

/// Viewport id of the selector window
pub fn selector_viewport_id() -> ViewportId {
    ViewportId::from_hash_of("region_selector")
}

/// Create a selector at the configured default position and size
pub fn create_selector(settings: &OverlaySettings) -> RegionSelector {
    let (x, y) = settings.default_position;
    let (width, height) = settings.default_size;
    RegionSelector::new(CaptureRegion::new(
        x,
        y,
        width.max(MIN_REGION_SIZE),
        height.max(MIN_REGION_SIZE),
    ))
}

/// Render the selector window for this frame
///
/// Must be called every frame once the selector exists; when it is not shown
/// the window stays alive but invisible.
pub fn render_region_selector(ctx: &egui::Context, selector: &mut RegionSelector, style: &SelectorStyle) {
    let region = selector.region();
    let builder = ViewportBuilder::default()
        .with_title("Capture Region")
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top()
        .with_resizable(false)
        .with_taskbar(false)
        .with_position(region.origin())
        .with_inner_size(region.size())
        .with_visible(selector.is_shown());

    ctx.show_viewport_immediate(selector_viewport_id(), builder, |ctx, _class| {
        if ctx.input(|i| i.viewport().close_requested()) {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
            selector.hide();
            return;
        }

        if let Some(ppp) = ctx.input(|i| i.viewport().native_pixels_per_point) {
            selector.set_pixels_per_point(ppp);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(style.fill))
            .show(ctx, |ui| {
                let window = ui.max_rect();
                let body = ui.interact(window, ui.id().with("body"), Sense::drag());
                let handle_rect = style.handle_rect(window);
                let handle = ui.interact(handle_rect, ui.id().with("resize"), Sense::drag());

                let close_clicked = ui
                    .put(
                        style.close_rect(window),
                        egui::Button::new(egui::RichText::new("×").color(egui::Color32::WHITE))
                            .fill(style.accent),
                    )
                    .clicked();

                // Screen position = viewport origin + pointer position inside it
                let pointer = ctx.input(|i| {
                    let origin = i.viewport().inner_rect.map(|r| r.min.to_vec2()).unwrap_or_default();
                    i.pointer.interact_pos().map(|p| p + origin)
                });

                if let Some(pointer) = pointer {
                    if handle.drag_started() {
                        selector.begin(GestureKind::Resize, pointer);
                    } else if body.drag_started() {
                        selector.begin(GestureKind::Move, pointer);
                    }

                    if handle.dragged() || body.dragged() {
                        selector.update(pointer);
                    }
                }

                if handle.drag_stopped() || body.drag_stopped() {
                    selector.end();
                }

                if handle.hovered() || selector.active_gesture() == Some(GestureKind::Resize) {
                    ctx.set_cursor_icon(egui::CursorIcon::ResizeNwSe);
                } else if selector.active_gesture() == Some(GestureKind::Move) {
                    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                }

                let painter = ui.painter();
                widgets::draw_outline(painter, window, style);
                widgets::draw_handle(painter, handle_rect, handle.hovered(), style);

                if close_clicked {
                    selector.hide();
                }
            });

        if selector.active_gesture().is_some() {
            ctx.request_repaint();
        }
    });
}
