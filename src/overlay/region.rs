//! Capture region geometry and the drag/resize gestures that edit it
//!
//! Coordinates are screen-space egui points. Gestures are anchored at the
//! press: every update recomputes the region from the rectangle and pointer
//! position recorded when the press began, so the result does not depend on
//! how many intermediate pointer events arrived.

use egui::{Pos2, Vec2};

/// Smallest width or height the resize handle can produce
pub const MIN_REGION_SIZE: f32 = 100.0;

/// Rectangle on screen marking what gets captured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CaptureRegion {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Same size, origin shifted by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Same origin, size grown by `delta` and clamped to the minimum
    pub fn resized(&self, delta: Vec2) -> Self {
        Self {
            width: (self.width + delta.x).max(MIN_REGION_SIZE),
            height: (self.height + delta.y).max(MIN_REGION_SIZE),
            ..*self
        }
    }
}

/// What an in-progress press is doing to the region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    kind: GestureKind,
    press: Pos2,
    start: CaptureRegion,
}

/// The region selector's persistent state
///
/// Hiding keeps every field so the selector reappears where it was left.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    region: CaptureRegion,
    visible: bool,
    /// Set while a capture needs the selector off screen
    suppressed: bool,
    gesture: Option<Gesture>,
    /// Physical pixels per point of the monitor the selector is on
    pixels_per_point: f32,
}

impl RegionSelector {
    pub fn new(region: CaptureRegion) -> Self {
        Self {
            region,
            visible: false,
            suppressed: false,
            gesture: None,
            pixels_per_point: 1.0,
        }
    }

    pub fn region(&self) -> CaptureRegion {
        self.region
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the window should be on screen this frame
    pub fn is_shown(&self) -> bool {
        self.visible && !self.suppressed
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.gesture = None;
    }

    /// Take the selector off screen for a capture without forgetting it was visible
    pub fn suppress(&mut self) {
        self.suppressed = true;
        self.gesture = None;
    }

    pub fn restore(&mut self) {
        self.suppressed = false;
    }

    /// Make the selector visible and take it off screen for a capture
    ///
    /// A selector the user never opened, or closed, still marks what is
    /// captured, so it comes back on screen once the capture finishes.
    pub fn begin_capture(&mut self) {
        self.show();
        self.suppress();
    }

    /// Put the selector back on screen after a capture, success or not
    pub fn finish_capture(&mut self) {
        self.restore();
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        if pixels_per_point > 0.0 {
            self.pixels_per_point = pixels_per_point;
        }
    }

    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.gesture.map(|g| g.kind)
    }

    /// Start a gesture at screen position `pointer`
    pub fn begin(&mut self, kind: GestureKind, pointer: Pos2) {
        self.gesture = Some(Gesture {
            kind,
            press: pointer,
            start: self.region,
        });
    }

    /// Move the pointer of the active gesture to `pointer`
    pub fn update(&mut self, pointer: Pos2) {
        if let Some(gesture) = self.gesture {
            let delta = pointer - gesture.press;
            self.region = match gesture.kind {
                GestureKind::Move => gesture.start.translated(delta),
                GestureKind::Resize => gesture.start.resized(delta),
            };
        }
    }

    pub fn end(&mut self) {
        self.gesture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> RegionSelector {
        RegionSelector::new(CaptureRegion::new(100.0, 100.0, 300.0, 200.0))
    }

    #[test]
    fn test_drag_moves_origin_only() {
        let mut sel = selector();
        sel.begin(GestureKind::Move, Pos2::new(150.0, 150.0));
        sel.update(Pos2::new(170.0, 120.0));
        sel.update(Pos2::new(185.0, 90.0));
        sel.end();

        let region = sel.region();
        assert_eq!(region.origin(), Pos2::new(135.0, 40.0));
        assert_eq!(region.size(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_drag_into_negative_coordinates() {
        let mut sel = selector();
        sel.begin(GestureKind::Move, Pos2::new(0.0, 0.0));
        sel.update(Pos2::new(-250.0, -10.0));

        assert_eq!(sel.region().origin(), Pos2::new(-150.0, 90.0));
    }

    #[test]
    fn test_resize_keeps_origin() {
        let mut sel = selector();
        sel.begin(GestureKind::Resize, Pos2::new(400.0, 300.0));
        sel.update(Pos2::new(450.0, 320.0));

        let region = sel.region();
        assert_eq!(region.origin(), Pos2::new(100.0, 100.0));
        assert_eq!(region.size(), Vec2::new(350.0, 220.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut sel = selector();
        sel.begin(GestureKind::Resize, Pos2::new(400.0, 300.0));

        for (dx, dy) in [(-1000.0, 5.0), (3.0, -999.0), (-250.0, -150.0), (40.0, -300.0)] {
            sel.update(Pos2::new(400.0 + dx, 300.0 + dy));
            let region = sel.region();
            assert!(region.width >= MIN_REGION_SIZE);
            assert!(region.height >= MIN_REGION_SIZE);
        }

        sel.update(Pos2::new(0.0, 0.0));
        assert_eq!(sel.region().size(), Vec2::new(MIN_REGION_SIZE, MIN_REGION_SIZE));
    }

    #[test]
    fn test_resize_recovers_after_clamp() {
        let mut sel = selector();
        sel.begin(GestureKind::Resize, Pos2::new(400.0, 300.0));
        sel.update(Pos2::new(0.0, 0.0));
        // Delta is measured from the press, so moving back restores the size
        sel.update(Pos2::new(400.0, 300.0));

        assert_eq!(sel.region().size(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_update_without_gesture_is_noop() {
        let mut sel = selector();
        sel.update(Pos2::new(999.0, 999.0));
        assert_eq!(sel.region(), CaptureRegion::new(100.0, 100.0, 300.0, 200.0));
    }

    #[test]
    fn test_hide_preserves_region() {
        let mut sel = selector();
        sel.show();
        sel.begin(GestureKind::Move, Pos2::ZERO);
        sel.update(Pos2::new(10.0, 10.0));
        sel.hide();

        assert!(!sel.is_visible());
        assert!(sel.active_gesture().is_none());
        assert_eq!(sel.region().origin(), Pos2::new(110.0, 110.0));

        sel.show();
        assert!(sel.is_shown());
    }

    #[test]
    fn test_suppress_and_restore() {
        let mut sel = selector();
        sel.show();
        sel.suppress();
        assert!(sel.is_visible());
        assert!(!sel.is_shown());

        sel.restore();
        assert!(sel.is_shown());
    }

    #[test]
    fn test_pixels_per_point_rejects_nonpositive() {
        let mut sel = selector();
        sel.set_pixels_per_point(2.0);
        sel.set_pixels_per_point(0.0);
        assert_eq!(sel.pixels_per_point(), 2.0);
    }

    #[test]
    fn test_capture_shows_hidden_selector_afterwards() {
        let mut sel = selector();
        assert!(!sel.is_visible());

        sel.begin_capture();
        assert!(sel.is_visible());
        assert!(!sel.is_shown());

        sel.finish_capture();
        assert!(sel.is_shown());
        assert_eq!(sel.region(), CaptureRegion::new(100.0, 100.0, 300.0, 200.0));
    }

    #[test]
    fn test_capture_after_close_button() {
        let mut sel = selector();
        sel.show();
        sel.hide();

        sel.begin_capture();
        sel.finish_capture();
        assert!(sel.is_shown());
    }
}
