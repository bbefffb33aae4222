//! Screen Capture Layer
//!
//! Reads the pixels under a screen rectangle. The platform primitive sits
//! behind `ScreenGrabber`; callers are responsible for hiding their own
//! windows before calling it.

pub mod frame;

use image::{Rgb, RgbImage, RgbaImage};
use thiserror::Error;
use tracing::debug;

pub use frame::CapturedFrame;

use crate::overlay::CaptureRegion;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },

    #[error("no monitor contains point ({x}, {y})")]
    NoMonitor { x: i32, y: i32 },

    #[error("screen capture failed: {0}")]
    Platform(#[from] xcap::XCapError),
}

/// A rectangle in physical screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Convert a region in points to physical pixels
    pub fn from_region(region: &CaptureRegion, pixels_per_point: f32) -> Self {
        let scale = if pixels_per_point > 0.0 { pixels_per_point } else { 1.0 };
        Self {
            x: (region.x * scale).round() as i32,
            y: (region.y * scale).round() as i32,
            width: (region.width * scale).round().max(0.0) as u32,
            height: (region.height * scale).round().max(0.0) as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The platform screenshot capability
pub trait ScreenGrabber: Send + Sync {
    /// Read the pixels inside `rect`; the result is exactly `rect.width` x `rect.height`
    fn grab(&self, rect: PixelRect) -> Result<CapturedFrame, CaptureError>;
}

/// Screenshot backend built on `xcap`
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapGrabber;

impl ScreenGrabber for XcapGrabber {
    fn grab(&self, rect: PixelRect) -> Result<CapturedFrame, CaptureError> {
        if rect.is_empty() {
            return Err(CaptureError::EmptyRegion {
                width: rect.width,
                height: rect.height,
            });
        }

        let monitor = xcap::Monitor::from_point(rect.x, rect.y).map_err(|e| {
            debug!("Monitor lookup failed: {}", e);
            CaptureError::NoMonitor { x: rect.x, y: rect.y }
        })?;

        let origin = (monitor.x()?, monitor.y()?);
        let screen = monitor.capture_image()?;
        debug!(
            "Captured monitor at {:?} ({}x{}), cropping to {:?}",
            origin,
            screen.width(),
            screen.height(),
            rect
        );

        Ok(CapturedFrame::new(crop_to_rect(&screen, origin, rect)))
    }
}

/// Copy `rect` out of a monitor screenshot whose top-left is at `origin`
///
/// Parts of `rect` outside the screenshot are left black so the output
/// always has the requested dimensions.
pub fn crop_to_rect(screen: &RgbaImage, origin: (i32, i32), rect: PixelRect) -> RgbImage {
    let mut out = RgbImage::from_pixel(rect.width, rect.height, Rgb([0, 0, 0]));

    let offset_x = i64::from(rect.x) - i64::from(origin.0);
    let offset_y = i64::from(rect.y) - i64::from(origin.1);

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let sx = offset_x + i64::from(x);
        let sy = offset_y + i64::from(y);
        if sx < 0 || sy < 0 || sx >= i64::from(screen.width()) || sy >= i64::from(screen.height()) {
            continue;
        }
        let [r, g, b, _] = screen.get_pixel(sx as u32, sy as u32).0;
        *pixel = Rgb([r, g, b]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn test_pixel_rect_scales() {
        let region = CaptureRegion::new(10.0, 20.5, 300.0, 200.0);
        let rect = PixelRect::from_region(&region, 1.5);
        assert_eq!(
            rect,
            PixelRect {
                x: 15,
                y: 31,
                width: 450,
                height: 300
            }
        );
    }

    #[test]
    fn test_pixel_rect_bad_scale_falls_back() {
        let region = CaptureRegion::new(1.0, 2.0, 100.0, 100.0);
        let rect = PixelRect::from_region(&region, 0.0);
        assert_eq!(rect.width, 100);
        assert_eq!(rect.x, 1);
    }

    #[test]
    fn test_crop_inside_screen() {
        let screen = gradient(64, 64);
        let rect = PixelRect {
            x: 110,
            y: 205,
            width: 10,
            height: 4,
        };
        let out = crop_to_rect(&screen, (100, 200), rect);

        assert_eq!(out.dimensions(), (10, 4));
        assert_eq!(out.get_pixel(0, 0), &Rgb([10, 5, 7]));
        assert_eq!(out.get_pixel(9, 3), &Rgb([19, 8, 7]));
    }

    #[test]
    fn test_crop_outside_is_black() {
        let screen = gradient(8, 8);
        let rect = PixelRect {
            x: 4,
            y: -2,
            width: 8,
            height: 4,
        };
        let out = crop_to_rect(&screen, (0, 0), rect);

        assert_eq!(out.dimensions(), (8, 4));
        // Rows above the screen
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        // Columns past the right edge
        assert_eq!(out.get_pixel(5, 3), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(1, 2), &Rgb([5, 0, 7]));
    }

    #[test]
    fn test_grab_rejects_empty_rect() {
        let rect = PixelRect {
            x: 0,
            y: 0,
            width: 0,
            height: 10,
        };
        let err = XcapGrabber.grab(rect).unwrap_err();
        assert!(matches!(err, CaptureError::EmptyRegion { .. }));
    }
}
