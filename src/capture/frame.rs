//! Frame data structures for captured screen content

use image::RgbImage;
use std::time::Instant;

/// A captured screen region
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Interleaved RGB pixels
    pub image: RgbImage,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Create a new captured frame
    pub fn new(image: RgbImage) -> Self {
        Self {
            image,
            timestamp: Instant::now(),
        }
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Consume the frame, keeping only the pixels
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
