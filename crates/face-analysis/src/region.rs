//! Face boxes and expanded crop regions

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Face bounding box as reported by the face locator (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Face box grown by a margin and clamped to the frame (x2/y2 exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl FaceRegion {
    /// Expand a face box by `margin` pixels on every side, clamped to the frame
    ///
    /// Returns `None` when nothing of the region lies inside the frame.
    pub fn expand(face: &FaceBox, frame_width: u32, frame_height: u32, margin: u32) -> Option<Self> {
        let x1 = face.x.saturating_sub(margin);
        let y1 = face.y.saturating_sub(margin);
        let x2 = face
            .x
            .saturating_add(face.width)
            .saturating_add(margin)
            .min(frame_width);
        let y2 = face
            .y
            .saturating_add(face.height)
            .saturating_add(margin)
            .min(frame_height);

        if x1 >= x2 || y1 >= y2 {
            return None;
        }
        Some(Self { x1, y1, x2, y2 })
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Copy the region out of the frame
    pub fn crop(&self, frame: &RgbImage) -> RgbImage {
        image::imageops::crop_imm(frame, self.x1, self.y1, self.width(), self.height()).to_image()
    }
}
