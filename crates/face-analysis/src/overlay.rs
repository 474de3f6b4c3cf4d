//! Overlay drawing and display scaling

use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::FaceAnnotation;

/// Box color used for classified faces
pub const OVERLAY_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Box outline thickness in pixels
const LINE_THICKNESS: u32 = 2;

/// Draw a box around every classified face
///
/// Captions are left to the display layer, which has the fonts.
pub fn draw_annotations(frame: &mut RgbImage, annotations: &[FaceAnnotation], color: Rgb<u8>) {
    for annotation in annotations {
        let region = &annotation.region;
        for inset in 0..LINE_THICKNESS {
            let (width, height) = (region.width(), region.height());
            if width <= 2 * inset || height <= 2 * inset {
                break;
            }
            let rect = Rect::at((region.x1 + inset) as i32, (region.y1 + inset) as i32)
                .of_size(width - 2 * inset, height - 2 * inset);
            draw_hollow_rect_mut(frame, rect, color);
        }
    }
}

/// Scale a frame to the display size
pub fn fit_to_display(frame: &RgbImage, width: u32, height: u32) -> RgbImage {
    if frame.dimensions() == (width, height) {
        return frame.clone();
    }
    image::imageops::resize(frame, width, height, FilterType::Triangle)
}
