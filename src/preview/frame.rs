/// In-memory capture backend over an already grabbed desktop frame.
use image::RgbImage;

use crate::errors::{RulerError, RulerResult};
use crate::geometry::{Point, SamplingRect};
use crate::preview::traits::PixelSource;

pub struct FrameSource {
    frame: RgbImage,
    /// Virtual-desktop position of the frame's top-left pixel.
    origin: Point,
}

impl FrameSource {
    pub fn new(frame: RgbImage, origin: Point) -> Self {
        Self { frame, origin }
    }
}

impl PixelSource for FrameSource {
    fn capture(&self, rect: &SamplingRect) -> RulerResult<RgbImage> {
        let x = rect.left as i64 - self.origin.x as i64;
        let y = rect.top as i64 - self.origin.y as i64;
        let (w, h) = (rect.width() as i64, rect.height() as i64);
        let (fw, fh) = self.frame.dimensions();

        if x < 0 || y < 0 || x + w > fw as i64 || y + h > fh as i64 {
            return Err(RulerError::Capture(format!(
                "rect {rect:?} outside frame {fw}x{fh} at ({}, {})",
                self.origin.x, self.origin.y
            )));
        }

        Ok(image::imageops::crop_imm(&self.frame, x as u32, y as u32, w as u32, h as u32).to_image())
    }
}
