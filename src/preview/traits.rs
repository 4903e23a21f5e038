use image::RgbImage;

use crate::errors::RulerResult;
use crate::geometry::SamplingRect;

/// Screen capture backend. Returns the pixels of `rect` row-major from the
/// top-left, exactly `rect.width()` x `rect.height()`.
pub trait PixelSource {
    fn capture(&self, rect: &SamplingRect) -> RulerResult<RgbImage>;
}
