use serde::{Deserialize, Serialize};

use crate::errors::{RulerError, RulerResult};

/// Integer position in virtual-desktop pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of one monitor tile. Both sides are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> RulerResult<Self> {
        if width == 0 || height == 0 {
            return Err(RulerError::InvalidConfiguration(format!(
                "resolution must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Top-left corner of the tile containing `point`.
    ///
    /// Tiles form a uniform grid abutting at multiples of the resolution, so a
    /// point equal to `k * width` belongs to tile `k`. Negative coordinates map
    /// to tiles left of / above the origin.
    pub fn tile_origin(&self, point: Point) -> (i64, i64) {
        let w = self.width as i64;
        let h = self.height as i64;
        (
            (point.x as i64).div_euclid(w) * w,
            (point.y as i64).div_euclid(h) * h,
        )
    }
}

/// Odd-sized magnifier sampling window, so the cursor pixel sits exactly in
/// the middle cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindowSize {
    width: u32,
    height: u32,
}

impl SampleWindowSize {
    pub fn new(width: u32, height: u32) -> RulerResult<Self> {
        if width == 0 || height == 0 {
            return Err(RulerError::InvalidConfiguration(format!(
                "sample window must be at least 1x1, got {width}x{height}"
            )));
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(RulerError::InvalidConfiguration(format!(
                "sample window must have odd dimensions, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels on each side of the centre cell: `(size - 1) / 2` per axis.
    pub fn half_extent(&self) -> (u32, u32) {
        ((self.width - 1) / 2, (self.height - 1) / 2)
    }
}

impl Default for SampleWindowSize {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
        }
    }
}

/// Axis-aligned `[left, right) x [top, bottom)` pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl SamplingRect {
    pub fn width(&self) -> u32 {
        self.right.abs_diff(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.abs_diff(self.top)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Position of `point` relative to the top-left corner, as (row, col).
    pub fn cell_of(&self, point: Point) -> Option<(u32, u32)> {
        if !self.contains(point) {
            return None;
        }
        Some((point.y.abs_diff(self.top), point.x.abs_diff(self.left)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_rejects_zero() {
        assert!(Resolution::new(0, 1080).is_err());
        assert!(Resolution::new(1920, 0).is_err());
        assert!(Resolution::new(1920, 1080).is_ok());
    }

    #[test]
    fn test_sample_window_must_be_odd() {
        assert!(matches!(
            SampleWindowSize::new(20, 21),
            Err(RulerError::InvalidConfiguration(_))
        ));
        assert!(SampleWindowSize::new(0, 1).is_err());
        let w = SampleWindowSize::new(21, 5).unwrap();
        assert_eq!(w.half_extent(), (10, 2));
        assert_eq!(SampleWindowSize::new(1, 1).unwrap().half_extent(), (0, 0));
    }

    #[test]
    fn test_tile_origin_boundaries() {
        let res = Resolution::new(1920, 1080).unwrap();
        assert_eq!(res.tile_origin(Point::new(0, 0)), (0, 0));
        assert_eq!(res.tile_origin(Point::new(1919, 1079)), (0, 0));
        assert_eq!(res.tile_origin(Point::new(1920, 1080)), (1920, 1080));
        assert_eq!(res.tile_origin(Point::new(-1, 5)), (-1920, 0));
    }

    #[test]
    fn test_rect_cell_of() {
        let rect = SamplingRect { left: 10, top: 20, right: 31, bottom: 41 };
        assert_eq!(rect.width(), 21);
        assert_eq!(rect.height(), 21);
        assert_eq!(rect.cell_of(Point::new(20, 30)), Some((10, 10)));
        assert_eq!(rect.cell_of(Point::new(31, 30)), None);
    }

    #[test]
    fn test_rect_size_without_overflow() {
        let wide = SamplingRect { left: i32::MIN, top: -5, right: i32::MAX, bottom: 5 };
        assert_eq!(wide.width(), u32::MAX);
        assert_eq!(wide.height(), 10);
        let flipped = SamplingRect { left: 30, top: 40, right: 10, bottom: 20 };
        assert_eq!(flipped.width(), 20);
        assert_eq!(flipped.height(), 20);
    }
}
