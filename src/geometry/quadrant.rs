use serde::{Deserialize, Serialize};

use crate::geometry::types::{Point, Resolution};

/// Screen quadrant of a monitor tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    TopRight = 1,
    TopLeft = 2,
    BottomLeft = 3,
    BottomRight = 4,
}

impl Quadrant {
    /// Quadrant the point lies in, using tile-local coordinates. The midline
    /// itself counts as the right / bottom half.
    pub fn containing(point: Point, tile: Resolution) -> Self {
        let (ox, oy) = tile.tile_origin(point);
        let local_x = point.x as i64 - ox;
        let local_y = point.y as i64 - oy;
        let right = local_x * 2 >= tile.width() as i64;
        let bottom = local_y * 2 >= tile.height() as i64;
        match (right, bottom) {
            (true, false) => Quadrant::TopRight,
            (false, false) => Quadrant::TopLeft,
            (false, true) => Quadrant::BottomLeft,
            (true, true) => Quadrant::BottomRight,
        }
    }

    /// Diagonally opposite quadrant.
    pub fn opposite(self) -> Self {
        match self {
            Quadrant::TopRight => Quadrant::BottomLeft,
            Quadrant::TopLeft => Quadrant::BottomRight,
            Quadrant::BottomLeft => Quadrant::TopRight,
            Quadrant::BottomRight => Quadrant::TopLeft,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Quadrant an overlay should be anchored to so it stays away from `point`.
pub fn placement_quadrant(point: Point, tile: Resolution) -> Quadrant {
    Quadrant::containing(point, tile).opposite()
}

/// Fixed margin kept between a placed panel and the tile edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

/// Top-left position of a `panel_w` x `panel_h` panel anchored to `quadrant`
/// of the tile that contains `point`, in virtual-desktop coordinates.
pub fn corner_anchor(
    quadrant: Quadrant,
    point: Point,
    tile: Resolution,
    padding: Padding,
    panel_w: u32,
    panel_h: u32,
) -> Point {
    let (ox, oy) = tile.tile_origin(point);
    let w = tile.width() as i64;
    let h = tile.height() as i64;
    let px = padding.x as i64;
    let py = padding.y as i64;
    let far_x = w - px - panel_w as i64;
    let far_y = h - py - panel_h as i64;

    let (x, y) = match quadrant {
        Quadrant::TopRight => (far_x, py),
        Quadrant::TopLeft => (px, py),
        Quadrant::BottomLeft => (px, far_y),
        Quadrant::BottomRight => (far_x, far_y),
    };
    Point::new(saturate(ox + x), saturate(oy + y))
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
