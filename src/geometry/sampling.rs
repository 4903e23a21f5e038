/// Magnifier sampling region: the fixed-size pixel neighbourhood around the
/// cursor, clamped so it never leaves the monitor tile the cursor is on.
use crate::errors::{RulerError, RulerResult};
use crate::geometry::types::{Point, Resolution, SampleWindowSize, SamplingRect};

/// Compute the rectangle to capture for the live preview.
///
/// The window is centred on `point` when it fits; near an edge it is pushed
/// back inside the tile so it always keeps exactly `window` pixels per axis.
/// Fails with `InvalidConfiguration` when the window is larger than the tile.
pub fn resolve(
    point: Point,
    tile: Resolution,
    window: SampleWindowSize,
) -> RulerResult<SamplingRect> {
    if tile.width() < window.width() || tile.height() < window.height() {
        tracing::warn!(
            tile_w = tile.width(),
            tile_h = tile.height(),
            window_w = window.width(),
            window_h = window.height(),
            "sample window larger than tile"
        );
        return Err(RulerError::InvalidConfiguration(format!(
            "sample window {}x{} exceeds tile resolution {}x{}",
            window.width(),
            window.height(),
            tile.width(),
            tile.height()
        )));
    }

    let (low_x, low_y) = tile.tile_origin(point);
    let (ext_x, ext_y) = window.half_extent();

    let left = clamp_axis(point.x as i64, low_x, tile.width(), ext_x, window.width());
    let top = clamp_axis(point.y as i64, low_y, tile.height(), ext_y, window.height());

    Ok(SamplingRect {
        left: to_coord(left)?,
        top: to_coord(top)?,
        right: to_coord(left + window.width() as i64)?,
        bottom: to_coord(top + window.height() as i64)?,
    })
}

/// Start coordinate of the window along one axis, tile bounds `[low, low + len)`.
fn clamp_axis(p: i64, low: i64, len: u32, extent: u32, size: u32) -> i64 {
    let high = low + len as i64;
    let size = size as i64;

    let mut start = if p - extent as i64 > low {
        p - extent as i64
    } else {
        low
    };
    if start + size - 1 > high - 1 {
        start = high - size;
    }
    start
}

fn to_coord(v: i64) -> RulerResult<i32> {
    i32::try_from(v).map_err(|_| {
        RulerError::InvalidConfiguration(format!("sampling coordinate {v} out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hd() -> Resolution {
        Resolution::new(1920, 1080).unwrap()
    }

    fn rect(left: i32, top: i32, right: i32, bottom: i32) -> SamplingRect {
        SamplingRect { left, top, right, bottom }
    }

    #[test]
    fn test_corner_and_centre_scenarios() {
        let w = SampleWindowSize::default();
        assert_eq!(resolve(Point::new(0, 0), full_hd(), w).unwrap(), rect(0, 0, 21, 21));
        assert_eq!(
            resolve(Point::new(1919, 1079), full_hd(), w).unwrap(),
            rect(1899, 1059, 1920, 1080)
        );
        assert_eq!(
            resolve(Point::new(960, 540), full_hd(), w).unwrap(),
            rect(950, 530, 971, 551)
        );
    }

    #[test]
    fn test_interior_points_are_centred() {
        let w = SampleWindowSize::new(21, 11).unwrap();
        for &(x, y) in &[(11, 6), (500, 500), (1908, 1073), (1000, 7)] {
            let r = resolve(Point::new(x, y), full_hd(), w).unwrap();
            assert_eq!(r.left + 10, x);
            assert_eq!(r.top + 5, y);
        }
    }

    #[test]
    fn test_size_is_always_exact() {
        let w = SampleWindowSize::new(7, 9).unwrap();
        let res = Resolution::new(40, 30).unwrap();
        for x in -45..85 {
            for y in -35..65 {
                let r = resolve(Point::new(x, y), res, w).unwrap();
                assert_eq!(r.width(), 7);
                assert_eq!(r.height(), 9);
                let (ox, oy) = res.tile_origin(Point::new(x, y));
                assert!(r.left as i64 >= ox && r.right as i64 <= ox + 40);
                assert!(r.top as i64 >= oy && r.bottom as i64 <= oy + 30);
            }
        }
    }

    #[test]
    fn test_second_monitor_tile() {
        let w = SampleWindowSize::default();
        // Left edge of the second monitor belongs to the second monitor.
        assert_eq!(
            resolve(Point::new(1920, 540), full_hd(), w).unwrap(),
            rect(1920, 530, 1941, 551)
        );
        // Last column of the first monitor stays on the first monitor.
        assert_eq!(
            resolve(Point::new(1919, 540), full_hd(), w).unwrap(),
            rect(1899, 530, 1920, 551)
        );
        assert_eq!(
            resolve(Point::new(3839, 1080), full_hd(), w).unwrap(),
            rect(3819, 1080, 3840, 1101)
        );
    }

    #[test]
    fn test_single_pixel_window() {
        let w = SampleWindowSize::new(1, 1).unwrap();
        for &(x, y) in &[(0, 0), (1919, 1079), (42, 7)] {
            assert_eq!(
                resolve(Point::new(x, y), full_hd(), w).unwrap(),
                rect(x, y, x + 1, y + 1)
            );
        }
    }

    #[test]
    fn test_window_equal_to_tile() {
        let w = SampleWindowSize::new(5, 5).unwrap();
        let res = Resolution::new(5, 5).unwrap();
        assert_eq!(resolve(Point::new(3, 1), res, w).unwrap(), rect(0, 0, 5, 5));
    }

    #[test]
    fn test_window_larger_than_tile_is_rejected() {
        let w = SampleWindowSize::new(21, 21).unwrap();
        let res = Resolution::new(20, 1080).unwrap();
        assert!(matches!(
            resolve(Point::new(5, 5), res, w),
            Err(RulerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let w = SampleWindowSize::default();
        let p = Point::new(1915, 3);
        assert_eq!(resolve(p, full_hd(), w).unwrap(), resolve(p, full_hd(), w).unwrap());
    }
}
