/// Distance decomposition between two points: horizontal leg, vertical leg
/// and the direct (hypotenuse) length, each in pixels, centimetres and inches.
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::measure::scale::{ScaleFactors, CM_PER_INCH};

/// One measured length in all reported units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub px: f64,
    pub cm: f64,
    pub inches: f64,
}

impl Length {
    fn from_px(px: f64, ppi: f64) -> Self {
        let inches = px / ppi;
        Self {
            px,
            cm: inches * CM_PER_INCH,
            inches,
        }
    }

    fn units_text(&self) -> String {
        format!("{:7.2}cm | {:7.2}inch", self.cm, self.inches)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Horizontal leg in whole pixels, at least 1.
    pub dx_px: u32,
    /// Vertical leg in whole pixels, at least 1.
    pub dy_px: u32,
    /// Euclidean length of the raw pixel offset; exactly 0 for coincident points.
    pub hypotenuse_px: f64,
    pub dx: Length,
    pub dy: Length,
    pub hypotenuse: Length,
}

impl MeasurementResult {
    pub fn dx_text(&self) -> String {
        format!("{}px | {}", self.dx_px, self.dx.units_text())
    }

    pub fn dy_text(&self) -> String {
        format!("{}px | {}", self.dy_px, self.dy.units_text())
    }

    pub fn hypotenuse_text(&self) -> String {
        format!("{:7.2}px | {}", self.hypotenuse_px, self.hypotenuse.units_text())
    }
}

/// Measure the L-shaped path from `anchor` to `endpoint` via the corner
/// `(endpoint.x, anchor.y)`.
///
/// Axis legs report a 1 px minimum (a single selected pixel still has
/// width) while the hypotenuse is computed from the raw offsets, so
/// `measure(a, a, _)` yields legs of 1 px and a hypotenuse of exactly 0.
pub fn measure(anchor: Point, endpoint: Point, scale: ScaleFactors) -> MeasurementResult {
    let raw_dx = (endpoint.x as i64 - anchor.x as i64).unsigned_abs();
    let raw_dy = (endpoint.y as i64 - anchor.y as i64).unsigned_abs();

    let hypotenuse_px = (raw_dx as f64).hypot(raw_dy as f64);
    let dx_px = leg_px(raw_dx);
    let dy_px = leg_px(raw_dy);

    MeasurementResult {
        dx_px,
        dy_px,
        hypotenuse_px,
        dx: Length::from_px(dx_px as f64, scale.ppix()),
        dy: Length::from_px(dy_px as f64, scale.ppiy()),
        hypotenuse: Length::from_px(hypotenuse_px, scale.ppi_hypotenuse()),
    }
}

fn leg_px(raw: u64) -> u32 {
    raw.clamp(1, u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppi96() -> ScaleFactors {
        ScaleFactors::isotropic(96.0).unwrap()
    }

    #[test]
    fn test_right_triangle_scenario() {
        let m = measure(Point::new(100, 100), Point::new(400, 300), ppi96());
        assert_eq!(m.dx_px, 300);
        assert_eq!(m.dy_px, 200);
        assert!((m.hypotenuse_px - 130_000f64.sqrt()).abs() < 1e-9);
        assert!((m.hypotenuse_px - 360.555).abs() < 1e-3);
        assert!((m.dx.inches - 3.125).abs() < 1e-12);
        assert!((m.dy.inches - 2.0833).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_points() {
        let p = Point::new(50, 50);
        let m = measure(p, p, ppi96());
        assert_eq!(m.dx_px, 1);
        assert_eq!(m.dy_px, 1);
        assert_eq!(m.hypotenuse_px, 0.0);
        assert_eq!(m.hypotenuse.cm, 0.0);
    }

    #[test]
    fn test_single_axis_segment() {
        let m = measure(Point::new(10, 10), Point::new(10, 60), ppi96());
        assert_eq!(m.dx_px, 1);
        assert_eq!(m.dy_px, 50);
        assert_eq!(m.hypotenuse_px, 50.0);
    }

    #[test]
    fn test_hypotenuse_is_symmetric() {
        let scale = ScaleFactors::from_dpi(90.0, 120.0).unwrap();
        let pairs = [
            (Point::new(0, 0), Point::new(13, -7)),
            (Point::new(-400, 20), Point::new(1900, 1000)),
            (Point::new(5, 5), Point::new(5, 5)),
        ];
        for (a, b) in pairs {
            let ab = measure(a, b, scale);
            let ba = measure(b, a, scale);
            assert_eq!(ab.hypotenuse_px, ba.hypotenuse_px);
            assert_eq!(ab.hypotenuse, ba.hypotenuse);
        }
    }

    #[test]
    fn test_cm_is_inches_times_2_54() {
        let scale = ScaleFactors::from_dpi(91.3, 102.7).unwrap();
        let m = measure(Point::new(-3, 17), Point::new(1234, 987), scale);
        for len in [m.dx, m.dy, m.hypotenuse] {
            assert!((len.cm - len.inches * 2.54).abs() < 1e-9);
        }
        assert!((m.dx.inches - 1237.0 / 91.3).abs() < 1e-9);
        assert!((m.dy.inches - 970.0 / 102.7).abs() < 1e-9);
        assert!((m.hypotenuse.inches - m.hypotenuse_px / 97.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_format() {
        let m = measure(Point::new(100, 100), Point::new(401, 300), ppi96());
        assert_eq!(m.dx_text(), "301px |    7.96cm |    3.14inch");
        assert_eq!(m.dy_text(), "200px |    5.29cm |    2.08inch");
        assert_eq!(m.hypotenuse_text(), " 361.39px |    9.56cm |    3.76inch");
    }
}
