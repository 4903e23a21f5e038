/// Annotation geometry for one measured segment: the triangle outline, the
/// short ruler ticks bisecting each side, and where the three labels go.
/// Coordinates are fractional because leg midpoints can fall between pixels.
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::measure::engine::MeasurementResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub at: Position,
    pub text: String,
}

/// Pending segments are drawn translucent and redrawn every frame; fixed
/// segments are opaque and can be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Moving,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickStyle {
    /// Half length of every tick mark.
    pub half_length: f64,
    /// Vertical lift of the hypotenuse label above the hypotenuse midpoint.
    pub label_offset: f64,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            half_length: 10.0,
            label_offset: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub style: Style,
    /// Closed polyline anchor -> corner -> endpoint -> anchor.
    pub outline: [Position; 4],
    pub horizontal_tick: Line,
    pub vertical_tick: Line,
    pub hypotenuse_tick: Line,
    pub x_label: Label,
    pub y_label: Label,
    pub hypotenuse_label: Label,
}

/// Build the annotation geometry for the segment `anchor` -> `endpoint`.
pub fn build(
    anchor: Point,
    endpoint: Point,
    result: &MeasurementResult,
    style: Style,
    ticks: TickStyle,
) -> Indicators {
    let a = Position::from(anchor);
    let e = Position::from(endpoint);
    let corner = Position::new(e.x, a.y);
    let len = ticks.half_length;

    let half_x = a.x + (corner.x - a.x) / 2.0;
    let half_y = corner.y + (e.y - corner.y) / 2.0;

    // Signed leg deltas rotated by 90 degrees and scaled to the tick length.
    let dx = e.x - a.x;
    let dy = e.y - a.y;
    let hyp = dx.hypot(dy);
    let (x_change, y_change) = if hyp > 0.0 {
        let s = hyp / len;
        (dy / s, dx / s)
    } else {
        (0.0, 0.0)
    };

    Indicators {
        style,
        outline: [a, corner, e, a],
        horizontal_tick: Line {
            from: Position::new(half_x, a.y + len),
            to: Position::new(half_x, a.y - len),
        },
        vertical_tick: Line {
            from: Position::new(e.x - len, half_y),
            to: Position::new(e.x + len, half_y),
        },
        hypotenuse_tick: Line {
            from: Position::new(half_x - x_change, half_y + y_change),
            to: Position::new(half_x + x_change, half_y - y_change),
        },
        x_label: Label {
            at: Position::new(half_x, a.y),
            text: result.dx_text(),
        },
        y_label: Label {
            at: Position::new(e.x, half_y),
            text: result.dy_text(),
        },
        hypotenuse_label: Label {
            at: Position::new(half_x, half_y - ticks.label_offset),
            text: result.hypotenuse_text(),
        },
    }
}
