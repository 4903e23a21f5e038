use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::measure::engine::{measure, MeasurementResult};
use crate::measure::indicators::{self, Indicators, Line, Position, Style, TickStyle};
use crate::measure::scale::ScaleFactors;

/// A measured segment. `Pending` segments end at the live cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Fixed { anchor: Point, endpoint: Point },
    Pending { anchor: Point },
}

impl Segment {
    pub fn anchor(&self) -> Point {
        match *self {
            Segment::Fixed { anchor, .. } | Segment::Pending { anchor } => anchor,
        }
    }

    /// Endpoint, with the live cursor standing in for a pending one.
    pub fn endpoint(&self, cursor: Point) -> Point {
        match *self {
            Segment::Fixed { endpoint, .. } => endpoint,
            Segment::Pending { .. } => cursor,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Segment::Pending { .. })
    }
}

/// Measurement plus its annotations. `indicators` is `None` when a short
/// pending segment is suppressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub segment: Segment,
    pub endpoint: Point,
    pub result: MeasurementResult,
    pub indicators: Option<Indicators>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Move the cursor by one pixel.
pub fn nudge(cursor: Point, direction: Direction) -> Point {
    match direction {
        Direction::Left => Point::new(cursor.x.saturating_sub(1), cursor.y),
        Direction::Right => Point::new(cursor.x.saturating_add(1), cursor.y),
        Direction::Up => Point::new(cursor.x, cursor.y.saturating_sub(1)),
        Direction::Down => Point::new(cursor.x, cursor.y.saturating_add(1)),
    }
}

/// Committed points of the current measuring session, owned by the host.
///
/// Clicks alternate between anchors and endpoints so that
/// `endpoints.len() <= anchors.len() <= endpoints.len() + 1`; a trailing
/// anchor without an endpoint is the in-progress segment.
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    anchors: Vec<Point>,
    endpoints: Vec<Point>,
    paused: bool,
    scale: ScaleFactors,
    ticks: TickStyle,
    short_segment_px: f64,
}

impl MeasurementSession {
    pub fn new(scale: ScaleFactors, ticks: TickStyle, short_segment_px: f64) -> Self {
        Self {
            anchors: Vec::new(),
            endpoints: Vec::new(),
            paused: false,
            scale,
            ticks,
            short_segment_px,
        }
    }

    /// Commit a point as the next anchor or endpoint. Ignored while paused.
    pub fn record_point(&mut self, point: Point) -> bool {
        if self.paused {
            tracing::debug!(x = point.x, y = point.y, "point ignored while paused");
            return false;
        }
        if self.anchors.len() == self.endpoints.len() {
            self.anchors.push(point);
            tracing::debug!(x = point.x, y = point.y, segments = self.anchors.len(), "anchor recorded");
        } else {
            self.endpoints.push(point);
            tracing::debug!(x = point.x, y = point.y, segments = self.anchors.len(), "endpoint recorded");
        }
        true
    }

    /// Drop every committed point.
    pub fn reset_session(&mut self) {
        self.anchors.clear();
        self.endpoints.clear();
        tracing::debug!("session reset");
    }

    /// Flip pass-through mode. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "pause toggled");
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_pending(&self) -> bool {
        self.anchors.len() > self.endpoints.len()
    }

    /// All committed points, anchors first, for dot markers.
    pub fn committed_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.anchors.iter().chain(self.endpoints.iter()).copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.anchors
            .iter()
            .enumerate()
            .map(|(i, &anchor)| match self.endpoints.get(i) {
                Some(&endpoint) => Segment::Fixed { anchor, endpoint },
                None => Segment::Pending { anchor },
            })
    }

    /// Measure every segment against the current cursor. Recomputed from
    /// scratch on every call.
    pub fn reports(&self, cursor: Point) -> impl Iterator<Item = SegmentReport> + '_ {
        self.segments().map(move |segment| self.report(segment, cursor))
    }

    fn report(&self, segment: Segment, cursor: Point) -> SegmentReport {
        let anchor = segment.anchor();
        let endpoint = segment.endpoint(cursor);
        let result = measure(anchor, endpoint, self.scale);

        let suppressed = segment.is_pending() && result.hypotenuse_px < self.short_segment_px;
        let indicators = if suppressed {
            None
        } else {
            let style = if segment.is_pending() {
                Style::Moving
            } else {
                Style::Static
            };
            Some(indicators::build(anchor, endpoint, &result, style, self.ticks))
        };

        SegmentReport {
            segment,
            endpoint,
            result,
            indicators,
        }
    }

    /// Crosshair drawn in place of the system cursor; hidden while paused.
    pub fn crosshair(&self, cursor: Point, half_length: f64) -> Option<[Line; 2]> {
        if self.paused {
            return None;
        }
        let c = Position::from(cursor);
        Some([
            Line {
                from: Position::new(c.x, c.y + half_length),
                to: Position::new(c.x, c.y - half_length),
            },
            Line {
                from: Position::new(c.x + half_length, c.y),
                to: Position::new(c.x - half_length, c.y),
            },
        ])
    }
}
